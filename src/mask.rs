/* Copyright (C) 2021 Casper Meijn <casper@meijn.net>
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use crate::array_2d::Coordinate;
use crate::error::{Error, Result};
use crate::matrix::{Color, Matrix, Module};
use tracing::{debug, trace};

const PENALTY_N1: usize = 3;
const PENALTY_N2: usize = 3;
const PENALTY_N3: usize = 40;
const PENALTY_N4: usize = 10;

/// One of the eight data mask patterns.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Mask(u8);

impl Mask {
    pub const ALL: [Mask; 8] = [
        Mask(0),
        Mask(1),
        Mask(2),
        Mask(3),
        Mask(4),
        Mask(5),
        Mask(6),
        Mask(7),
    ];

    /// Drawn into the format area before a mask is chosen.
    pub(crate) const PLACEHOLDER: Mask = Mask(0);

    /// ```
    /// use qr_symbol::Mask;
    ///
    /// assert_eq!(Mask::new(5).unwrap().value(), 5);
    /// assert!(Mask::new(8).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < 8 {
            Ok(Mask(value))
        } else {
            Err(Error::InvalidArgument("mask out of range"))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the module at column `x`, row `y` is inverted.
    fn inverts(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => x * y % 2 + x * y % 3 == 0,
            6 => (x * y % 2 + x * y % 3) % 2 == 0,
            _ => ((x + y) % 2 + x * y % 3) % 2 == 0,
        }
    }
}

impl TryFrom<u8> for Mask {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Mask::new(value)
    }
}

impl Matrix {
    /// XORs the mask pattern onto every data module. Applying the same mask
    /// again restores the grid.
    pub fn apply_mask(&mut self, mask: Mask) {
        let size = self.size();
        for y in 0..size {
            for x in 0..size {
                let module = &mut self.data[Coordinate::new(x, y)];
                if let Module::Data(color) = *module {
                    if mask.inverts(x, y) {
                        *module = Module::Data(color.inverse());
                    }
                }
            }
        }
    }

    /// Applies `mask`, or the lowest scoring mask when `None`, together with
    /// the matching format information.
    pub fn commit_mask(&mut self, mask: Option<Mask>) -> Mask {
        let mask = mask.unwrap_or_else(|| self.select_mask());
        self.apply_mask(mask);
        self.draw_format_bits(mask);
        debug!(
            version = self.version().value(),
            mask = mask.value(),
            "mask committed"
        );
        mask
    }

    fn select_mask(&mut self) -> Mask {
        let mut best = Mask::PLACEHOLDER;
        let mut min_penalty = usize::MAX;
        for mask in Mask::ALL {
            self.apply_mask(mask);
            self.draw_format_bits(mask);
            let penalty = self.penalty_score();
            trace!(mask = mask.value(), penalty, "mask candidate");
            if penalty < min_penalty {
                best = mask;
                min_penalty = penalty;
            }
            self.apply_mask(mask);
        }
        best
    }

    /// Penalty of the grid as it stands. Lower is better.
    pub fn penalty_score(&self) -> usize {
        let size = self.size();
        let lines: usize = self
            .data
            .rows()
            .chain(self.data.columns())
            .map(|line| score_line(line, size))
            .sum();

        let score = lines + self.score_blocks() + self.score_balance();
        debug_assert!(score <= 2_568_888);
        score
    }

    fn score_blocks(&self) -> usize {
        let size = self.size();
        let color = |x: usize, y: usize| self.data[Coordinate::new(x, y)].color();
        (0..size - 1)
            .flat_map(|y| (0..size - 1).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let top_left = color(x, y);
                top_left == color(x + 1, y)
                    && top_left == color(x, y + 1)
                    && top_left == color(x + 1, y + 1)
            })
            .count()
            * PENALTY_N2
    }

    fn score_balance(&self) -> usize {
        let dark = self
            .data
            .iter()
            .filter(|module| module.color() == Color::Dark)
            .count();
        let total = self.size() * self.size();
        // Smallest k with (45 - 5k)% <= dark <= (55 + 5k)%
        let k = ((dark * 20).abs_diff(total * 10) + total - 1) / total - 1;
        k * PENALTY_N4
    }
}

/// Adjacent runs of five or more, plus finder-like 1:1:3:1:1 patterns with
/// four light modules on either side.
fn score_line<'a>(line: impl Iterator<Item = &'a Module>, size: usize) -> usize {
    let mut score = 0;
    let mut history = FinderPenalty::new(size);
    let mut run_color = Color::Light;
    let mut run_length = 0;

    for module in line {
        let color = module.color();
        if color == run_color {
            run_length += 1;
            if run_length == 5 {
                score += PENALTY_N1;
            } else if run_length > 5 {
                score += 1;
            }
        } else {
            history.add_run(run_length);
            if run_color == Color::Light {
                score += history.count_patterns() * PENALTY_N3;
            }
            run_color = color;
            run_length = 1;
        }
    }
    score + history.terminate_and_count(run_color, run_length) * PENALTY_N3
}

/// The last seven run lengths of a line, newest first. The area outside the
/// grid counts as light.
struct FinderPenalty {
    size: usize,
    history: [usize; 7],
}

impl FinderPenalty {
    fn new(size: usize) -> Self {
        Self {
            size,
            history: [0; 7],
        }
    }

    fn add_run(&mut self, mut length: usize) {
        if self.history[0] == 0 {
            // First run touches the light border
            length += self.size;
        }
        self.history.copy_within(0..6, 1);
        self.history[0] = length;
    }

    /// Number of finder-like patterns ending at the newest light run, 0..=2.
    fn count_patterns(&self) -> usize {
        let h = &self.history;
        let n = h[1];
        debug_assert!(n <= self.size * 3);
        let core = n > 0 && h[2] == n && h[3] == n * 3 && h[4] == n && h[5] == n;
        usize::from(core && h[0] >= n * 4 && h[6] >= n)
            + usize::from(core && h[6] >= n * 4 && h[0] >= n)
    }

    fn terminate_and_count(&mut self, run_color: Color, mut run_length: usize) -> usize {
        if run_color == Color::Dark {
            self.add_run(run_length);
            run_length = 0;
        }
        // Light border after the last module
        run_length += self.size;
        self.add_run(run_length);
        self.count_patterns()
    }
}
