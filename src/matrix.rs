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

use crate::array_2d::{Array2D, Coordinate};
use crate::error_correction::ErrorCorrectionLevel;
use crate::format;
use crate::mask::Mask;
use crate::qr_version::Version;
use bitvec::prelude::*;
use core::fmt::{Debug, Formatter, Write};

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub enum Color {
    #[default]
    Light,
    Dark,
}

impl Color {
    pub(crate) fn inverse(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Color::Dark
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Color::Dark
        } else {
            Color::Light
        }
    }
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub(crate) enum Module {
    /// Not drawn yet
    #[default]
    Empty,
    /// Carries codeword or remainder bits and takes part in masking
    Data(Color),
    /// Finder, separator, timing, alignment, format or version module
    Function(Color),
}

impl Module {
    pub(crate) fn color(self) -> Color {
        match self {
            Module::Empty => Color::Light,
            Module::Data(color) => color,
            Module::Function(color) => color,
        }
    }
}

/// Grid under construction. Keeps track of which modules belong to function
/// patterns, so masking and placement leave them untouched.
#[derive(Clone, Eq, PartialEq)]
pub(crate) struct Matrix {
    pub(crate) data: Array2D<Module>,
    version: Version,
    error_correction: ErrorCorrectionLevel,
}

impl Matrix {
    /// Creates a grid with all function patterns drawn. The format area holds
    /// the bits for mask 0 until a mask is committed.
    pub fn new(version: Version, error_correction: ErrorCorrectionLevel) -> Self {
        let mut matrix = Self {
            data: Array2D::new(version.width()),
            version,
            error_correction,
        };
        matrix.draw_function_patterns();
        matrix
    }

    pub fn size(&self) -> usize {
        self.data.size()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.data[Coordinate::new(x, y)] = Module::Function(dark.into());
    }

    fn draw_function_patterns(&mut self) {
        self.draw_timing_patterns();

        let size = self.size();
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        self.draw_alignment_patterns();

        self.draw_format_bits(Mask::PLACEHOLDER);
        self.draw_version();
    }

    fn draw_timing_patterns(&mut self) {
        for i in 0..self.size() {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }
    }

    /// Draws a finder pattern plus its separator, clipped at the grid edge.
    fn draw_finder_pattern(&mut self, center_x: usize, center_y: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = center_x as isize + dx;
                let y = center_y as isize + dy;
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let distance = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, distance != 2 && distance != 4);
                }
            }
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let positions = self.version.alignment_pattern_positions();
        let count = positions.len();
        for (i, &x) in positions.iter().enumerate() {
            for (j, &y) in positions.iter().enumerate() {
                // These overlap the finder patterns
                let top_left = i == 0 && j == 0;
                let top_right = i == count - 1 && j == 0;
                let bottom_left = i == 0 && j == count - 1;
                if !(top_left || top_right || bottom_left) {
                    self.draw_alignment_pattern(x, y);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, center_x: usize, center_y: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let x = (center_x as isize + dx) as usize;
                let y = (center_y as isize + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// Writes both copies of the format information for `mask`.
    pub fn draw_format_bits(&mut self, mask: Mask) {
        let bits = format::format_bits(self.error_correction, mask);
        let bit = |i: usize| (bits >> i) & 1 != 0;
        let size = self.size();

        // Around the top-left finder
        for i in 0..6 {
            self.set_function(8, i, bit(i));
        }
        self.set_function(8, 7, bit(6));
        self.set_function(8, 8, bit(7));
        self.set_function(7, 8, bit(8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit(i));
        }

        // Split between the top-right and bottom-left finders
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit(i));
        }
        self.set_function(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let bits = format::version_bits(self.version);
        let size = self.size();
        for i in 0..18 {
            let dark = (bits >> i) & 1 != 0;
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, dark);
            self.set_function(b, a, dark);
        }
    }

    /// Fills the data area with `codewords` in the zigzag order, starting at
    /// the bottom-right corner. Modules left over after the last bit become
    /// light remainder bits.
    pub fn place_codewords(&mut self, codewords: &[u8]) {
        debug_assert_eq!(
            codewords.len(),
            self.version.total_codeword_count(),
            "codeword count must match the version"
        );

        let mut bits = codewords.view_bits::<Msb0>().iter().by_vals();
        let size = self.size();
        let mut right = size - 1;
        loop {
            if right == 6 {
                // Skip the vertical timing pattern
                right = 5;
            }
            let upwards = (right + 1) & 2 == 0;
            for vertical in 0..size {
                let y = if upwards { size - 1 - vertical } else { vertical };
                for x in [right, right - 1] {
                    let module = &mut self.data[Coordinate::new(x, y)];
                    if *module == Module::Empty {
                        let dark = bits.next().unwrap_or(false);
                        *module = Module::Data(dark.into());
                    }
                }
            }
            if right < 2 {
                break;
            }
            right -= 2;
        }
        debug_assert!(bits.next().is_none(), "all codeword bits must be placed");
    }

    /// Drops the function markers, leaving the final colors.
    pub fn into_colors(self) -> Array2D<Color> {
        self.data.map(|module| module.color())
    }
}

impl Debug for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.data.rows().try_for_each(|mut row| {
            row.try_for_each(|module| match module {
                Module::Data(Color::Light) => f.write_char('_'),
                Module::Data(Color::Dark) => f.write_char('\u{2588}'),
                Module::Empty => f.write_char('\u{FFFD}'),
                Module::Function(Color::Light) => f.write_char('\u{2591}'),
                Module::Function(Color::Dark) => f.write_char('\u{2593}'),
            })?;
            f.write_char('\n')
        })
    }
}
