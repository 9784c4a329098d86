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

use crate::error::{Error, Result};
use alloc::vec;
use alloc::vec::Vec;

/// Qr codes use Reed–Solomon error correction
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCorrectionLevel {
    /// Allows recovery of 7% of missing data
    Low,
    /// Allows recovery of 15% of missing data
    Medium,
    /// Allows recovery of 25% of missing data
    Quartile,
    /// Allows recovery of 30% of missing data
    High,
}

impl ErrorCorrectionLevel {
    /// All levels, from the least to the most redundancy.
    pub const ALL: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::Low,
        ErrorCorrectionLevel::Medium,
        ErrorCorrectionLevel::Quartile,
        ErrorCorrectionLevel::High,
    ];

    /// Position in [`ErrorCorrectionLevel::ALL`], used to index the block tables.
    pub const fn ordinal(self) -> usize {
        match self {
            ErrorCorrectionLevel::Low => 0,
            ErrorCorrectionLevel::Medium => 1,
            ErrorCorrectionLevel::Quartile => 2,
            ErrorCorrectionLevel::High => 3,
        }
    }

    /// The two bits stored in the format information.
    pub const fn format_bits(self) -> u8 {
        match self {
            ErrorCorrectionLevel::Low => 0b01,
            ErrorCorrectionLevel::Medium => 0b00,
            ErrorCorrectionLevel::Quartile => 0b11,
            ErrorCorrectionLevel::High => 0b10,
        }
    }

    pub fn increment(self) -> Option<Self> {
        match self {
            ErrorCorrectionLevel::Low => Some(ErrorCorrectionLevel::Medium),
            ErrorCorrectionLevel::Medium => Some(ErrorCorrectionLevel::Quartile),
            ErrorCorrectionLevel::Quartile => Some(ErrorCorrectionLevel::High),
            ErrorCorrectionLevel::High => None,
        }
    }
}

/// Computes error correction codewords for data blocks of a single degree.
///
/// All blocks of a symbol share the same degree, so one generator is built
/// per symbol and reused for every block.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReedSolomonGenerator {
    // Divisor polynomial from the highest to the lowest power, without the
    // leading term (always 1). x^3 + 255x^2 + 8x + 93 is stored as [255, 8, 93].
    coefficients: Vec<u8>,
}

impl ReedSolomonGenerator {
    /// Builds the divisor (x - 2^0)(x - 2^1)...(x - 2^(degree - 1)) over
    /// GF(2^8/0x11D).
    pub fn new(degree: usize) -> Result<Self> {
        if !(1..=255).contains(&degree) {
            return Err(Error::InvalidArgument("degree out of range"));
        }

        // Start with the monomial x^0
        let mut coefficients = vec![0u8; degree];
        coefficients[degree - 1] = 1;

        let mut root: u8 = 1;
        for _ in 0..degree {
            // Multiply the current product by (x - root)
            for j in 0..degree {
                coefficients[j] = multiply(coefficients[j], root);
                if j + 1 < degree {
                    coefficients[j] ^= coefficients[j + 1];
                }
            }
            root = multiply(root, 0x02);
        }

        Ok(Self { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the remainder of `data` divided by the divisor polynomial:
    /// the error correction codewords for this block.
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.coefficients.len()];
        for &byte in data {
            let factor = byte ^ result[0];
            result.rotate_left(1);
            if let Some(last) = result.last_mut() {
                *last = 0;
            }
            for (slot, &coefficient) in result.iter_mut().zip(&self.coefficients) {
                *slot ^= multiply(coefficient, factor);
            }
        }
        result
    }
}

/// Product of two field elements in GF(2^8/0x11D), by Russian peasant
/// multiplication.
fn multiply(x: u8, y: u8) -> u8 {
    let mut z: u16 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x11d);
        z ^= u16::from((y >> i) & 1) * u16::from(x);
    }
    debug_assert_eq!(z >> 8, 0);
    z as u8
}
