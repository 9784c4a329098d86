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
use crate::error_correction::ErrorCorrectionLevel;
use alloc::vec::Vec;

pub const fn version_to_size(version: u8) -> usize {
    version as usize * 4 + 17
}

// Error correction codewords per block, indexed by [level ordinal][version - 1]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 40]; 4] = [
    [
        7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

// Error correction blocks, indexed by [level ordinal][version - 1]
const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 40]; 4] = [
    [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14,
        15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// The size class of a symbol, between 1 (21x21 modules) and 40
/// (177x177 modules).
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Version {
    pub(crate) version: u8,
}

impl Version {
    pub const MIN: Version = Version { version: 1 };
    pub const MAX: Version = Version { version: 40 };

    pub fn new(version: u8) -> Result<Self> {
        if (Self::MIN.version..=Self::MAX.version).contains(&version) {
            Ok(Self { version })
        } else {
            Err(Error::InvalidArgument("version out of range"))
        }
    }

    pub const fn value(self) -> u8 {
        self.version
    }

    pub fn increment(self) -> Option<Self> {
        if self.version < Self::MAX.version {
            Some(Self {
                version: self.version + 1,
            })
        } else {
            None
        }
    }

    pub fn decrement(self) -> Option<Self> {
        if self.version > Self::MIN.version {
            Some(Self {
                version: self.version - 1,
            })
        } else {
            None
        }
    }

    /// Width and height of the symbol in modules.
    pub const fn width(&self) -> usize {
        version_to_size(self.version)
    }

    fn table_index(self) -> usize {
        usize::from(self.version) - 1
    }

    /// Number of modules available for data and error correction codewords,
    /// including remainder bits. Between 208 and 29648.
    pub fn raw_data_module_count(&self) -> usize {
        let version = usize::from(self.version);
        let mut result = (16 * version + 128) * version + 64;
        if version >= 2 {
            let alignment_count = version / 7 + 2;
            result -= (25 * alignment_count - 10) * alignment_count - 55;
            if version >= 7 {
                result -= 36;
            }
        }
        debug_assert!((208..=29648).contains(&result));
        result
    }

    pub fn total_codeword_count(&self) -> usize {
        self.raw_data_module_count() / 8
    }

    pub fn error_correction_codewords_per_block(
        &self,
        error_correction: ErrorCorrectionLevel,
    ) -> usize {
        ECC_CODEWORDS_PER_BLOCK[error_correction.ordinal()][self.table_index()].into()
    }

    pub fn error_correction_block_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[error_correction.ordinal()][self.table_index()].into()
    }

    pub fn data_codeword_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.total_codeword_count()
            - self.error_correction_codewords_per_block(error_correction)
                * self.error_correction_block_count(error_correction)
    }

    pub fn data_codeword_bit_len(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.data_codeword_count(error_correction) * 8
    }

    /// Centre coordinates of the alignment patterns along one axis, in
    /// ascending order. Version 1 has none.
    pub fn alignment_pattern_positions(&self) -> Vec<usize> {
        let version = usize::from(self.version);
        if version == 1 {
            return Vec::new();
        }
        let count = version / 7 + 2;
        let step = (version * 8 + count * 3 + 5) / (count * 4 - 4) * 2;
        let mut result: Vec<usize> = (0..count - 1)
            .map(|i| self.width() - 7 - i * step)
            .collect();
        result.push(6);
        result.reverse();
        result
    }
}
