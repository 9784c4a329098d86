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

//! Format and version information words.

use crate::error_correction::ErrorCorrectionLevel;
use crate::mask::Mask;
use crate::qr_version::Version;

/// BCH(15,5) codes for every (error correction bits, mask) pair, already
/// XOR-ed with `0x5412`.
const MASKED_FORMAT_SEQUENCES: [u16; 32] = [
    0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, 0x77c4, 0x72f3, 0x7daa,
    0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, 0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255,
    0x0d0c, 0x083b, 0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed,
];

/// The 15-bit format information for a level and mask.
pub fn format_bits(error_correction_level: ErrorCorrectionLevel, mask: Mask) -> u16 {
    let data = (error_correction_level.format_bits() << 3) | mask.value();
    MASKED_FORMAT_SEQUENCES[data as usize]
}

/// The 18-bit version information: 6 version bits followed by a BCH(18,6)
/// remainder over the generator `0x1F25`.
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.value());
    let mut remainder = data;
    for _ in 0..12 {
        remainder = (remainder << 1) ^ ((remainder >> 11) * 0x1F25);
    }
    let bits = data << 12 | remainder;
    debug_assert_eq!(bits >> 18, 0);
    bits
}
