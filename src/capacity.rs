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

use crate::encoding::Segment;
use crate::error::{Error, Result};
use crate::error_correction::ErrorCorrectionLevel;
use crate::qr_version::Version;
use tracing::debug;

/// Finds the smallest version in `min_version..=max_version` whose data
/// capacity at `error_correction` holds all segments.
///
/// Returns the version and the number of data bits the segments use there.
pub fn find_version(
    segments: &[Segment],
    min_version: Version,
    max_version: Version,
    error_correction: ErrorCorrectionLevel,
) -> Result<(Version, usize)> {
    if min_version > max_version {
        return Err(Error::InvalidArgument("minimum version exceeds maximum version"));
    }

    let mut version = min_version;
    loop {
        let capacity_bits = version.data_codeword_bit_len(error_correction);
        let used_bits = Segment::total_bits(segments, version);
        match used_bits {
            Some(used_bits) if used_bits <= capacity_bits => {
                debug!(
                    version = version.value(),
                    used_bits, capacity_bits, "selected version"
                );
                return Ok((version, used_bits));
            }
            _ if version < max_version => {}
            Some(used_bits) => {
                return Err(Error::DataTooLong {
                    required: used_bits,
                    available: capacity_bits,
                })
            }
            None => return Err(Error::SegmentTooLong),
        }
        version = version
            .increment()
            .ok_or(Error::InvalidArgument("version out of range"))?;
    }
}

/// Raises the error correction level as long as `used_bits` still fits in
/// `version`. Never lowers the level.
pub fn boost_error_correction(
    version: Version,
    error_correction: ErrorCorrectionLevel,
    used_bits: usize,
    boost: bool,
) -> ErrorCorrectionLevel {
    if !boost {
        return error_correction;
    }

    let boosted = ErrorCorrectionLevel::ALL
        .iter()
        .copied()
        .filter(|&level| level > error_correction)
        .filter(|&level| used_bits <= version.data_codeword_bit_len(level))
        .fold(error_correction, |_, level| level);
    if boosted != error_correction {
        debug!(from = ?error_correction, to = ?boosted, "boosted error correction level");
    }
    boosted
}
