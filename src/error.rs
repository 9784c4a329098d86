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

use thiserror::Error;

/// Everything that can go wrong while encoding a QR code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter is outside of its valid range, or the input is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The data does not fit in any allowed version at the requested error
    /// correction level.
    #[error("data too long: {required} bits required, {available} bits available")]
    DataTooLong { required: usize, available: usize },

    /// A segment holds more characters than its character count field can
    /// describe, so no bit count can be computed.
    #[error("data too long: segment exceeds its character count field")]
    SegmentTooLong,
}

impl Error {
    /// Both capacity errors mean the payload needs to shrink.
    pub fn is_data_too_long(&self) -> bool {
        matches!(self, Error::DataTooLong { .. } | Error::SegmentTooLong)
    }
}

pub type Result<T> = core::result::Result<T, Error>;
