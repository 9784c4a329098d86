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

//! QR Code Model 2 encoder for `no_std` targets with an allocator.
//!
//! The crate turns text or bytes into a grid of dark and light modules. How
//! the grid is shown is up to the caller: iterate it with
//! [`QrCode::draw_iter`], read it with [`QrCode::get_module`], or print it
//! with [`core::fmt::Display`].
//!
//! ```
//! use qr_symbol::{ErrorCorrectionLevel, QrCodeBuilder};
//!
//! let qr_code = QrCodeBuilder::new()
//!     .with_error_correction_level(ErrorCorrectionLevel::Medium)
//!     .build_text("Hello, world!")
//!     .unwrap();
//! assert_eq!(qr_code.version().value(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod array_2d;
mod blocks;
pub mod buffer;
mod capacity;
mod draw_iterator;
mod encoding;
mod error;
mod error_correction;
mod format;
mod mask;
mod matrix;
mod qr_version;
mod qrcode;

pub use draw_iterator::{CoordinatedColor, DrawIterator};
pub use encoding::{EncodingMode, Segment};
pub use error::{Error, Result};
pub use error_correction::{ErrorCorrectionLevel, ReedSolomonGenerator};
pub use mask::Mask;
pub use matrix::Color;
pub use qr_version::Version;
pub use qrcode::{EncodeOptions, QrCode, QrCodeBuilder};
