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
use crate::blocks::{add_ecc_and_interleave, encode_data_codewords};
use crate::capacity::{boost_error_correction, find_version};
use crate::draw_iterator::DrawIterator;
use crate::encoding::Segment;
use crate::error::Result;
use crate::error_correction::ErrorCorrectionLevel;
use crate::mask::Mask;
use crate::matrix::{Color, Matrix};
use crate::qr_version::Version;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter, Write};

/// A finished QR Code symbol.
///
/// ```
/// use qr_symbol::{ErrorCorrectionLevel, QrCode};
///
/// let qr_code = QrCode::encode_text("HELLO WORLD", ErrorCorrectionLevel::Quartile).unwrap();
/// assert_eq!(qr_code.size(), 21);
/// assert!(qr_code.get_module(0, 0));
/// assert!(!qr_code.get_module(-1, 0));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct QrCode {
    version: Version,
    error_correction: ErrorCorrectionLevel,
    mask: Mask,
    modules: Array2D<Color>,
}

impl QrCode {
    pub fn builder() -> QrCodeBuilder {
        QrCodeBuilder::new()
    }

    /// Encodes text in the smallest version that fits, choosing numeric,
    /// alphanumeric or byte mode.
    pub fn encode_text(text: &str, error_correction: ErrorCorrectionLevel) -> Result<Self> {
        Self::encode_segments(Segment::make_segments(text)?, error_correction)
    }

    /// Encodes arbitrary bytes as a single byte mode segment.
    pub fn encode_binary(data: &[u8], error_correction: ErrorCorrectionLevel) -> Result<Self> {
        Self::encode_segments(vec![Segment::make_bytes(data)], error_correction)
    }

    pub fn encode_segments(
        segments: Vec<Segment>,
        error_correction: ErrorCorrectionLevel,
    ) -> Result<Self> {
        Self::encode_segments_advanced(
            segments,
            error_correction,
            Version::MIN,
            Version::MAX,
            None,
            true,
        )
    }

    /// Encodes the segments in the smallest version within
    /// `min_version..=max_version`.
    ///
    /// With `boost` the error correction level is raised as far as the chosen
    /// version allows. A `mask` of `None` selects the mask with the lowest
    /// penalty.
    pub fn encode_segments_advanced(
        segments: Vec<Segment>,
        error_correction: ErrorCorrectionLevel,
        min_version: Version,
        max_version: Version,
        mask: Option<Mask>,
        boost: bool,
    ) -> Result<Self> {
        let (version, used_bits) =
            find_version(&segments, min_version, max_version, error_correction)?;
        let error_correction = boost_error_correction(version, error_correction, used_bits, boost);
        let data = encode_data_codewords(segments, version, error_correction);
        Self::encode_codewords(version, error_correction, &data, mask)
    }

    /// Builds the symbol from complete data codewords, which must match the
    /// data capacity of the version and level exactly.
    pub fn encode_codewords(
        version: Version,
        error_correction: ErrorCorrectionLevel,
        data_codewords: &[u8],
        mask: Option<Mask>,
    ) -> Result<Self> {
        let codewords = add_ecc_and_interleave(data_codewords, version, error_correction)?;

        let mut matrix = Matrix::new(version, error_correction);
        matrix.place_codewords(&codewords);
        let mask = matrix.commit_mask(mask);

        Ok(QrCode {
            version,
            error_correction,
            mask,
            modules: matrix.into_colors(),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Number of modules along each side.
    pub fn size(&self) -> usize {
        self.modules.size()
    }

    pub fn error_correction_level(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Color at column `x`, row `y`. Everything outside the symbol is light.
    pub fn color(&self, x: usize, y: usize) -> Color {
        self.modules
            .get(Coordinate::new(x, y))
            .copied()
            .unwrap_or(Color::Light)
    }

    /// Whether the module at column `x`, row `y` is dark. Coordinates
    /// outside the symbol are light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.color(x, y).is_dark(),
            _ => false,
        }
    }

    pub fn modules(&self) -> &Array2D<Color> {
        &self.modules
    }

    /// Iterates all pixels of the symbol surrounded by a light quiet zone of
    /// `border` modules. Fails with [`crate::Error::InvalidArgument`] when the
    /// padded symbol is too large to address.
    pub fn draw_iter(&self, border: usize) -> Result<DrawIterator<'_>> {
        DrawIterator::new(self, border)
    }
}

impl Display for QrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let size = self.size();
        for y in (0..size).step_by(2) {
            for x in 0..size {
                f.write_char(match (self.color(x, y), self.color(x, y + 1)) {
                    (Color::Dark, Color::Dark) => '\u{2588}',
                    (Color::Dark, Color::Light) => '\u{2580}',
                    (Color::Light, Color::Dark) => '\u{2584}',
                    (Color::Light, Color::Light) => ' ',
                })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl Debug for QrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.modules.rows().try_for_each(|mut row| {
            row.try_for_each(|color| match color {
                Color::Dark => f.write_char('\u{2588}'),
                Color::Light => f.write_char('_'),
            })?;
            f.write_char('\n')
        })
    }
}

/// Settings used by [`QrCodeBuilder`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct EncodeOptions {
    /// Lowest acceptable level
    pub error_correction_level: ErrorCorrectionLevel,
    pub min_version: Version,
    pub max_version: Version,
    /// `None` selects the mask automatically
    pub mask: Option<Mask>,
    pub boost_error_correction: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_correction_level: ErrorCorrectionLevel::Low,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            boost_error_correction: true,
        }
    }
}

/// ```
/// use qr_symbol::{ErrorCorrectionLevel, QrCodeBuilder};
///
/// let qr_code = QrCodeBuilder::new()
///     .with_error_correction_level(ErrorCorrectionLevel::Medium)
///     .with_boost_error_correction(false)
///     .build_text("https://example.com")
///     .unwrap();
/// assert_eq!(qr_code.error_correction_level(), ErrorCorrectionLevel::Medium);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct QrCodeBuilder {
    options: EncodeOptions,
}

impl QrCodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn with_error_correction_level(mut self, level: ErrorCorrectionLevel) -> Self {
        self.options.error_correction_level = level;
        self
    }

    pub fn with_version_range(mut self, min_version: Version, max_version: Version) -> Self {
        self.options.min_version = min_version;
        self.options.max_version = max_version;
        self
    }

    pub fn with_mask(mut self, mask: Option<Mask>) -> Self {
        self.options.mask = mask;
        self
    }

    pub fn with_boost_error_correction(mut self, boost: bool) -> Self {
        self.options.boost_error_correction = boost;
        self
    }

    pub fn options(&self) -> EncodeOptions {
        self.options
    }

    pub fn build_text(&self, text: &str) -> Result<QrCode> {
        self.build_segments(Segment::make_segments(text)?)
    }

    pub fn build_binary(&self, data: &[u8]) -> Result<QrCode> {
        self.build_segments(vec![Segment::make_bytes(data)])
    }

    pub fn build_segments(&self, segments: Vec<Segment>) -> Result<QrCode> {
        let options = self.options;
        QrCode::encode_segments_advanced(
            segments,
            options.error_correction_level,
            options.min_version,
            options.max_version,
            options.mask,
            options.boost_error_correction,
        )
    }
}
