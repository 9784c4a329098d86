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
use crate::matrix::Color;
use crate::qrcode::QrCode;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CoordinatedColor {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

/// Pixels of a symbol and its quiet zone, row by row.
///
/// ```
/// use qr_symbol::{Color, ErrorCorrectionLevel, QrCode};
///
/// let qr_code = QrCode::encode_text("HELLO WORLD", ErrorCorrectionLevel::Quartile).unwrap();
/// let iter = qr_code.draw_iter(4).unwrap();
/// assert_eq!(iter.width(), 29);
///
/// let dark = iter.filter(|pixel| pixel.color == Color::Dark).count();
/// assert!(dark > 0);
/// ```
#[derive(Clone, Debug)]
pub struct DrawIterator<'a> {
    qrcode: &'a QrCode,
    border: usize,
    width: usize,
    x: usize,
    y: usize,
}

impl<'a> DrawIterator<'a> {
    /// Fails when the padded symbol has more pixels than fit in a `usize`.
    pub(crate) fn new(qrcode: &'a QrCode, border: usize) -> Result<Self> {
        let width = border
            .checked_mul(2)
            .and_then(|quiet_zone| quiet_zone.checked_add(qrcode.size()))
            .filter(|width| width.checked_mul(*width).is_some())
            .ok_or(Error::InvalidArgument("border out of range"))?;
        Ok(DrawIterator {
            qrcode,
            border,
            width,
            x: 0,
            y: 0,
        })
    }

    pub fn height(&self) -> usize {
        self.width
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn remaining(&self) -> usize {
        (self.height() - self.y) * self.width() - self.x
    }
}

impl Iterator for DrawIterator<'_> {
    type Item = CoordinatedColor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.height() {
            return None;
        }

        let color = match (self.x.checked_sub(self.border), self.y.checked_sub(self.border)) {
            // Light beyond the far edge as well
            (Some(x), Some(y)) => self.qrcode.color(x, y),
            _ => Color::Light,
        };
        let result = CoordinatedColor {
            x: self.x,
            y: self.y,
            color,
        };

        self.x += 1;
        if self.x >= self.width() {
            self.x = 0;
            self.y += 1;
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.y >= self.height() {
            0
        } else {
            self.remaining()
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DrawIterator<'_> {}
