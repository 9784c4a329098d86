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

use crate::buffer::BitBuffer;
use crate::error::{Error, Result};
use crate::qr_version::Version;
use alloc::vec;
use alloc::vec::Vec;

/// The character set of alphanumeric mode; a character's value is its index.
const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// The way a segment's characters are packed into bits.
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum EncodingMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
    Eci,
    StructuredAppend,
}

impl EncodingMode {
    /// The 4-bit mode indicator written in front of every segment.
    pub const fn mode_bits(self) -> u32 {
        match self {
            EncodingMode::Numeric => 0x1,
            EncodingMode::Alphanumeric => 0x2,
            EncodingMode::StructuredAppend => 0x3,
            EncodingMode::Byte => 0x4,
            EncodingMode::Eci => 0x7,
            EncodingMode::Kanji => 0x8,
        }
    }

    /// Width of the character count field for versions 1-9, 10-26 and 27-40.
    const fn character_count_widths(self) -> [usize; 3] {
        match self {
            EncodingMode::Numeric => [10, 12, 14],
            EncodingMode::Alphanumeric => [9, 11, 13],
            EncodingMode::Byte => [8, 16, 16],
            EncodingMode::Kanji => [8, 10, 12],
            EncodingMode::Eci | EncodingMode::StructuredAppend => [0, 0, 0],
        }
    }

    pub fn character_count_bits(self, version: Version) -> usize {
        self.character_count_widths()[(usize::from(version.value()) + 7) / 17]
    }
}

/// A run of input encoded in a single mode, ready to be concatenated into
/// the data codewords.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segment {
    mode: EncodingMode,
    // Characters for numeric and alphanumeric mode, bytes for byte mode
    num_chars: usize,
    data: BitBuffer,
}

impl Segment {
    pub fn new(mode: EncodingMode, num_chars: usize, data: BitBuffer) -> Self {
        Self {
            mode,
            num_chars,
            data,
        }
    }

    /// Splits `text` into segments, picking the densest mode that can
    /// hold the whole text.
    ///
    /// Always produces exactly one segment; mixing modes is not attempted.
    ///
    /// # Example
    ///```
    ///     use qr_symbol::{EncodingMode, Segment};
    ///     let segments = Segment::make_segments("HELLO WORLD").unwrap();
    ///     assert_eq!(segments.len(), 1);
    ///     assert_eq!(segments[0].mode(), EncodingMode::Alphanumeric);
    ///     assert_eq!(segments[0].data().len(), 61);
    ///```
    pub fn make_segments(text: &str) -> Result<Vec<Segment>> {
        if text.trim().is_empty() {
            return Err(Error::InvalidArgument("text must not be empty"));
        }

        let segment = if Self::is_numeric(text) {
            Self::make_numeric(text)?
        } else if Self::is_alphanumeric(text) {
            Self::make_alphanumeric(text)?
        } else {
            Self::make_bytes(text.as_bytes())
        };
        Ok(vec![segment])
    }

    /// Byte mode segment; every byte is stored verbatim.
    pub fn make_bytes(data: &[u8]) -> Self {
        let mut buffer = BitBuffer::new();
        for &byte in data {
            buffer.append_bits(byte.into(), 8);
        }
        Self::new(EncodingMode::Byte, data.len(), buffer)
    }

    /// Numeric mode segment; groups of three digits take ten bits, a final
    /// group of one or two digits takes four or seven.
    pub fn make_numeric(digits: &str) -> Result<Self> {
        let values = digits
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .ok_or(Error::InvalidArgument("numeric text contains a non-digit"))?;

        let mut buffer = BitBuffer::new();
        for group in values.chunks(3) {
            let number = group.iter().fold(0, |number, digit| number * 10 + digit);
            buffer.append_bits(number, group.len() * 3 + 1);
        }
        Ok(Self::new(EncodingMode::Numeric, values.len(), buffer))
    }

    /// Alphanumeric mode segment; pairs of characters take eleven bits, a
    /// trailing single character takes six.
    pub fn make_alphanumeric(text: &str) -> Result<Self> {
        let values = text
            .chars()
            .map(alphanumeric_value)
            .collect::<Option<Vec<u32>>>()
            .ok_or(Error::InvalidArgument(
                "alphanumeric text contains an unencodable character",
            ))?;

        let mut buffer = BitBuffer::new();
        for pair in values.chunks(2) {
            match *pair {
                [first, second] => buffer.append_bits(first * 45 + second, 11),
                [single] => buffer.append_bits(single, 6),
                _ => unreachable!(),
            }
        }
        Ok(Self::new(EncodingMode::Alphanumeric, values.len(), buffer))
    }

    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| alphanumeric_value(c).is_some())
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    pub(crate) fn into_parts(self) -> (EncodingMode, usize, BitBuffer) {
        (self.mode, self.num_chars, self.data)
    }

    /// Number of bits needed to store `segments` at `version`, headers
    /// included. `None` when a segment has more characters than its count
    /// field can express.
    pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
        segments.iter().try_fold(0usize, |total, segment| {
            let count_bits = segment.mode.character_count_bits(version);
            if segment.num_chars >= 1 << count_bits {
                return None;
            }
            total.checked_add(4 + count_bits + segment.data.len())
        })
    }
}

fn alphanumeric_value(c: char) -> Option<u32> {
    ALPHANUMERIC_CHARSET.find(c).map(|index| index as u32)
}

#[cfg(test)]
mod tests {
    use crate::encoding::{EncodingMode, Segment};
    use crate::error::Error;
    use crate::qr_version::Version;

    #[test]
    fn numeric() {
        let segments = Segment::make_segments("83930").unwrap();
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert_eq!(segment.mode(), EncodingMode::Numeric);
        assert_eq!(segment.num_chars(), 5);
        assert_eq!(segment.data().len(), 17);
        assert_eq!(segment.data().to_bytes(), [209, 207, 0]);
    }

    #[test]
    fn numeric_group_lengths() {
        for (text, bits) in [("1", 4), ("12", 7), ("123", 10), ("1234", 14), ("12345", 17)] {
            assert_eq!(Segment::make_numeric(text).unwrap().data().len(), bits, "{}", text);
        }
        let segment = Segment::make_numeric("01234567").unwrap();
        assert_eq!(segment.data().extract_bits(0, 10), 12);
        assert_eq!(segment.data().extract_bits(10, 10), 345);
        assert_eq!(segment.data().extract_bits(20, 7), 67);
    }

    #[test]
    fn alphanumeric() {
        let text = "$%*+-./ 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let segments = Segment::make_segments(text).unwrap();
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert_eq!(segment.mode(), EncodingMode::Alphanumeric);
        assert_eq!(segment.num_chars(), 44);
        assert_eq!(segment.data().len(), 242);
        assert_eq!(
            segment.data().to_bytes(),
            [
                212, 252, 15, 175, 251, 48, 2, 23, 69, 201, 21, 46, 39, 53, 20, 168, 85, 194, 207,
                92, 203, 245, 138, 50, 182, 132, 214, 91, 131, 135, 64
            ]
        );
    }

    #[test]
    fn alphanumeric_pairs() {
        let segment = Segment::make_alphanumeric("HELLO WORLD").unwrap();
        assert_eq!(segment.data().len(), 11 * 5 + 6);
        // "HE" = 17 * 45 + 14
        assert_eq!(segment.data().extract_bits(0, 11), 779);
        // trailing "D"
        assert_eq!(segment.data().extract_bits(55, 6), 13);
    }

    #[test]
    fn utf8() {
        let text = "😐ö€";
        let segments = Segment::make_segments(text).unwrap();
        let segment = &segments[0];
        assert_eq!(segment.mode(), EncodingMode::Byte);
        assert_eq!(segment.num_chars(), 9);
        assert_eq!(segment.data().len(), 72);
        assert_eq!(
            segment.data().to_bytes(),
            [240, 159, 152, 144, 195, 182, 226, 130, 172]
        );
    }

    #[test]
    fn lowercase_falls_back_to_bytes() {
        let segments = Segment::make_segments("Hello, world!").unwrap();
        assert_eq!(segments[0].mode(), EncodingMode::Byte);
        assert_eq!(segments[0].num_chars(), 13);
    }

    #[test]
    fn empty_text() {
        assert_eq!(
            Segment::make_segments(""),
            Err(Error::InvalidArgument("text must not be empty"))
        );
        assert!(Segment::make_segments(" \t\n").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(Segment::make_numeric("12a").is_err());
        assert!(Segment::make_alphanumeric("abc").is_err());
        assert!(Segment::make_numeric("").unwrap().data().is_empty());
        assert!(Segment::make_bytes(&[]).data().is_empty());
    }

    #[test]
    fn character_count_bits() {
        let v9 = Version::new(9).unwrap();
        let v10 = Version::new(10).unwrap();
        let v26 = Version::new(26).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(EncodingMode::Numeric.character_count_bits(v9), 10);
        assert_eq!(EncodingMode::Numeric.character_count_bits(v10), 12);
        assert_eq!(EncodingMode::Alphanumeric.character_count_bits(v26), 11);
        assert_eq!(EncodingMode::Alphanumeric.character_count_bits(v27), 13);
        assert_eq!(EncodingMode::Byte.character_count_bits(Version::MIN), 8);
        assert_eq!(EncodingMode::Byte.character_count_bits(Version::MAX), 16);
        assert_eq!(EncodingMode::Kanji.character_count_bits(v10), 10);
        assert_eq!(EncodingMode::Eci.character_count_bits(Version::MAX), 0);
    }

    #[test]
    fn total_bits() {
        let segments = Segment::make_segments("HELLO WORLD").unwrap();
        assert_eq!(Segment::total_bits(&segments, Version::MIN), Some(4 + 9 + 61));

        // 256 bytes overflow the 8-bit count field of versions 1-9
        let segments = [Segment::make_bytes(&[0; 256])];
        assert_eq!(Segment::total_bits(&segments, Version::new(9).unwrap()), None);
        assert_eq!(
            Segment::total_bits(&segments, Version::new(10).unwrap()),
            Some(4 + 16 + 2048)
        );
    }
}
