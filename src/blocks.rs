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
use crate::encoding::Segment;
use crate::error::{Error, Result};
use crate::error_correction::{ErrorCorrectionLevel, ReedSolomonGenerator};
use crate::qr_version::Version;
use alloc::vec::Vec;

/// Concatenates the segments into the data codewords of a symbol: headers,
/// payloads, terminator and padding.
///
/// The segments must fit, as checked by [`crate::capacity::find_version`].
pub fn encode_data_codewords(
    segments: Vec<Segment>,
    version: Version,
    error_correction: ErrorCorrectionLevel,
) -> Vec<u8> {
    let capacity_bits = version.data_codeword_bit_len(error_correction);

    let mut buffer = BitBuffer::new();
    for segment in segments {
        let (mode, num_chars, data) = segment.into_parts();
        buffer.append_bits(mode.mode_bits(), 4);
        buffer.append_bits(num_chars as u32, mode.character_count_bits(version));
        buffer.append(data);
    }
    debug_assert!(buffer.len() <= capacity_bits);

    // Terminator, clipped to the remaining capacity, then byte alignment
    let terminator = usize::min(4, capacity_bits - buffer.len());
    buffer.append_bits(0, terminator);
    buffer.append_bits(0, (8 - buffer.len() % 8) % 8);
    debug_assert_eq!(buffer.len() % 8, 0);

    let mut codewords = buffer.to_bytes();
    let pad_bytes = [0xec, 0x11].iter().copied().cycle();
    let missing = capacity_bits / 8 - codewords.len();
    codewords.extend(pad_bytes.take(missing));
    codewords
}

/// Splits the data codewords into blocks, appends the error correction
/// codewords of every block and interleaves the result into the order in
/// which the codewords are placed in the symbol.
pub fn add_ecc_and_interleave(
    data: &[u8],
    version: Version,
    error_correction: ErrorCorrectionLevel,
) -> Result<Vec<u8>> {
    if data.len() != version.data_codeword_count(error_correction) {
        return Err(Error::InvalidArgument(
            "data length does not match version and error correction level",
        ));
    }

    let generator =
        ReedSolomonGenerator::new(version.error_correction_codewords_per_block(error_correction))?;
    let blocks: Vec<(&[u8], Vec<u8>)> = BlockLengthIterator::new(version, error_correction)
        .map(|block| {
            debug_assert_eq!(block.ecc_len, generator.degree());
            let block_data = &data[block.data_pos..block.data_pos + block.data_len];
            (block_data, generator.remainder(block_data))
        })
        .collect();

    // Data codewords column by column; short blocks drop out of the last column
    let longest = blocks.iter().map(|(data, _)| data.len()).max().unwrap_or(0);
    let mut result = Vec::with_capacity(version.total_codeword_count());
    for offset in 0..longest {
        result.extend(blocks.iter().filter_map(|(data, _)| data.get(offset)));
    }
    for offset in 0..generator.degree() {
        result.extend(blocks.iter().map(|(_, ecc)| ecc[offset]));
    }
    debug_assert_eq!(result.len(), version.total_codeword_count());
    Ok(result)
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub struct BlockLength {
    pub block_number: usize,
    pub data_pos: usize,
    pub data_len: usize,
    pub ecc_len: usize,
}

/// Layout of the blocks of a version and error correction level. The first
/// `short_block_count` blocks hold one data codeword less than the others.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub struct BlockLengthIterator {
    block_count: usize,
    short_block_count: usize,
    short_data_len: usize,
    ecc_len: usize,
    last: Option<BlockLength>,
}

impl BlockLengthIterator {
    pub fn new(version: Version, error_correction: ErrorCorrectionLevel) -> BlockLengthIterator {
        let block_count = version.error_correction_block_count(error_correction);
        let ecc_len = version.error_correction_codewords_per_block(error_correction);
        let total = version.total_codeword_count();
        BlockLengthIterator {
            block_count,
            short_block_count: block_count - total % block_count,
            short_data_len: total / block_count - ecc_len,
            ecc_len,
            last: None,
        }
    }
}

impl Iterator for BlockLengthIterator {
    type Item = BlockLength;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.last {
            None => BlockLength {
                block_number: 0,
                data_pos: 0,
                data_len: self.short_data_len,
                ecc_len: self.ecc_len,
            },
            Some(last) if last.block_number + 1 < self.block_count => {
                let block_number = last.block_number + 1;
                BlockLength {
                    block_number,
                    data_pos: last.data_pos + last.data_len,
                    data_len: self.short_data_len
                        + usize::from(block_number >= self.short_block_count),
                    ..last
                }
            }
            Some(_) => return None,
        };
        self.last = Some(next);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::{
        add_ecc_and_interleave, encode_data_codewords, BlockLength, BlockLengthIterator,
    };
    use crate::encoding::Segment;
    use crate::error_correction::ErrorCorrectionLevel;
    use crate::qr_version::Version;
    use alloc::vec;

    #[test]
    fn numeric_data_codewords() {
        let segments = Segment::make_segments("01234567").unwrap();
        let codewords = encode_data_codewords(segments, Version::MIN, ErrorCorrectionLevel::Medium);
        assert_eq!(
            codewords,
            [
                0b00010000, 0b00100000, 0b00001100, 0b01010110, 0b01100001, 0b10000000, 0b11101100,
                0b00010001, 0b11101100, 0b00010001, 0b11101100, 0b00010001, 0b11101100, 0b00010001,
                0b11101100, 0b00010001
            ]
        )
    }

    #[test]
    fn alphanumeric_data_codewords() {
        let segments = Segment::make_segments("HELLO WORLD").unwrap();
        let codewords =
            encode_data_codewords(segments, Version::MIN, ErrorCorrectionLevel::Quartile);
        assert_eq!(
            codewords,
            [
                0b00100000, 0b01011011, 0b00001011, 0b01111000, 0b11010001, 0b01110010, 0b11011100,
                0b01001101, 0b01000011, 0b01000000, 0b11101100, 0b00010001, 0b11101100
            ]
        )
    }

    #[test]
    fn terminator_is_clipped() {
        // 4 + 8 + 8 * 17 = 148 bits leave room for a 4 bit terminator in 1-L (152 bits)
        let segments = vec![Segment::make_bytes(&[0xff; 17])];
        let codewords = encode_data_codewords(segments, Version::MIN, ErrorCorrectionLevel::Low);
        assert_eq!(codewords.len(), 19);
        assert_eq!(codewords[18], 0xf0);

        // 4 + 10 + 9 * 10 = 104 bits fill 1-Q exactly, leaving no room for a terminator
        let segments = vec![Segment::make_numeric(&"1".repeat(27)).unwrap()];
        let codewords =
            encode_data_codewords(segments, Version::MIN, ErrorCorrectionLevel::Quartile);
        assert_eq!(codewords.len(), 13);
    }

    #[test]
    fn padded_length_matches_capacity() {
        for version in (1..=40).map(|v| Version::new(v).unwrap()) {
            for level in ErrorCorrectionLevel::ALL {
                let segments = vec![Segment::make_bytes(b"qr")];
                let data = encode_data_codewords(segments, version, level);
                assert_eq!(data.len(), version.data_codeword_count(level));
                assert!(data.len() * 8 <= version.raw_data_module_count());

                let all = add_ecc_and_interleave(&data, version, level).unwrap();
                assert_eq!(all.len(), version.total_codeword_count());
            }
        }
    }

    #[test]
    fn wrong_data_length() {
        let result = add_ecc_and_interleave(&[0; 5], Version::MIN, ErrorCorrectionLevel::Low);
        assert!(result.is_err());
    }

    #[test]
    fn block_len_iter_5q() {
        let mut iter =
            BlockLengthIterator::new(Version { version: 5 }, ErrorCorrectionLevel::Quartile);
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 0,
                data_pos: 0,
                data_len: 15,
                ecc_len: 18
            })
        );
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 1,
                data_pos: 15,
                data_len: 15,
                ecc_len: 18
            })
        );
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 2,
                data_pos: 30,
                data_len: 16,
                ecc_len: 18
            })
        );
        assert_eq!(
            iter.next(),
            Some(BlockLength {
                block_number: 3,
                data_pos: 46,
                data_len: 16,
                ecc_len: 18
            })
        );
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn interleave_5q() {
        let data = [
            67, 85, 70, 134, 87, 38, 85, 194, 119, 50, 6, 18, 6, 103, 38, 246, 246, 66, 7, 118,
            134, 242, 7, 38, 86, 22, 198, 199, 146, 6, 182, 230, 247, 119, 50, 7, 118, 134, 87, 38,
            82, 6, 134, 151, 50, 7, 70, 247, 118, 86, 194, 6, 151, 50, 16, 236, 17, 236, 17, 236,
            17, 236,
        ];

        let interleaved =
            add_ecc_and_interleave(&data, Version { version: 5 }, ErrorCorrectionLevel::Quartile)
                .unwrap();

        assert_eq!(
            interleaved,
            [
                67, 246, 182, 70, 85, 246, 230, 247, 70, 66, 247, 118, 134, 7, 119, 86, 87, 118,
                50, 194, 38, 134, 7, 6, 85, 242, 118, 151, 194, 7, 134, 50, 119, 38, 87, 16, 50,
                86, 38, 236, 6, 22, 82, 17, 18, 198, 6, 236, 6, 199, 134, 17, 103, 146, 151, 236,
                38, 6, 50, 17, 7, 236, 213, 87, 148, 235, 199, 204, 116, 159, 11, 96, 177, 5, 45,
                60, 212, 173, 115, 202, 76, 24, 247, 182, 133, 147, 241, 124, 75, 59, 223, 157,
                242, 33, 229, 200, 238, 106, 248, 134, 76, 40, 154, 27, 195, 255, 117, 129, 230,
                172, 154, 209, 189, 82, 111, 17, 10, 2, 86, 163, 108, 131, 161, 163, 240, 32, 111,
                120, 192, 178, 39, 133, 141, 236,
            ]
        );
    }

    #[test]
    fn hello_world_1q() {
        let segments = Segment::make_segments("HELLO WORLD").unwrap();
        let data = encode_data_codewords(segments, Version::MIN, ErrorCorrectionLevel::Quartile);
        let all = add_ecc_and_interleave(&data, Version::MIN, ErrorCorrectionLevel::Quartile)
            .unwrap();
        assert_eq!(
            all,
            [
                32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 168, 72, 22, 82, 217, 54,
                156, 0, 46, 15, 180, 122, 16
            ]
        );
    }
}
