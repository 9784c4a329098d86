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

use alloc::vec::Vec;
use bitvec::prelude::*;

/// Append-only sequence of bits, stored most significant bit first.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct BitBuffer {
    bits: BitVec<u8, Msb0>,
}

impl BitBuffer {
    /// Creates a new empty buffer
    ///
    /// # Example
    ///```
    ///     use qr_symbol::buffer::BitBuffer;
    ///     let buffer = BitBuffer::new();
    ///     assert!(buffer.is_empty());
    ///     assert_eq!(buffer.to_bytes(), []);
    ///```
    pub fn new() -> BitBuffer {
        BitBuffer { bits: BitVec::new() }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at `index`.
    ///
    /// Panics when `index` is out of range, like slice indexing.
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Adds the `len` low bits of `value`, most significant first.
    ///
    /// # Example
    ///```
    ///     use qr_symbol::buffer::BitBuffer;
    ///     let mut buffer = BitBuffer::new();
    ///     buffer.append_bits(3, 4);
    ///     buffer.append_bits(0b111100, 6);
    ///     buffer.append_bits(2, 2);
    ///     assert_eq!(buffer.len(), 12);
    ///     assert_eq!(buffer.to_bytes(), [0b0011_1111, 0b0010_0000]);
    ///```
    pub fn append_bits(&mut self, value: u32, len: usize) {
        debug_assert!(len <= 31 && value >> len == 0, "value does not fit in {} bits", len);
        self.bits.reserve(len);
        for index in (0..len).rev() {
            self.bits.push((value >> index) & 1 != 0);
        }
    }

    /// Moves all bits of `other` to the end of this buffer.
    pub fn append(&mut self, other: BitBuffer) {
        self.bits.extend_from_bitslice(&other.bits);
    }

    /// Reads `len` bits starting at `index`; the first bit becomes the most
    /// significant bit of the result.
    ///
    /// # Example
    ///```
    ///     use qr_symbol::buffer::BitBuffer;
    ///     let mut buffer = BitBuffer::new();
    ///     buffer.append_bits(0b1011_0110, 8);
    ///     assert_eq!(buffer.extract_bits(2, 4), 0b1101);
    ///```
    pub fn extract_bits(&self, index: usize, len: usize) -> u32 {
        debug_assert!(len <= 31);
        self.bits[index..index + len]
            .iter()
            .by_vals()
            .fold(0, |result, bit| (result << 1) | u32::from(bit))
    }

    /// Packs the bits into bytes, big endian within each byte. A trailing
    /// partial byte is filled up with zero bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .by_vals()
                    .enumerate()
                    .fold(0u8, |byte, (index, bit)| byte | (u8::from(bit) << (7 - index)))
            })
            .collect()
    }
}
