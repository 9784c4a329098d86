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

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Position of a module; `x` counts columns from the left, `y` counts rows
/// from the top.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Coordinate {
        Coordinate { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(pos: (usize, usize)) -> Self {
        let (x, y) = pos;
        Coordinate::new(x, y)
    }
}

/// Square grid, stored row by row.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Array2D<T> {
    data: Vec<T>,
    size: usize,
}

impl<T> Index<Coordinate> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Coordinate) -> &Self::Output {
        debug_assert!(index.x < self.size && index.y < self.size);
        &self.data[index.y * self.size + index.x]
    }
}

impl<T> IndexMut<Coordinate> for Array2D<T> {
    fn index_mut(&mut self, index: Coordinate) -> &mut Self::Output {
        debug_assert!(index.x < self.size && index.y < self.size);
        &mut self.data[index.y * self.size + index.x]
    }
}

impl<T> Array2D<T>
where
    T: Default + Clone,
{
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![T::default(); size * size],
            size,
        }
    }
}

impl<T> Array2D<T> {
    /// Number of rows, which equals the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, pos: Coordinate) -> Option<&T> {
        if pos.x < self.size && pos.y < self.size {
            Some(&self[pos])
        } else {
            None
        }
    }

    /// All cells, row by row.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[cfg(test)]
    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Converts every cell, keeping the layout.
    pub fn map<U, F>(&self, f: F) -> Array2D<U>
    where
        F: FnMut(&T) -> U,
    {
        Array2D {
            data: self.data.iter().map(f).collect(),
            size: self.size,
        }
    }

    pub fn rows(&self) -> Rows<'_, T> {
        Rows { data: self, y: 0 }
    }

    pub fn columns(&self) -> Columns<'_, T> {
        Columns { data: self, x: 0 }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Rows<'a, T> {
    data: &'a Array2D<T>,
    y: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = Line<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y < self.data.size {
            let result = Line {
                data: self.data,
                start: Coordinate::new(0, self.y),
                horizontal: true,
                index: 0,
            };
            self.y += 1;
            Some(result)
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Columns<'a, T> {
    data: &'a Array2D<T>,
    x: usize,
}

impl<'a, T> Iterator for Columns<'a, T> {
    type Item = Line<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.x < self.data.size {
            let result = Line {
                data: self.data,
                start: Coordinate::new(self.x, 0),
                horizontal: false,
                index: 0,
            };
            self.x += 1;
            Some(result)
        } else {
            None
        }
    }
}

/// A single row or column.
#[derive(Copy, Clone, Debug)]
pub struct Line<'a, T> {
    data: &'a Array2D<T>,
    start: Coordinate,
    horizontal: bool,
    index: usize,
}

impl<'a, T> Iterator for Line<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.data.size {
            let pos = if self.horizontal {
                Coordinate::new(self.index, self.start.y)
            } else {
                Coordinate::new(self.start.x, self.index)
            };
            self.index += 1;
            Some(&self.data[pos])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::array_2d::{Array2D, Coordinate};
    use alloc::vec::Vec;

    fn numbered(size: usize) -> Array2D<usize> {
        let mut array = Array2D::new(size);
        for y in 0..size {
            for x in 0..size {
                array[(x, y).into()] = y * 10 + x;
            }
        }
        array
    }

    #[test]
    fn rows_and_columns() {
        let array = numbered(3);
        let rows: Vec<Vec<usize>> = array.rows().map(|row| row.copied().collect()).collect();
        assert_eq!(rows, [[0, 1, 2], [10, 11, 12], [20, 21, 22]]);

        let columns: Vec<Vec<usize>> = array
            .columns()
            .map(|column| column.copied().collect())
            .collect();
        assert_eq!(columns, [[0, 10, 20], [1, 11, 21], [2, 12, 22]]);
    }

    #[test]
    fn bounds() {
        let array = numbered(2);
        assert_eq!(array.get(Coordinate::new(1, 1)), Some(&11));
        assert_eq!(array.get(Coordinate::new(2, 0)), None);
        assert_eq!(array.get(Coordinate::new(0, 2)), None);
        assert_eq!(array.iter().count(), 4);
        assert_eq!(array.map(|&value| value * 2)[Coordinate::new(1, 0)], 2);
    }
}
