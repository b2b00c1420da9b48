// cell.rs - Lattice coordinates and stored edge directions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis direction of a stored edge bit.
///
/// Edges are recorded once per cell pair. X and Y edges live on the lower cell
/// and point in the positive direction; Z edges live on the upper cell and point
/// down, so every level carries the shafts into the level below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    XPositive,
    YPositive,
    ZNegative,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::XPositive, Direction::YPositive, Direction::ZNegative];

    /// Bit position inside a cell's adjacency record.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::XPositive => 0,
            Direction::YPositive => 1,
            Direction::ZNegative => 2,
        }
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Offset from the storing cell to the cell the bit points at.
    #[inline]
    pub const fn delta(self) -> [i64; 3] {
        match self {
            Direction::XPositive => [1, 0, 0],
            Direction::YPositive => [0, 1, 0],
            Direction::ZNegative => [0, 0, -1],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::XPositive => "x+",
            Direction::YPositive => "y+",
            Direction::ZNegative => "z-",
        };
        f.write_str(name)
    }
}

/// One lattice coordinate. Plain value, carries no reference to adjacency.
///
/// Equality is only defined against other cells, so comparing a cell to an
/// unrelated type does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Cell {
    #[inline]
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// True when every coordinate lies in `[0, size)`.
    #[inline]
    pub fn is_valid(&self, size: usize) -> bool {
        self.i < size && self.j < size && self.k < size
    }

    /// Shift by a signed delta. `None` when a coordinate would go negative.
    pub fn offset(&self, delta: [i64; 3]) -> Option<Cell> {
        Some(Cell {
            i: self.i.checked_add_signed(delta[0] as isize)?,
            j: self.j.checked_add_signed(delta[1] as isize)?,
            k: self.k.checked_add_signed(delta[2] as isize)?,
        })
    }

    /// L1 distance; lattice-adjacent cells are exactly 1 apart.
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j) + self.k.abs_diff(other.k)
    }

    /// The up-to-6 axis neighbours inside a lattice of `size`, ignoring connectivity.
    /// Order is +x, +y, +z, -x, -y, -z.
    pub fn close_nodes(&self, size: usize) -> Vec<Cell> {
        const OFFSETS: [[i64; 3]; 6] = [
            [1, 0, 0],
            [0, 1, 0],
            [0, 0, 1],
            [-1, 0, 0],
            [0, -1, 0],
            [0, 0, -1],
        ];

        OFFSETS
            .iter()
            .filter_map(|&delta| self.offset(delta))
            .filter(|cell| cell.is_valid(size))
            .collect()
    }
}

impl From<(usize, usize, usize)> for Cell {
    #[inline]
    fn from((i, j, k): (usize, usize, usize)) -> Self {
        Cell::new(i, j, k)
    }
}

impl From<Cell> for [usize; 3] {
    #[inline]
    fn from(c: Cell) -> [usize; 3] {
        [c.i, c.j, c.k]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(Cell::new(0, 0, 0).is_valid(1));
        assert!(Cell::new(3, 3, 3).is_valid(4));
        assert!(!Cell::new(4, 0, 0).is_valid(4));
        assert!(!Cell::new(0, 0, 7).is_valid(4));
    }

    #[test]
    fn test_close_nodes_corner_and_interior() {
        // Corner cell only has the three inward neighbours
        let corner = Cell::new(0, 0, 0).close_nodes(3);
        assert_eq!(corner, vec![Cell::new(1, 0, 0), Cell::new(0, 1, 0), Cell::new(0, 0, 1)]);

        let interior = Cell::new(1, 1, 1).close_nodes(3);
        assert_eq!(interior.len(), 6);
        assert!(interior.iter().all(|c| c.manhattan(&Cell::new(1, 1, 1)) == 1));

        // Far corner
        let far = Cell::new(2, 2, 2).close_nodes(3);
        assert_eq!(far, vec![Cell::new(1, 2, 2), Cell::new(2, 1, 2), Cell::new(2, 2, 1)]);
    }

    #[test]
    fn test_offset_underflow() {
        assert_eq!(Cell::new(0, 1, 1).offset([-1, 0, 0]), None);
        assert_eq!(Cell::new(1, 1, 1).offset([0, 0, -1]), Some(Cell::new(1, 1, 0)));
    }

    #[test]
    fn test_direction_bits_are_distinct() {
        let mask = Direction::ALL.iter().fold(0u8, |acc, d| {
            assert_eq!(acc & d.bit(), 0);
            acc | d.bit()
        });
        assert_eq!(mask, 0b111);
    }
}
