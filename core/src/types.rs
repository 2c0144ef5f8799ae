/// Single coordinate axis used for positions. Signed so that off-board neighbors (`-1`) can be named.
pub type Coord = i8;

/// Count type used for mine counts, click counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Widest board the buffer is ever built for.
pub const MAX_COLS: Coord = 12;

/// Tallest board the buffer is ever built for.
pub const MAX_ROWS: Coord = 8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Row-major: the first axis is `y`. Callers must have checked the bounds.
    fn to_nd_index(self) -> Self::Output {
        [self.1 as usize, self.0 as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// The 3x3 block centered on a cell, the center included.
const NEIGHBORHOOD: [(Coord, Coord); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the 3x3 block around a center without clipping to any board.
///
/// Positions past the edges are yielded as-is; the board's border-safe accessors
/// read them as empty.
#[derive(Debug)]
pub struct Neighborhood {
    center: Coord2,
    index: u8,
}

impl Neighborhood {
    pub fn new(center: Coord2) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for Neighborhood {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let &(dx, dy) = NEIGHBORHOOD.get(usize::from(self.index))?;
        self.index += 1;
        let (x, y) = self.center;
        Some((x.saturating_add(dx), y.saturating_add(dy)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = NEIGHBORHOOD.len() - usize::from(self.index);
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighborhood_includes_center_and_off_board_positions() {
        let cells: Vec<_> = Neighborhood::new((0, 0)).collect();

        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&(0, 0)));
        assert!(cells.contains(&(-1, -1)));
        assert!(cells.contains(&(1, 1)));
    }

    #[test]
    fn nd_index_is_row_major() {
        assert_eq!((3, 1).to_nd_index(), [1, 3]);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(MAX_COLS, MAX_ROWS), 96);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 127 * 127);
    }
}
