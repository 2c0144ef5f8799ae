use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// One byte per board position.
    ///
    /// | Bits | Meaning                                         |
    /// |------|-------------------------------------------------|
    /// | 0-3  | neighbor mine count, only meaningful for safe cells |
    /// | 4    | `MINE`: this cell holds a mine                  |
    /// | 5    | `FLAG`: marked by the player                    |
    /// | 6    | `HIDDEN`: not yet revealed                      |
    /// | 7    | `CURSOR`: the cursor sits here                  |
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Cell: u8 {
        const COUNT  = 0b0000_1111;
        const MINE   = 0b0001_0000;
        const FLAG   = 0b0010_0000;
        const HIDDEN = 0b0100_0000;
        const CURSOR = 0b1000_0000;
    }
}

impl Cell {
    /// Everything except the cursor marker.
    pub const DATA: Self = Self::from_bits_retain(0b0111_1111);

    pub const fn neighbor_count(self) -> u8 {
        self.bits() & Self::COUNT.bits()
    }

    /// Replaces bits 0-3, keeping every marker bit.
    pub const fn with_neighbor_count(self, count: u8) -> Self {
        Self::from_bits_retain((self.bits() & !Self::COUNT.bits()) | (count & Self::COUNT.bits()))
    }

    pub const fn is_mine(self) -> bool {
        self.contains(Self::MINE)
    }

    pub const fn is_flagged(self) -> bool {
        self.contains(Self::FLAG)
    }

    pub const fn is_hidden(self) -> bool {
        self.contains(Self::HIDDEN)
    }

    pub const fn has_cursor(self) -> bool {
        self.contains(Self::CURSOR)
    }

    /// A revealed safe cell with no mines around it, which lets the flood fill spread.
    pub const fn is_blank(self) -> bool {
        !self.is_hidden() && !self.is_mine() && self.neighbor_count() == 0
    }

    /// The cell with the cursor marker stripped.
    pub const fn data(self) -> Self {
        self.intersection(Self::DATA)
    }

    pub const fn state(self) -> CellState {
        if self.is_hidden() {
            if self.is_flagged() {
                CellState::Flagged
            } else {
                CellState::Hidden
            }
        } else if self.is_mine() {
            CellState::Mine
        } else {
            CellState::Revealed(self.neighbor_count())
        }
    }
}

/// Player-visible decoding of a [`Cell`], for renderers that would rather match than mask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_matches_device_encoding() {
        assert_eq!(Cell::COUNT.bits(), 0x0f);
        assert_eq!(Cell::MINE.bits(), 0x10);
        assert_eq!(Cell::FLAG.bits(), 0x20);
        assert_eq!(Cell::HIDDEN.bits(), 0x40);
        assert_eq!(Cell::CURSOR.bits(), 0x80);
        assert_eq!(Cell::DATA.bits(), 0x7f);
        assert_eq!(Cell::default(), Cell::empty());
    }

    #[test]
    fn neighbor_count_keeps_marker_bits() {
        let cell = (Cell::HIDDEN | Cell::CURSOR).with_neighbor_count(5);

        assert_eq!(cell.neighbor_count(), 5);
        assert!(cell.is_hidden());
        assert!(cell.has_cursor());
        assert_eq!(cell.with_neighbor_count(2).neighbor_count(), 2);
    }

    #[test]
    fn data_strips_cursor() {
        let cell = Cell::MINE | Cell::HIDDEN | Cell::CURSOR;

        assert_eq!(cell.data(), Cell::MINE | Cell::HIDDEN);
    }

    #[test]
    fn state_decodes_visible_attributes() {
        assert_eq!(Cell::HIDDEN.state(), CellState::Hidden);
        assert_eq!((Cell::HIDDEN | Cell::FLAG | Cell::MINE).state(), CellState::Flagged);
        assert_eq!(Cell::MINE.state(), CellState::Mine);
        assert_eq!(Cell::empty().with_neighbor_count(3).state(), CellState::Revealed(3));
        assert!(CellState::Flagged.is_unrevealed());
        assert!(!CellState::Revealed(0).is_unrevealed());
        assert_eq!(CellState::default(), CellState::Hidden);
    }

    #[test]
    fn only_revealed_safe_zero_cells_are_blank() {
        assert!(Cell::empty().is_blank());
        assert!(Cell::CURSOR.is_blank());
        assert!(!Cell::HIDDEN.is_blank());
        assert!(!Cell::MINE.is_blank());
        assert!(!Cell::empty().with_neighbor_count(1).is_blank());
    }
}
