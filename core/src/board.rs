use core::fmt;
use core::num::Saturating;
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// The whole game state: a fixed grid of packed [`Cell`]s plus the round counters.
///
/// The buffer is allocated once in [`Board::new`]; starting a new round refills it in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Cell>,
    width: Coord,
    height: Coord,
    mine_count: CellCount,
    clicks_count: Saturating<CellCount>,
    cursor: Coord2,
    seed: u64,
}

/// Unchecked wire form of a [`Board`]; only becomes one through [`TryFrom`].
#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Cell>,
    width: Coord,
    height: Coord,
    mine_count: CellCount,
    clicks_count: Saturating<CellCount>,
    cursor: Coord2,
    seed: u64,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let board = Self::new(raw.width, raw.height)?;
        if raw.cells.dim() != board.cells.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        if !board.is_position_valid(raw.cursor.0, raw.cursor.1) {
            return Err(GameError::InvalidCoords);
        }
        if raw.mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }

        Ok(Self {
            cells: raw.cells,
            mine_count: raw.mine_count,
            clicks_count: raw.clicks_count,
            cursor: raw.cursor,
            seed: raw.seed,
            ..board
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new_unchecked(MAX_COLS, MAX_ROWS)
    }
}

impl Board {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if !(1..=MAX_COLS).contains(&width) || !(1..=MAX_ROWS).contains(&height) {
            return Err(GameError::InvalidSize);
        }
        Ok(Self::new_unchecked(width, height))
    }

    fn new_unchecked(width: Coord, height: Coord) -> Self {
        Self {
            cells: Array2::from_elem((height as usize, width as usize), Cell::empty()),
            width,
            height,
            mine_count: 0,
            clicks_count: Saturating(0),
            cursor: (width / 2, height / 2),
            seed: 0,
        }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Number of reveal actions the player made this round.
    pub fn clicks_count(&self) -> CellCount {
        self.clicks_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells_with_attribute(Cell::FLAG)
    }

    pub fn hidden_count(&self) -> CellCount {
        self.count_cells_with_attribute(Cell::HIDDEN)
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Hosts without real entropy bump the seed between rounds to vary the layout.
    pub fn increment_seed(&mut self) {
        self.seed = self.seed.wrapping_add(1);
    }

    /// Row-major view of the raw cells, `[y, x]`.
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    pub fn is_position_valid(&self, x: Coord, y: Coord) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Border-safe read: anything off the board is an empty, revealed, mine-free cell.
    pub fn cell_value(&self, x: Coord, y: Coord) -> Cell {
        if self.is_position_valid(x, y) {
            self.cells[(x, y).to_nd_index()]
        } else {
            Cell::empty()
        }
    }

    /// Border-safe write: anything off the board is silently dropped.
    pub fn set_cell_value(&mut self, x: Coord, y: Coord, value: Cell) {
        if self.is_position_valid(x, y) {
            self.cells[(x, y).to_nd_index()] = value;
        }
    }

    /// Starts a new round with `mines` mines, laid out by the stored seed.
    ///
    /// Replaying the same seed reproduces the same layout.
    pub fn create_level(&mut self, mines: CellCount) {
        let mut source = SeededSource::new(self.seed);
        self.create_level_with(mines, &mut source);
    }

    /// Starts a new round, drawing mine positions from `source`.
    ///
    /// Positions already holding a mine are drawn again. A request that would fill the whole board is
    /// clamped to leave one safe cell.
    pub fn create_level_with(&mut self, mines: CellCount, mut source: impl PositionSource) {
        let total_cells = self.total_cells();
        let mines = if mines >= total_cells {
            log::warn!(
                "Requested {} mines but the board only has {} cells, placing {}",
                mines,
                total_cells,
                total_cells - 1
            );
            total_cells - 1
        } else {
            mines
        };

        self.clear_level();

        let mut placed = 0;
        while placed < mines {
            let (x, y) = self.position_at(source.next_position(total_cells) % total_cells);
            if self.cell_value(x, y) != Cell::empty() {
                continue;
            }
            self.set_cell_value(x, y, Cell::MINE);
            placed += 1;
        }
        self.mine_count = mines;

        self.finish_level();
    }

    /// Starts a new round with mines at exactly the given positions. Duplicates count once.
    pub fn create_level_from_mines(&mut self, mines: &[Coord2]) -> Result<()> {
        if mines.iter().any(|&(x, y)| !self.is_position_valid(x, y)) {
            return Err(GameError::InvalidCoords);
        }
        let distinct = mines
            .iter()
            .enumerate()
            .filter(|&(i, pos)| !mines[..i].contains(pos))
            .count();
        if distinct >= usize::from(self.total_cells()) {
            return Err(GameError::TooManyMines);
        }

        self.clear_level();
        for &(x, y) in mines {
            self.set_cell_value(x, y, Cell::MINE);
        }
        self.mine_count = self.count_cells_with_attribute(Cell::MINE);

        self.finish_level();
        Ok(())
    }

    /// Reveals the cell at `(x, y)` and spreads over every connected blank region.
    ///
    /// Returns `true` if the revealed cell holds a mine. Cells already revealed and positions off the
    /// board are no-ops and do not count as a click.
    pub fn uncover_cells(&mut self, x: Coord, y: Coord) -> bool {
        let cell = self.cell_value(x, y);
        if !cell.is_hidden() {
            return false;
        }

        self.clicks_count += 1;
        let cell = cell.difference(Cell::HIDDEN | Cell::FLAG);
        self.set_cell_value(x, y, cell);

        if cell.is_mine() {
            log::debug!("Mine hit at ({}, {})", x, y);
            return true;
        }

        self.flood_fill();
        false
    }

    /// Reveals every cell that shares a bit with `mask`. [`Cell::all`] reveals the whole board.
    pub fn uncover_all(&mut self, mask: Cell) {
        self.cells.map_inplace(|cell| {
            if cell.intersects(mask) {
                cell.remove(Cell::HIDDEN | Cell::FLAG);
            }
        });
    }

    /// Flips the player flag on a hidden cell. Revealed cells are left alone.
    pub fn toggle_flag(&mut self, x: Coord, y: Coord) {
        let cell = self.cell_value(x, y);
        if cell.is_hidden() {
            self.set_cell_value(x, y, cell ^ Cell::FLAG);
        }
    }

    /// Won once no more cells are hidden than there are mines.
    ///
    /// `<=` rather than `==` keeps the predicate true when some mines were revealed and play went on.
    pub fn is_won(&self) -> bool {
        self.hidden_count() <= self.mine_count
    }

    /// Moves the cursor marker to `(x, y)`. An off-board target leaves no cell marked.
    pub fn set_cursor_position(&mut self, x: Coord, y: Coord) {
        self.cells.map_inplace(|cell| cell.remove(Cell::CURSOR));

        if self.is_position_valid(x, y) {
            self.cursor = (x, y);
            self.cells[(x, y).to_nd_index()].insert(Cell::CURSOR);
        }
    }

    /// Number of cells sharing at least one bit with `mask`.
    pub fn count_cells_with_attribute(&self, mask: Cell) -> CellCount {
        let count = self.cells.iter().filter(|cell| cell.intersects(mask)).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    pub fn status(&self) -> BoardStatus {
        BoardStatus {
            size: self.size(),
            mines: self.mine_count,
            flags: self.flagged_count(),
            hidden: self.hidden_count(),
            clicks: self.clicks_count(),
            cursor: self.cursor,
            seed: self.seed,
        }
    }

    /// Dumps counters at `debug` and raw cell bytes at `trace`.
    pub fn log_state(&self) {
        log::debug!("{}", self.status());
        for (y, row) in self.cells.rows().into_iter().enumerate() {
            log::trace!("row {}: {}", y, HexRow(row));
        }
    }

    fn clear_level(&mut self) {
        self.cells.fill(Cell::empty());
        self.mine_count = 0;
        self.clicks_count = Saturating(0);
    }

    /// Writes neighbor counts, hides everything and centers the cursor.
    fn finish_level(&mut self) {
        for (x, y) in positions(self.size()) {
            let cell = self.cell_value(x, y);
            if !cell.is_mine() {
                let count = self.count_neighbors(x, y);
                self.set_cell_value(x, y, cell.with_neighbor_count(count));
            }
        }

        self.cells.map_inplace(|cell| cell.insert(Cell::HIDDEN));
        self.set_cursor_position(self.width / 2, self.height / 2);

        log::debug!(
            "Created {}x{} level with {} mines, seed {}",
            self.width,
            self.height,
            self.mine_count,
            self.seed
        );
    }

    /// Repeats full-board passes, opening hidden safe cells around revealed blank ones, until a pass
    /// changes nothing. Needs no stack or queue; the worst case is one pass per cell.
    fn flood_fill(&mut self) {
        let mut passes = 0_u32;
        loop {
            passes += 1;
            let mut changed = false;

            for (x, y) in positions(self.size()) {
                if !self.cell_value(x, y).is_blank() {
                    continue;
                }
                for (nx, ny) in Neighborhood::new((x, y)) {
                    let neighbor = self.cell_value(nx, ny);
                    if neighbor.is_hidden() && !neighbor.is_mine() {
                        self.set_cell_value(nx, ny, neighbor.difference(Cell::HIDDEN | Cell::FLAG));
                        changed = true;
                    }
                }
            }

            if !changed {
                break;
            }
        }
        log::trace!("Flood fill settled after {} passes", passes);
    }

    /// Mines in the 3x3 block around `(x, y)`. Only used while building a level.
    fn count_neighbors(&self, x: Coord, y: Coord) -> u8 {
        Neighborhood::new((x, y))
            .filter(|&(nx, ny)| self.cell_value(nx, ny).is_mine())
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    fn position_at(&self, index: CellCount) -> Coord2 {
        let width = self.width as CellCount;
        ((index % width) as Coord, (index / width) as Coord)
    }
}

/// Every position of a board of `size`, row by row.
fn positions((width, height): Coord2) -> impl Iterator<Item = Coord2> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

/// Round counters, as shown by the diagnostics dump.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStatus {
    pub size: Coord2,
    pub mines: CellCount,
    pub flags: CellCount,
    pub hidden: CellCount,
    pub clicks: CellCount,
    pub cursor: Coord2,
    pub seed: u64,
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} mines={} flags={} hidden={} clicks={} cursor=({}, {}) seed={}",
            self.size.0,
            self.size.1,
            self.mines,
            self.flags,
            self.hidden,
            self.clicks,
            self.cursor.0,
            self.cursor.1,
            self.seed
        )
    }
}

struct HexRow<'a>(ArrayView1<'a, Cell>);

impl fmt::Display for HexRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", cell.bits())?;
        }
        Ok(())
    }
}

/// Status line followed by one line of hex cell bytes per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status())?;
        for row in self.cells.rows() {
            writeln!(f, "{}", HexRow(row))?;
        }
        Ok(())
    }
}
