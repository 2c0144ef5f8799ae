use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    const fn delta(self) -> Coord2 {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

/// What the input layer hands to the engine, already decoded from raw buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Reveal,
    ToggleFlag,
    NewGame { mines: CellCount },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Cursor(MarkOutcome),
    Reveal(RevealOutcome),
    Flag(MarkOutcome),
    NewGame,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Cursor(outcome) | Self::Flag(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
            Self::NewGame => true,
        }
    }
}

impl Board {
    /// Moves the cursor one step, stopping at the edges.
    pub fn move_cursor(&mut self, direction: Direction) -> MarkOutcome {
        let (x, y) = self.cursor();
        let (dx, dy) = direction.delta();
        let target = (x.saturating_add(dx), y.saturating_add(dy));

        if self.is_position_valid(target.0, target.1) {
            self.set_cursor_position(target.0, target.1);
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        }
    }

    /// Reveals under the cursor and classifies the result for the caller's state machine.
    pub fn reveal_at_cursor(&mut self) -> RevealOutcome {
        let (x, y) = self.cursor();
        if !self.cell_value(x, y).is_hidden() {
            return RevealOutcome::NoChange;
        }

        if self.uncover_cells(x, y) {
            RevealOutcome::HitMine
        } else if self.is_won() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn toggle_flag_at_cursor(&mut self) -> MarkOutcome {
        let (x, y) = self.cursor();
        if !self.cell_value(x, y).is_hidden() {
            return MarkOutcome::NoChange;
        }

        self.toggle_flag(x, y);
        MarkOutcome::Changed
    }

    /// Advances the seed so every new round gets a fresh layout, then builds it.
    pub fn new_game(&mut self, mines: CellCount) {
        self.increment_seed();
        self.create_level(mines);
    }

    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        log::trace!("Applying {:?}", action);
        match action {
            Action::Move(direction) => ActionOutcome::Cursor(self.move_cursor(direction)),
            Action::Reveal => ActionOutcome::Reveal(self.reveal_at_cursor()),
            Action::ToggleFlag => ActionOutcome::Flag(self.toggle_flag_at_cursor()),
            Action::NewGame { mines } => {
                self.new_game(mines);
                ActionOutcome::NewGame
            }
        }
    }
}
