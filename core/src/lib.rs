//! Board engine for a tiny Minesweeper.
//!
//! The whole game state is a [`Board`] of packed one-byte [`Cell`]s. Rendering, input polling, sound
//! and the intro/play/game-over state machine live in the host; they read cells through
//! [`Board::cell_value`] and drive the engine through [`Action`]s or the individual operations.
#![no_std]

extern crate alloc;

pub use action::*;
pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod action;
mod board;
mod cell;
mod error;
mod generator;
mod types;
