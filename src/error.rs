//! Error types raised by the game core and persistence.
//!
//! None of these are fatal: callers turn them into a transient on-screen
//! message and leave the session untouched.

use thiserror::Error;

use crate::sim::Slot;

/// The board and the move history disagree during undo/redo
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("no live marble at slot {slot}")]
    MarbleMissing { slot: Slot },

    #[error("slot {slot} is already occupied")]
    SlotOccupied { slot: Slot },

    #[error("no captured marble available to revive")]
    NoCapturedMarble,

    #[error("move {from} over {over} to {to} is not a straight jump")]
    NotAJump { from: Slot, over: Slot, to: Slot },

    #[error("expected {expected} live marbles, found {actual}")]
    AliveCountMismatch { expected: usize, actual: usize },
}

/// Errors from saving or loading a game or the settings file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("line {line}: slot {value} is off the board")]
    InvalidSlot { line: usize, value: i32 },

    #[error("line {line}: unknown body type {name:?}")]
    UnknownBody { line: usize, name: String },

    #[error("two marbles occupy slot {slot}")]
    DuplicateSlot { slot: Slot },

    #[error("{count} marbles listed, the board holds at most 37")]
    TooManyMarbles { count: usize },

    #[error("undo level {undo_level} exceeds the {moves} recorded moves")]
    UndoLevelOutOfRange { undo_level: usize, moves: usize },

    #[error("invalid save name: {0:?}")]
    InvalidSaveName(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistError>;
