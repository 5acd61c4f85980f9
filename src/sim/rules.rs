//! End-of-game evaluation

use super::board::BoardState;

/// Where the current game stands, as shown in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Full board, waiting for the opening removal
    Setup,
    InProgress,
    /// No marble can move but more than one remains
    GameOver,
    /// One marble left
    Victory,
}

impl GameStatus {
    /// Status line for the player, if any
    pub fn hint(self) -> Option<&'static str> {
        match self {
            GameStatus::Setup => Some("Choose your initial empty slot."),
            GameStatus::InProgress => None,
            GameStatus::GameOver => Some("Game over. Remember to save to replay later."),
            GameStatus::Victory => Some("Victory is yours! Remember to save to replay later."),
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Victory)
    }
}

/// True once no live marble has a jump. A full board is never over.
pub fn is_game_over(board: &BoardState) -> bool {
    if board.is_full() {
        return false;
    }
    !board.ids().any(|id| board.can_move(id))
}

/// Exactly one marble left on the board
pub fn is_victory(board: &BoardState) -> bool {
    board.alive_count() == 1
}

pub fn status(board: &BoardState) -> GameStatus {
    if board.is_full() {
        GameStatus::Setup
    } else if board.alive_count() <= 1 {
        GameStatus::Victory
    } else if is_game_over(board) {
        GameStatus::GameOver
    } else {
        GameStatus::InProgress
    }
}
