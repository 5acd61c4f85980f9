//! Marbles - peg solitaire on a plus-shaped board of celestial bodies
//!
//! Core modules:
//! - `sim`: Deterministic game logic (slot topology, board, moves, history, animation)
//! - `persistence`: Line-oriented save files and the save directory
//! - `settings`: User preferences
//! - `error`: Error taxonomy shared by the modules above

pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::{HistoryError, PersistError};
pub use settings::Settings;
pub use sim::{GameSession, MoveOutcome, Slot, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Number of marbles (and slots) on the board
    pub const STARTING_COUNT: usize = 37;
    /// The middle of the board
    pub const CENTRE_SLOT: usize = 18;

    /// Duration of a jump arc (and of the pre-capture drop)
    pub const MAX_ANIMATION_TICKS: u32 = 60;
    /// Duration of the fling into the sun after a capture
    pub const MAX_DEATH_ANIMATION_TICKS: u32 = 90;
    /// Period of the selected marble's bob
    pub const MAX_SELECTION_ANIMATION_TICKS: u32 = 60;
    /// How long the sun takes to collapse at the end of a won game
    pub const MAX_SUN_DEATH_TICKS: u32 = 120;
    /// Full length of the victory cutscene before the camera lingers
    pub const MAX_VICTORY_ANIMATION_TICKS: u32 =
        MAX_ANIMATION_TICKS + MAX_DEATH_ANIMATION_TICKS + MAX_SUN_DEATH_TICKS;
    /// Extra ticks the camera stays on the sun after the cutscene
    pub const VICTORY_CAMERA_LINGER_TICKS: u32 = 90;

    /// World units between neighbouring slots
    pub const SLOT_SPACING: f32 = 4.0;
    /// How far a captured marble sinks below the board
    pub const DROP_DOWN_DEAD: f32 = 2.0;
    /// Vertical amplitude of the selection bob
    pub const SELECTION_BOB_HEIGHT: f32 = 0.9;

    /// Sun orbit around the board
    pub const SUN_ORBIT_RADIUS: f32 = 30.0;
    pub const SUN_HEIGHT: f32 = 40.0;
    /// Radians per tick
    pub const SUN_ANGULAR_SPEED: f32 = 0.007;

    /// Yaw change per tick for spinning marbles (radians)
    pub const SPIN_SPEED: f32 = 0.01;

    /// Repeat interval for undo/redo while the modifier is held
    pub const MAX_TICKS_BEFORE_NEXT_UNDO_REDO: i32 = 2;
}
