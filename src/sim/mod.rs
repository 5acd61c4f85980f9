//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by marble ID)
//! - No rendering or platform dependencies

pub mod animation;
pub mod board;
pub mod body;
pub mod history;
pub mod marble;
pub mod rules;
pub mod slot;
pub mod state;
pub mod sun;
pub mod tick;

pub use animation::{Animation, animated_position, animation_tilt};
pub use board::{BoardState, Jump, SlotContents};
pub use body::{BodyCatalog, BodyProperties, CelestialBodyType, starting_bodies};
pub use history::{MarbleMove, MoveHistory};
pub use marble::{Marble, MarbleId};
pub use rules::{GameStatus, is_game_over, is_victory};
pub use slot::{Direction, Slot};
pub use state::{GameSession, MessageKind, MoveOutcome, TransientMessage};
pub use sun::SunState;
pub use tick::{TickInput, tick};
