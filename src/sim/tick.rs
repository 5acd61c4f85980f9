//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Rendering reads the session only after the
//! tick returns.

use super::slot::Slot;
use super::state::{GameSession, MoveOutcome};
use crate::consts::MAX_TICKS_BEFORE_NEXT_UNDO_REDO;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Slot under the pointer, resolved by the picking layer
    pub target: Option<Slot>,
    /// Primary button went down this tick
    pub click: bool,
    /// Shift: focus instead of select, fast undo/redo
    pub modifier_held: bool,
    /// Undo key went down this tick
    pub undo_pressed: bool,
    /// Redo key went down this tick
    pub redo_pressed: bool,
    /// Undo key is down (repeats while the modifier is held)
    pub undo_held: bool,
    /// Redo key is down (repeats while the modifier is held)
    pub redo_held: bool,
}

/// Advance the session by one tick
pub fn tick(session: &mut GameSession, input: &TickInput) -> MoveOutcome {
    session.time_ticks += 1;
    session.advance_message();

    // Undo/redo failures are logged and shown as a message by the session
    if !session.in_cutscene() {
        session.ticks_before_next_undo_redo = (session.ticks_before_next_undo_redo - 1).max(0);
        if input.modifier_held && session.ticks_before_next_undo_redo <= 0 {
            if input.undo_held {
                let _ = session.undo();
                session.ticks_before_next_undo_redo = MAX_TICKS_BEFORE_NEXT_UNDO_REDO;
            } else if input.redo_held {
                let _ = session.redo(false);
                session.ticks_before_next_undo_redo = MAX_TICKS_BEFORE_NEXT_UNDO_REDO;
            }
        } else if input.undo_pressed {
            let _ = session.undo();
        } else if input.redo_pressed {
            let _ = session.redo(session.animate_moves);
        }
    } else if input.undo_pressed {
        let _ = session.undo();
    }

    session.sun.advance();
    session.advance_selection();

    let outcome = if input.click {
        session.attempt_select_or_move(input.target, input.modifier_held)
    } else {
        MoveOutcome::None
    };

    session.advance_marbles();
    session.advance_cutscene();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rules::GameStatus;

    fn slot(index: i32) -> Slot {
        Slot::new(index).unwrap()
    }

    fn click(index: i32) -> TickInput {
        TickInput {
            target: Slot::new(index),
            click: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_opening_click_through_tick() {
        let mut session = GameSession::new(12345);
        assert_eq!(session.status(), GameStatus::Setup);

        // Hovering without clicking does nothing
        let hover = TickInput {
            target: Some(Slot::CENTRE),
            ..Default::default()
        };
        assert_eq!(tick(&mut session, &hover), MoveOutcome::None);
        assert!(session.board().is_full());

        assert_eq!(tick(&mut session, &click(18)), MoveOutcome::OpeningRemoval);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.time_ticks, 2);
    }

    #[test]
    fn test_opening_removal_animation_runs_out() {
        let mut session = GameSession::new(1);
        tick(&mut session, &click(18));
        let id = session
            .marbles()
            .iter()
            .position(|m| !m.is_alive())
            .unwrap();
        assert!(session.marbles()[id].animation().is_active());

        for _ in 0..MAX_DEATH_ANIMATION_TICKS {
            tick(&mut session, &TickInput::default());
        }
        assert!(!session.marbles()[id].animation().is_active());
    }

    #[test]
    fn test_undo_and_redo_keys() {
        let mut session = GameSession::new(7);
        tick(&mut session, &click(18));

        let undo = TickInput {
            undo_pressed: true,
            undo_held: true,
            ..Default::default()
        };
        tick(&mut session, &undo);
        assert!(session.board().is_full());
        assert_eq!(session.history().undo_level(), 1);

        let redo = TickInput {
            redo_pressed: true,
            redo_held: true,
            ..Default::default()
        };
        tick(&mut session, &redo);
        assert_eq!(session.history().undo_level(), 0);
        assert_eq!(session.board().marble_at(slot(18)), None);
    }

    #[test]
    fn test_held_undo_repeats_with_modifier() {
        let mut session = GameSession::new(99);
        session.animate_moves = false;
        tick(&mut session, &click(18));
        tick(&mut session, &click(16));
        tick(&mut session, &click(18));
        tick(&mut session, &click(4));
        tick(&mut session, &click(17));
        assert_eq!(session.history().len(), 3);

        let held = TickInput {
            modifier_held: true,
            undo_held: true,
            ..Default::default()
        };
        // One undo every MAX_TICKS_BEFORE_NEXT_UNDO_REDO ticks
        let mut undone = Vec::new();
        for _ in 0..(3 * MAX_TICKS_BEFORE_NEXT_UNDO_REDO) {
            tick(&mut session, &held);
            undone.push(session.history().undo_level());
        }
        assert_eq!(undone, vec![1, 1, 2, 2, 3, 3]);
        assert!(session.board().is_full());

        let held_redo = TickInput {
            modifier_held: true,
            redo_held: true,
            ..Default::default()
        };
        for _ in 0..(3 * MAX_TICKS_BEFORE_NEXT_UNDO_REDO) {
            tick(&mut session, &held_redo);
        }
        assert_eq!(session.history().undo_level(), 0);
        // Fast redo is never animated
        assert!(session.marbles().iter().all(|m| !m.animation().is_active()));
    }

    #[test]
    fn test_repeat_countdown_stops_at_zero() {
        let mut session = GameSession::new(5);
        for _ in 0..10 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.ticks_before_next_undo_redo, 0);

        // A held undo still fires on the first tick after idling
        tick(&mut session, &click(18));
        let held = TickInput {
            modifier_held: true,
            undo_held: true,
            ..Default::default()
        };
        tick(&mut session, &held);
        assert_eq!(session.history().undo_level(), 1);
        assert_eq!(session.ticks_before_next_undo_redo, MAX_TICKS_BEFORE_NEXT_UNDO_REDO);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(99999);
        let mut b = GameSession::new(99999);
        let inputs = [click(18), click(16), click(18), TickInput::default(), click(30)];
        for input in &inputs {
            assert_eq!(tick(&mut a, input), tick(&mut b, input));
        }
        for (ma, mb) in a.marbles().iter().zip(b.marbles()) {
            assert_eq!(ma, mb);
        }
        assert_eq!(a.history(), b.history());
    }
}
