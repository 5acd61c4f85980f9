//! Board state and jump legality
//!
//! The board owns all 37 marbles for the lifetime of a session. Captured
//! marbles stay in the list with `alive == false` so undo can bring them back.

use rand::Rng;
use rand::seq::SliceRandom;

use super::body::{CelestialBodyType, starting_bodies};
use super::history::MarbleMove;
use super::marble::{Marble, MarbleId};
use super::slot::{Direction, Slot};
use crate::consts::STARTING_COUNT;
use crate::error::HistoryError;

/// What a raw slot index holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotContents {
    OutOfBounds,
    Empty,
    Occupied(MarbleId),
}

/// A legal jump resolved against the current board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub mover: MarbleId,
    pub captured: MarbleId,
    pub from: Slot,
    pub over: Slot,
    pub to: Slot,
}

/// All marbles plus the current selection
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    marbles: Vec<Marble>,
    selected: Option<MarbleId>,
}

impl BoardState {
    /// A full board with the standard skins dealt onto random slots
    pub fn new_game(rng: &mut impl Rng) -> Self {
        let mut board = Self {
            marbles: starting_bodies()
                .into_iter()
                .map(|body| Marble::new(body, Slot::CENTRE))
                .collect(),
            selected: None,
        };
        board.reset(rng);
        board
    }

    /// Board with exactly the given marbles alive; the rest are captured.
    ///
    /// Returns `None` if two entries share a slot or there are more than 37.
    pub fn from_layout(layout: &[(Slot, CelestialBodyType)], rng: &mut impl Rng) -> Option<Self> {
        if layout.len() > STARTING_COUNT {
            return None;
        }
        let mut seen = [false; STARTING_COUNT];
        for (slot, _) in layout {
            if std::mem::replace(&mut seen[slot.index()], true) {
                return None;
            }
        }

        let mut marbles = Vec::with_capacity(STARTING_COUNT);
        for &(slot, body) in layout {
            let mut marble = Marble::new(body, slot);
            marble.initialise(slot, rng);
            marbles.push(marble);
        }
        while marbles.len() < STARTING_COUNT {
            let mut marble = Marble::new(CelestialBodyType::default(), Slot::CENTRE);
            marble.alive = false;
            marbles.push(marble);
        }
        Some(Self {
            marbles,
            selected: None,
        })
    }

    /// Deal the starting skins again and scatter the marbles over every slot
    pub(crate) fn reset(&mut self, rng: &mut impl Rng) {
        let mut slots: Vec<Slot> = Slot::all().collect();
        slots.shuffle(rng);
        for ((marble, body), slot) in self.marbles.iter_mut().zip(starting_bodies()).zip(slots) {
            marble.body = body;
            marble.initialise(slot, rng);
        }
        self.selected = None;
    }

    pub fn marbles(&self) -> &[Marble] {
        &self.marbles
    }

    pub fn marble(&self, id: MarbleId) -> &Marble {
        &self.marbles[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = MarbleId> + '_ {
        (0..self.marbles.len()).map(MarbleId)
    }

    pub fn selected(&self) -> Option<MarbleId> {
        self.selected
    }

    pub(crate) fn select(&mut self, id: Option<MarbleId>) {
        self.selected = id;
    }

    pub fn alive_count(&self) -> usize {
        self.marbles.iter().filter(|m| m.alive).count()
    }

    /// Marbles still on the board or mid-flight to the sun
    pub fn visible_count(&self) -> usize {
        self.marbles.iter().filter(|m| m.is_visible()).count()
    }

    /// Setup phase: nothing removed yet
    pub fn is_full(&self) -> bool {
        self.alive_count() == STARTING_COUNT
    }

    /// Classify a raw slot index
    pub fn contents(&self, index: i32) -> SlotContents {
        match Slot::new(index) {
            None => SlotContents::OutOfBounds,
            Some(slot) => self
                .marble_at(slot)
                .map_or(SlotContents::Empty, SlotContents::Occupied),
        }
    }

    /// The live marble in `slot`
    pub fn marble_at(&self, slot: Slot) -> Option<MarbleId> {
        self.marbles
            .iter()
            .position(|m| m.alive && m.slot == slot)
            .map(MarbleId)
    }

    fn is_empty(&self, slot: Slot) -> bool {
        self.marble_at(slot).is_none()
    }

    /// The jump that would carry `mover` into `destination`, if legal.
    ///
    /// Directions are examined from the destination in the order Right, Up,
    /// Left, Down; the first match wins.
    pub fn jump_for(&self, mover: MarbleId, destination: Slot) -> Option<Jump> {
        if !self.marble(mover).alive || !self.is_empty(destination) {
            return None;
        }
        Direction::JUMP_ORDER.into_iter().find_map(|dir| {
            let over = destination.neighbor(dir, false)?;
            let captured = self.marble_at(over)?;
            let from = over.neighbor(dir, false)?;
            (self.marble_at(from) == Some(mover)).then_some(Jump {
                mover,
                captured,
                from,
                over,
                to: destination,
            })
        })
    }

    /// Legal jump for the selected marble into `destination`
    pub fn legal_jump(&self, destination: Slot) -> Option<Jump> {
        self.jump_for(self.selected?, destination)
    }

    pub fn is_legal_jump(&self, destination: Slot) -> bool {
        self.legal_jump(destination).is_some()
    }

    /// Empty slots the selected marble could jump into
    pub fn valid_destinations(&self) -> Vec<Slot> {
        Slot::all().filter(|&s| self.is_legal_jump(s)).collect()
    }

    /// Whether `id` has any jump available
    pub fn can_move(&self, id: MarbleId) -> bool {
        let marble = self.marble(id);
        if !marble.alive {
            return false;
        }
        Direction::JUMP_ORDER.into_iter().any(|dir| {
            marble
                .slot
                .neighbor(dir, false)
                .filter(|&over| !self.is_empty(over))
                .and_then(|over| over.neighbor(dir, false))
                .is_some_and(|beyond| self.is_empty(beyond))
        })
    }

    /// Take `id` off a full board to make the starting hole
    pub(crate) fn remove_opening(&mut self, id: MarbleId, animate: bool) -> MarbleMove {
        let marble = &mut self.marbles[id.0];
        if animate {
            marble.animation.start_initial_removal(marble.slot);
        }
        marble.alive = false;
        self.selected = None;
        MarbleMove::opening(marble.slot, marble.body)
    }

    /// Apply a jump previously returned by [`BoardState::jump_for`]
    pub(crate) fn commit_jump(&mut self, jump: &Jump, animate: bool) -> MarbleMove {
        let captured_body = self.marbles[jump.captured.0].body;
        if animate {
            self.marbles[jump.mover.0].animation.start(jump.from);
            self.marbles[jump.captured.0].animation.start(jump.over);
        }
        self.marbles[jump.mover.0].slot = jump.to;
        self.marbles[jump.captured.0].alive = false;
        self.selected = None;
        MarbleMove::jump(jump.from, jump.over, jump.to, captured_body)
    }

    fn first_captured(&self) -> Result<MarbleId, HistoryError> {
        self.marbles
            .iter()
            .position(|m| !m.alive)
            .map(MarbleId)
            .ok_or(HistoryError::NoCapturedMarble)
    }

    fn require_empty(&self, slot: Slot) -> Result<(), HistoryError> {
        match self.marble_at(slot) {
            Some(_) => Err(HistoryError::SlotOccupied { slot }),
            None => Ok(()),
        }
    }

    fn require_straight(from: Slot, over: Slot, to: Slot) -> Result<(), HistoryError> {
        match from.jump_direction(over, to) {
            Some(_) => Ok(()),
            None => Err(HistoryError::NotAJump { from, over, to }),
        }
    }

    fn revive(&mut self, id: MarbleId, slot: Slot, body: CelestialBodyType) {
        let marble = &mut self.marbles[id.0];
        marble.alive = true;
        marble.slot = slot;
        marble.body = body;
        marble.animation.clear();
    }

    /// Reverse `mv`. Everything is checked before anything changes, so an
    /// error leaves the board as it was.
    pub(crate) fn apply_undo(&mut self, mv: &MarbleMove) -> Result<(), HistoryError> {
        match (mv.pass_over(), mv.to()) {
            (Some(over), Some(to)) => {
                Self::require_straight(mv.from(), over, to)?;
                let mover = self
                    .marble_at(to)
                    .ok_or(HistoryError::MarbleMissing { slot: to })?;
                self.require_empty(mv.from())?;
                self.require_empty(over)?;
                let captured = self.first_captured()?;

                let marble = &mut self.marbles[mover.0];
                marble.slot = mv.from();
                marble.animation.clear();
                self.revive(captured, over, mv.captured_body());
            }
            _ => {
                let alive = self.alive_count();
                if alive != STARTING_COUNT - 1 {
                    return Err(HistoryError::AliveCountMismatch {
                        expected: STARTING_COUNT - 1,
                        actual: alive,
                    });
                }
                self.require_empty(mv.from())?;
                let removed = self.first_captured()?;
                self.revive(removed, mv.from(), mv.captured_body());
            }
        }
        self.selected = None;
        Ok(())
    }

    /// Re-apply `mv`. Like [`BoardState::apply_undo`], fails without side effects.
    pub(crate) fn apply_redo(
        &mut self,
        mv: &MarbleMove,
        animate: bool,
    ) -> Result<(), HistoryError> {
        match (mv.pass_over(), mv.to()) {
            (Some(over), Some(to)) => {
                Self::require_straight(mv.from(), over, to)?;
                let mover = self
                    .marble_at(mv.from())
                    .ok_or(HistoryError::MarbleMissing { slot: mv.from() })?;
                let captured = self
                    .marble_at(over)
                    .ok_or(HistoryError::MarbleMissing { slot: over })?;
                self.require_empty(to)?;

                self.commit_jump(
                    &Jump {
                        mover,
                        captured,
                        from: mv.from(),
                        over,
                        to,
                    },
                    animate,
                );
            }
            _ => {
                let alive = self.alive_count();
                if alive != STARTING_COUNT {
                    return Err(HistoryError::AliveCountMismatch {
                        expected: STARTING_COUNT,
                        actual: alive,
                    });
                }
                let id = self
                    .marble_at(mv.from())
                    .ok_or(HistoryError::MarbleMissing { slot: mv.from() })?;
                self.remove_opening(id, animate);
            }
        }
        self.selected = None;
        Ok(())
    }

    /// Advance every marble's animation and spin by one tick
    pub(crate) fn update(&mut self, spin: bool) {
        for marble in &mut self.marbles {
            marble.update(spin);
        }
    }

    /// Stop any animation on `id` immediately
    pub(crate) fn clear_animation(&mut self, id: MarbleId) {
        self.marbles[id.0].animation.clear();
    }
}
