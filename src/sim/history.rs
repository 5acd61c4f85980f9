//! Move log with an undo cursor
//!
//! History is linear: recording a move after undoing discards the undone
//! moves before appending.

use super::body::CelestialBodyType;
use super::slot::Slot;

/// One committed move, never mutated after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarbleMove {
    from: Slot,
    /// `(pass_over, to)`; `None` for the opening removal
    jump: Option<(Slot, Slot)>,
    captured_body: CelestialBodyType,
}

impl MarbleMove {
    /// Removal of the first marble from a full board
    pub fn opening(slot: Slot, body: CelestialBodyType) -> Self {
        Self {
            from: slot,
            jump: None,
            captured_body: body,
        }
    }

    pub fn jump(from: Slot, pass_over: Slot, to: Slot, captured_body: CelestialBodyType) -> Self {
        Self {
            from,
            jump: Some((pass_over, to)),
            captured_body,
        }
    }

    /// Mover's origin, or the removed marble's slot for the opening move
    pub fn from(&self) -> Slot {
        self.from
    }

    pub fn pass_over(&self) -> Option<Slot> {
        self.jump.map(|(over, _)| over)
    }

    pub fn to(&self) -> Option<Slot> {
        self.jump.map(|(_, to)| to)
    }

    /// Skin of the removed marble, needed to bring it back on undo
    pub fn captured_body(&self) -> CelestialBodyType {
        self.captured_body
    }

    pub fn is_opening(&self) -> bool {
        self.jump.is_none()
    }
}

impl std::fmt::Display for MarbleMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.jump {
            Some((over, to)) => write!(
                f,
                "{} over {} to {} ({})",
                self.from, over, to, self.captured_body
            ),
            None => write!(f, "remove {} ({})", self.from, self.captured_body),
        }
    }
}

/// Chronological moves plus the count undone from the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<MarbleMove>,
    undo_level: usize,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved parts; `None` if the cursor is out of range
    pub fn from_parts(moves: Vec<MarbleMove>, undo_level: usize) -> Option<Self> {
        (undo_level <= moves.len()).then_some(Self { moves, undo_level })
    }

    pub fn moves(&self) -> &[MarbleMove] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn undo_level(&self) -> usize {
        self.undo_level
    }

    /// Number of moves currently applied to the board
    pub fn cursor(&self) -> usize {
        self.moves.len() - self.undo_level
    }

    pub fn can_undo(&self) -> bool {
        self.undo_level < self.moves.len()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_level > 0
    }

    /// Append a move, dropping any undone suffix first.
    /// Returns how many moves were discarded.
    pub fn record(&mut self, mv: MarbleMove) -> usize {
        let discarded = self.undo_level;
        if discarded > 0 {
            self.moves.truncate(self.cursor());
            self.undo_level = 0;
        }
        self.moves.push(mv);
        discarded
    }

    /// The move an undo would reverse
    pub fn next_undo(&self) -> Option<&MarbleMove> {
        if !self.can_undo() {
            return None;
        }
        self.moves.get(self.cursor() - 1)
    }

    /// The move a redo would re-apply
    pub fn next_redo(&self) -> Option<&MarbleMove> {
        if !self.can_redo() {
            return None;
        }
        self.moves.get(self.cursor())
    }

    pub(crate) fn step_back(&mut self) {
        debug_assert!(self.can_undo());
        self.undo_level = (self.undo_level + 1).min(self.moves.len());
    }

    pub(crate) fn step_forward(&mut self) {
        debug_assert!(self.can_redo());
        self.undo_level = self.undo_level.saturating_sub(1);
    }
}
