//! Game session and core simulation types
//!
//! A `GameSession` owns everything a running game needs: the board, the move
//! history, the selection and the victory cutscene. There is no global state;
//! input and rendering layers go through a `&mut GameSession`.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{BodyCatalog, CelestialBodyType};
use super::board::BoardState;
use super::history::MoveHistory;
use super::marble::{Marble, MarbleId};
use super::rules::{self, GameStatus};
use super::slot::Slot;
use super::sun::SunState;
use crate::consts::*;
use crate::error::HistoryError;
use crate::settings::Settings;

/// Result of a click on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed
    None,
    Selected,
    Deselected,
    /// A jump was committed
    Moved,
    /// The first marble was taken off a full board
    OpeningRemoval,
}

/// Colour class of a transient message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
}

/// A short-lived line of text shown over the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub text: String,
    pub ticks_remaining: u32,
    pub kind: MessageKind,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, ticks: u32, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            ticks_remaining: ticks,
            kind,
        }
    }
}

pub const UNDO_FAILED_TICKS: u32 = 300;
pub const REDO_FAILED_TICKS: u32 = 300;

/// Victory cutscene in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cutscene {
    /// The last marble captured, followed by the camera into the sun
    captured: MarbleId,
    tick: u32,
}

/// Complete state of one game window
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the session RNG was created from
    pub seed: u64,
    rng: Pcg32,
    board: BoardState,
    history: MoveHistory,
    catalog: BodyCatalog,
    pub sun: SunState,
    /// Drives the selected marble's bob; cycles 0..=MAX_SELECTION_ANIMATION_TICKS
    selection_tick: u32,
    cutscene: Option<Cutscene>,
    pub message: Option<TransientMessage>,
    /// Moves made since the last save or load
    dirty: bool,
    /// Name of the save file this game was last saved to or loaded from
    pub save_name: Option<String>,
    pub animate_moves: bool,
    pub spinning_marbles: bool,
    pub(crate) ticks_before_next_undo_redo: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameSession {
    /// Start a new game with the standard body catalog
    pub fn new(seed: u64) -> Self {
        Self::with_catalog(seed, BodyCatalog::standard())
    }

    pub fn with_catalog(seed: u64, catalog: BodyCatalog) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = BoardState::new_game(&mut rng);
        log::info!("New game (seed {seed})");
        Self {
            seed,
            rng,
            board,
            history: MoveHistory::new(),
            catalog,
            sun: SunState::default(),
            selection_tick: 0,
            cutscene: None,
            message: None,
            dirty: false,
            save_name: None,
            animate_moves: true,
            spinning_marbles: true,
            ticks_before_next_undo_redo: 0,
            time_ticks: 0,
        }
    }

    /// Deal a fresh board and forget the history
    pub fn reset(&mut self) {
        self.end_cutscene();
        self.board.reset(&mut self.rng);
        self.history = MoveHistory::new();
        self.selection_tick = 0;
        self.dirty = false;
        self.save_name = None;
        log::info!("New game");
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.animate_moves = settings.move_animation;
        self.spinning_marbles = settings.spinning_marbles;
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn marbles(&self) -> &[Marble] {
        self.board.marbles()
    }

    pub fn selected(&self) -> Option<MarbleId> {
        self.board.selected()
    }

    pub fn selection_tick(&self) -> u32 {
        self.selection_tick
    }

    pub fn status(&self) -> GameStatus {
        rules::status(&self.board)
    }

    pub fn is_game_over(&self) -> bool {
        rules::is_game_over(&self.board)
    }

    /// Unsaved moves exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Window title
    pub fn title(&self) -> String {
        match &self.save_name {
            Some(name) => format!("{name} - Marbles"),
            None => "Marbles".to_string(),
        }
    }

    pub fn show_message(&mut self, text: impl Into<String>, ticks: u32, kind: MessageKind) {
        self.message = Some(TransientMessage::new(text, ticks, kind));
    }

    fn select(&mut self, id: Option<MarbleId>) {
        if self.board.selected() != id {
            self.selection_tick = 0;
        }
        self.board.select(id);
    }

    /// Handle a click on `target` (a slot resolved by the picking layer,
    /// `None` when the click hit nothing).
    ///
    /// With the modifier held a click on a marble only asks the camera to
    /// focus on it; that is left to the caller and reported as `None`.
    pub fn attempt_select_or_move(
        &mut self,
        target: Option<Slot>,
        modifier_held: bool,
    ) -> MoveOutcome {
        if self.in_cutscene() {
            return MoveOutcome::None;
        }
        let Some(slot) = target else {
            return self.deselect();
        };
        let clicked = self.board.marble_at(slot);

        if let Some(id) = clicked.filter(|_| !modifier_held && self.board.is_full()) {
            let mv = self.board.remove_opening(id, self.animate_moves);
            self.selection_tick = 0;
            let discarded = self.history.record(mv);
            self.dirty = true;
            log::info!("Opening removal: {mv} ({discarded} undone moves discarded)");
            return MoveOutcome::OpeningRemoval;
        }

        if let Some(jump) = self.board.legal_jump(slot) {
            let mv = self.board.commit_jump(&jump, self.animate_moves);
            self.selection_tick = 0;
            let discarded = self.history.record(mv);
            self.dirty = true;
            log::info!("Jump: {mv} ({discarded} undone moves discarded)");

            if rules::is_victory(&self.board) {
                log::info!("Victory after {} moves", self.history.len());
                if self.animate_moves {
                    self.cutscene = Some(Cutscene {
                        captured: jump.captured,
                        tick: 0,
                    });
                }
            } else if rules::is_game_over(&self.board) {
                log::info!("Game over with {} marbles left", self.board.alive_count());
            }
            return MoveOutcome::Moved;
        }

        match clicked {
            Some(_) if modifier_held => MoveOutcome::None,
            Some(id) if self.board.selected() == Some(id) => self.deselect(),
            Some(id) => {
                self.select(Some(id));
                MoveOutcome::Selected
            }
            None => self.deselect(),
        }
    }

    fn deselect(&mut self) -> MoveOutcome {
        if self.board.selected().is_none() {
            return MoveOutcome::None;
        }
        self.select(None);
        MoveOutcome::Deselected
    }

    /// Step back one move. `Ok(false)` when there is nothing to undo.
    ///
    /// A running victory cutscene is ended first. On failure the cursor and
    /// board are left as they were and a message is shown.
    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        self.end_cutscene();
        let Some(mv) = self.history.next_undo().copied() else {
            return Ok(false);
        };
        match self.board.apply_undo(&mv) {
            Ok(()) => {
                self.history.step_back();
                self.selection_tick = 0;
                log::debug!("Undo: {mv} (undo level {})", self.history.undo_level());
                Ok(true)
            }
            Err(err) => {
                log::warn!("Undo of {mv} failed: {err}");
                self.show_message("Undo Failed", UNDO_FAILED_TICKS, MessageKind::Warning);
                Err(err)
            }
        }
    }

    /// Re-apply the next undone move. Ignored during the victory cutscene.
    pub fn redo(&mut self, animate: bool) -> Result<bool, HistoryError> {
        if self.in_cutscene() {
            return Ok(false);
        }
        let Some(mv) = self.history.next_redo().copied() else {
            return Ok(false);
        };
        match self.board.apply_redo(&mv, animate) {
            Ok(()) => {
                self.history.step_forward();
                self.selection_tick = 0;
                log::debug!("Redo: {mv} (undo level {})", self.history.undo_level());
                Ok(true)
            }
            Err(err) => {
                log::warn!("Redo of {mv} failed: {err}");
                self.show_message("Redo Failed", REDO_FAILED_TICKS, MessageKind::Warning);
                Err(err)
            }
        }
    }

    pub fn in_cutscene(&self) -> bool {
        self.cutscene.is_some()
    }

    /// Ticks into the victory cutscene
    pub fn cutscene_tick(&self) -> Option<u32> {
        self.cutscene.map(|c| c.tick)
    }

    /// Stop the victory cutscene and the captured marble's flight
    pub fn end_cutscene(&mut self) {
        if let Some(cutscene) = self.cutscene.take() {
            self.board.clear_animation(cutscene.captured);
        }
    }

    /// Where the camera should look during the cutscene: the last captured
    /// marble while it is still in flight, then the sun
    pub fn cutscene_focus(&self) -> Option<Vec3> {
        let cutscene = self.cutscene?;
        let marble = self.board.marble(cutscene.captured);
        let animation = marble.animation();
        let limit = MAX_ANIMATION_TICKS + MAX_DEATH_ANIMATION_TICKS;
        if animation.is_active() && animation.tick() < limit {
            Some(marble.position(self.sun.position()))
        } else {
            Some(self.sun.position())
        }
    }

    /// Rendered position of a marble, including the selection bob
    pub fn marble_position(&self, id: MarbleId) -> Vec3 {
        let mut position = self.board.marble(id).position(self.sun.position());
        if self.board.selected() == Some(id) {
            let phase = std::f32::consts::TAU * self.selection_tick as f32
                / MAX_SELECTION_ANIMATION_TICKS as f32;
            position.z += SELECTION_BOB_HEIGHT * phase.sin();
        }
        position
    }

    pub fn marble_rotation(&self, id: MarbleId) -> Quat {
        self.board.marble(id).rotation()
    }

    /// Empty slots the selected marble can jump into
    pub fn valid_destinations(&self) -> Vec<Slot> {
        self.board.valid_destinations()
    }

    /// Marbles alive or still flying into the sun
    pub fn visible_count(&self) -> usize {
        self.board.visible_count()
    }

    pub fn sun_radius(&self) -> f32 {
        SunState::current_radius(self.visible_count(), self.cutscene.map(|c| c.tick))
    }

    pub fn body_name(&self, body: CelestialBodyType) -> &str {
        self.catalog.get(body).display_name.as_str()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Swap in a loaded game. Clears the selection and any cutscene.
    pub(crate) fn replace_game(
        &mut self,
        board: BoardState,
        history: MoveHistory,
        name: Option<String>,
    ) {
        self.end_cutscene();
        self.board = board;
        self.history = history;
        self.selection_tick = 0;
        self.dirty = false;
        self.save_name = name;
    }

    pub(crate) fn mark_saved(&mut self, name: &str) {
        self.dirty = false;
        self.save_name = Some(name.to_string());
    }

    /// Advance the bob of the selected marble
    pub(crate) fn advance_selection(&mut self) {
        if self.board.selected().is_some() {
            self.selection_tick += 1;
            if self.selection_tick > MAX_SELECTION_ANIMATION_TICKS {
                self.selection_tick = 0;
            }
        }
    }

    pub(crate) fn advance_marbles(&mut self) {
        self.board.update(self.spinning_marbles);
    }

    pub(crate) fn advance_cutscene(&mut self) {
        let Some(cutscene) = self.cutscene.as_mut() else {
            return;
        };
        let last_tick = MAX_VICTORY_ANIMATION_TICKS + VICTORY_CAMERA_LINGER_TICKS;
        if !self.animate_moves || cutscene.tick > last_tick {
            self.end_cutscene();
        } else {
            cutscene.tick += 1;
        }
    }

    pub(crate) fn advance_message(&mut self) {
        if let Some(message) = self.message.as_mut() {
            message.ticks_remaining = message.ticks_remaining.saturating_sub(1);
            if message.ticks_remaining == 0 {
                self.message = None;
            }
        }
    }
}
