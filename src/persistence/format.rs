//! Plain-text save format
//!
//! ```text
//! Marbles
//!
//! Undos 1
//!
//! Marble: Slot 4; Body Earth;
//! Marble: Slot 9; Body RedDwarf; Light 1;
//!
//! Move: From 18; Passing -1; To -1; Marble Saturn;
//! Move: From 16; Passing 17; To 18; Marble Moon;
//! ```
//!
//! Each record is a label, a colon, then `; `-separated ` Label value;`
//! segments. `-1` stands for "no slot". Unknown lines and segments are skipped,
//! but anything recognized must be well formed or the whole load fails.

use std::fmt::Write as _;

use crate::consts::STARTING_COUNT;
use crate::error::{PersistError, Result};
use crate::sim::{BoardState, CelestialBodyType, GameSession, MarbleMove, MoveHistory, Slot};

const HEADER: &str = "Marbles";
const UNDOS_PREFIX: &str = "Undos ";
const MARBLE_PREFIX: &str = "Marble: ";
const MOVE_PREFIX: &str = "Move: ";

/// One alive marble as stored in a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarbleRecord {
    pub slot: Slot,
    pub body: CelestialBodyType,
    /// Light slot for star bodies; informational only
    pub light: Option<u8>,
}

/// Everything a save file holds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveData {
    pub undo_level: usize,
    pub marbles: Vec<MarbleRecord>,
    pub moves: Vec<MarbleMove>,
}

impl SaveData {
    /// Snapshot the alive marbles and the full history of a session
    pub fn capture(session: &GameSession) -> Self {
        let catalog = session.catalog();
        Self {
            undo_level: session.history().undo_level(),
            marbles: session
                .marbles()
                .iter()
                .filter(|m| m.is_alive())
                .map(|m| MarbleRecord {
                    slot: m.slot(),
                    body: m.body(),
                    light: catalog.star_index(m.body()),
                })
                .collect(),
            moves: session.history().moves().to_vec(),
        }
    }

    /// Check the data describes a reachable board
    pub fn validate(&self) -> Result<()> {
        if self.marbles.len() > STARTING_COUNT {
            return Err(PersistError::TooManyMarbles {
                count: self.marbles.len(),
            });
        }
        let mut seen = [false; STARTING_COUNT];
        for record in &self.marbles {
            if std::mem::replace(&mut seen[record.slot.index()], true) {
                return Err(PersistError::DuplicateSlot { slot: record.slot });
            }
        }
        if self.undo_level > self.moves.len() {
            return Err(PersistError::UndoLevelOutOfRange {
                undo_level: self.undo_level,
                moves: self.moves.len(),
            });
        }
        Ok(())
    }

    /// Replace the session's game with this one. Nothing changes on error.
    pub fn restore(&self, session: &mut GameSession, name: Option<String>) -> Result<()> {
        self.validate()?;
        let layout: Vec<_> = self.marbles.iter().map(|r| (r.slot, r.body)).collect();
        let board = BoardState::from_layout(&layout, session.rng_mut())
            .ok_or_else(|| PersistError::TooManyMarbles { count: layout.len() })?;
        let history = MoveHistory::from_parts(self.moves.clone(), self.undo_level).ok_or_else(|| {
            PersistError::UndoLevelOutOfRange {
                undo_level: self.undo_level,
                moves: self.moves.len(),
            }
        })?;
        session.replace_game(board, history, name);
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "{HEADER}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{UNDOS_PREFIX}{}", self.undo_level);
        let _ = writeln!(out);
        for record in &self.marbles {
            let _ = write!(
                out,
                "{MARBLE_PREFIX}Slot {}; Body {};",
                record.slot,
                record.body.as_str()
            );
            if let Some(light) = record.light {
                let _ = write!(out, " Light {light};");
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out);
        for mv in &self.moves {
            let _ = writeln!(
                out,
                "{MOVE_PREFIX}From {}; Passing {}; To {}; Marble {};",
                mv.from(),
                slot_or_none(mv.pass_over()),
                slot_or_none(mv.to()),
                mv.captured_body().as_str()
            );
        }
        out
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut data = SaveData::default();
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            if let Some(value) = line.strip_prefix(UNDOS_PREFIX) {
                data.undo_level = value.trim().parse().map_err(|_| PersistError::Parse {
                    line: line_no,
                    reason: format!("bad undo level {value:?}"),
                })?;
            } else if let Some(rest) = line.strip_prefix(MARBLE_PREFIX) {
                data.marbles.push(parse_marble(rest, line_no)?);
            } else if let Some(rest) = line.strip_prefix(MOVE_PREFIX) {
                data.moves.push(parse_move(rest, line_no)?);
            }
        }
        if data.marbles.len() > STARTING_COUNT {
            return Err(PersistError::TooManyMarbles {
                count: data.marbles.len(),
            });
        }
        Ok(data)
    }
}

fn slot_or_none(slot: Option<Slot>) -> i32 {
    slot.map_or(-1, |s| s.index() as i32)
}

const MARBLE_LABELS: [&str; 3] = ["Slot", "Body", "Light"];
const MOVE_LABELS: [&str; 4] = ["From", "Passing", "To", "Marble"];

/// Split ` Slot 4; Body Earth;` into `[("Slot", "4"), ("Body", "Earth")]`,
/// keeping only segments labelled with one of `known`
fn segments<'a>(rest: &'a str, line: usize, known: &[&str]) -> Result<Vec<(&'a str, &'a str)>> {
    let mut out = Vec::new();
    let mut remaining = rest;
    while let Some(end) = remaining.find(';') {
        let segment = remaining[..end].trim();
        remaining = &remaining[end + 1..];
        let (label, value) = segment.split_once(' ').unwrap_or((segment, ""));
        if !known.contains(&label) {
            continue;
        }
        if value.trim().is_empty() {
            return Err(PersistError::Parse {
                line,
                reason: format!("segment {label:?} has no value"),
            });
        }
        out.push((label, value.trim()));
    }
    if !remaining.trim().is_empty() {
        return Err(PersistError::Parse {
            line,
            reason: format!("unterminated segment {:?}", remaining.trim()),
        });
    }
    Ok(out)
}

fn parse_int(value: &str, line: usize, label: &str) -> Result<i32> {
    value.parse().map_err(|_| PersistError::Parse {
        line,
        reason: format!("{label} is not a number: {value:?}"),
    })
}

fn parse_slot(value: &str, line: usize, label: &str) -> Result<Slot> {
    let index = parse_int(value, line, label)?;
    Slot::new(index).ok_or(PersistError::InvalidSlot { line, value: index })
}

/// `-1` is "none"; anything else must be on the board
fn parse_optional_slot(value: &str, line: usize, label: &str) -> Result<Option<Slot>> {
    match parse_int(value, line, label)? {
        -1 => Ok(None),
        index => Slot::new(index)
            .map(Some)
            .ok_or(PersistError::InvalidSlot { line, value: index }),
    }
}

fn parse_body(value: &str, line: usize) -> Result<CelestialBodyType> {
    CelestialBodyType::from_name(value).ok_or_else(|| PersistError::UnknownBody {
        line,
        name: value.to_string(),
    })
}

fn missing(line: usize, label: &str) -> PersistError {
    PersistError::Parse {
        line,
        reason: format!("missing {label}"),
    }
}

fn parse_marble(rest: &str, line: usize) -> Result<MarbleRecord> {
    let mut slot = None;
    let mut body = None;
    let mut light = None;
    for (label, value) in segments(rest, line, &MARBLE_LABELS)? {
        match label {
            "Slot" => slot = Some(parse_slot(value, line, label)?),
            "Body" => body = Some(parse_body(value, line)?),
            "Light" => {
                light = Some(value.parse().map_err(|_| PersistError::Parse {
                    line,
                    reason: format!("bad light index {value:?}"),
                })?)
            }
            _ => {}
        }
    }
    Ok(MarbleRecord {
        slot: slot.ok_or_else(|| missing(line, "Slot"))?,
        body: body.ok_or_else(|| missing(line, "Body"))?,
        light,
    })
}

fn parse_move(rest: &str, line: usize) -> Result<MarbleMove> {
    let mut from = None;
    let mut passing = None;
    let mut to = None;
    let mut body = None;
    for (label, value) in segments(rest, line, &MOVE_LABELS)? {
        match label {
            "From" => from = Some(parse_slot(value, line, label)?),
            "Passing" => passing = Some(parse_optional_slot(value, line, label)?),
            "To" => to = Some(parse_optional_slot(value, line, label)?),
            "Marble" => body = Some(parse_body(value, line)?),
            _ => {}
        }
    }
    let from = from.ok_or_else(|| missing(line, "From"))?;
    let passing = passing.ok_or_else(|| missing(line, "Passing"))?;
    let to = to.ok_or_else(|| missing(line, "To"))?;
    let body = body.ok_or_else(|| missing(line, "Marble"))?;
    match (passing, to) {
        (None, None) => Ok(MarbleMove::opening(from, body)),
        (Some(over), Some(to)) if from.jump_direction(over, to).is_some() => {
            Ok(MarbleMove::jump(from, over, to, body))
        }
        (Some(over), Some(to)) => Err(PersistError::Parse {
            line,
            reason: format!("{from} over {over} to {to} is not a straight jump"),
        }),
        _ => Err(PersistError::Parse {
            line,
            reason: "Passing and To must both be -1 or both be slots".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MoveOutcome;

    fn slot(index: i32) -> Slot {
        Slot::new(index).unwrap()
    }

    const SAMPLE: &str = "\
Marbles

Undos 1

Marble: Slot 4; Body Earth;
Marble: Slot 9; Body RedDwarf; Light 1;

Move: From 18; Passing -1; To -1; Marble Saturn;
Move: From 16; Passing 17; To 18; Marble Moon;
";

    #[test]
    fn test_parse_sample() {
        let data = SaveData::parse(SAMPLE).unwrap();
        assert_eq!(data.undo_level, 1);
        assert_eq!(
            data.marbles,
            vec![
                MarbleRecord {
                    slot: slot(4),
                    body: CelestialBodyType::Earth,
                    light: None
                },
                MarbleRecord {
                    slot: slot(9),
                    body: CelestialBodyType::RedDwarf,
                    light: Some(1)
                },
            ]
        );
        assert_eq!(
            data.moves,
            vec![
                MarbleMove::opening(slot(18), CelestialBodyType::Saturn),
                MarbleMove::jump(slot(16), slot(17), slot(18), CelestialBodyType::Moon),
            ]
        );
    }

    #[test]
    fn test_write_matches_layout() {
        let data = SaveData::parse(SAMPLE).unwrap();
        assert_eq!(data.to_text(), SAMPLE);
    }

    #[test]
    fn test_crlf_and_unknown_segments_are_tolerated() {
        let text = "Marbles\r\n\r\nUndos 0\r\n\r\n\
                    Marble: Slot 4; Colour Blue; Body Earth;\r\nComment line\r\n";
        let data = SaveData::parse(text).unwrap();
        assert_eq!(data.marbles.len(), 1);
        assert_eq!(data.marbles[0].body, CelestialBodyType::Earth);
    }

    #[test]
    fn test_valueless_unknown_segments_are_skipped() {
        let text = "Marble: Slot 4; Body Earth; Hidden;\n\
                    Move: From 16; Passing 17; To 18; Marble Moon; Flag;\n";
        let data = SaveData::parse(text).unwrap();
        assert_eq!(data.marbles[0].slot, slot(4));
        assert_eq!(data.moves.len(), 1);

        // A recognized label still needs its value
        assert!(matches!(
            SaveData::parse("Marble: Slot 4; Body;\n"),
            Err(PersistError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_moves_must_be_straight_jumps() {
        for text in [
            "Move: From 1; Passing 1; To 5; Marble Moon;\n",
            "Move: From 20; Passing 21; To 22; Marble Moon;\n",
            "Move: From 10; Passing 11; To 18; Marble Moon;\n",
        ] {
            assert!(
                matches!(SaveData::parse(text), Err(PersistError::Parse { line: 1, .. })),
                "{text:?}"
            );
        }
        assert!(SaveData::parse("Move: From 4; Passing 10; To 17; Marble Moon;\n").is_ok());
    }

    #[test]
    fn test_missing_undos_defaults_to_zero() {
        let data = SaveData::parse("Marble: Slot 0; Body Pluto;\n").unwrap();
        assert_eq!(data.undo_level, 0);
    }

    #[test]
    fn test_malformed_values_fail() {
        assert!(matches!(
            SaveData::parse("Undos many\n"),
            Err(PersistError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            SaveData::parse("\nMarble: Slot x; Body Earth;\n"),
            Err(PersistError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            SaveData::parse("Marble: Slot 40; Body Earth;\n"),
            Err(PersistError::InvalidSlot { value: 40, .. })
        ));
        assert!(matches!(
            SaveData::parse("Marble: Slot 3; Body Vulcan;\n"),
            Err(PersistError::UnknownBody { .. })
        ));
        assert!(matches!(
            SaveData::parse("Marble: Slot 3;\n"),
            Err(PersistError::Parse { .. })
        ));
        assert!(matches!(
            SaveData::parse("Move: From 3; Passing -1; To 5; Marble Moon;\n"),
            Err(PersistError::Parse { .. })
        ));
        assert!(matches!(
            SaveData::parse("Marble: Slot 3; Body Earth\n"),
            Err(PersistError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inconsistent_data() {
        let dup = "Marble: Slot 3; Body Earth;\nMarble: Slot 3; Body Mars;\n";
        let data = SaveData::parse(dup).unwrap();
        assert!(matches!(data.validate(), Err(PersistError::DuplicateSlot { .. })));

        let text = "Undos 2\nMove: From 18; Passing -1; To -1; Marble Moon;\n";
        let data = SaveData::parse(text).unwrap();
        assert!(matches!(
            data.validate(),
            Err(PersistError::UndoLevelOutOfRange { undo_level: 2, moves: 1 })
        ));

        let many: String = (0..38)
            .map(|i| format!("Marble: Slot {}; Body Earth;\n", i % 37))
            .collect();
        assert!(matches!(
            SaveData::parse(&many),
            Err(PersistError::TooManyMarbles { count: 38 })
        ));
    }

    #[test]
    fn test_session_round_trip_with_undo() {
        let mut session = GameSession::new(2024);
        session.animate_moves = false;
        session.attempt_select_or_move(Some(Slot::CENTRE), false);
        session.attempt_select_or_move(Some(slot(16)), false);
        assert_eq!(session.attempt_select_or_move(Some(slot(18)), false), MoveOutcome::Moved);
        session.attempt_select_or_move(Some(slot(4)), false);
        assert_eq!(session.attempt_select_or_move(Some(slot(17)), false), MoveOutcome::Moved);
        session.undo().unwrap();

        let text = SaveData::capture(&session).to_text();
        let data = SaveData::parse(&text).unwrap();
        assert_eq!(data.undo_level, 1);
        assert_eq!(data.moves, session.history().moves());

        let mut loaded = GameSession::new(1);
        data.restore(&mut loaded, Some("round".to_string())).unwrap();

        let alive = |s: &GameSession| {
            let mut v: Vec<_> = s
                .marbles()
                .iter()
                .filter(|m| m.is_alive())
                .map(|m| (m.slot(), m.body()))
                .collect();
            v.sort();
            v
        };
        assert_eq!(alive(&loaded), alive(&session));
        assert_eq!(loaded.history(), session.history());
        assert_eq!(loaded.marbles().len(), STARTING_COUNT);
        assert!(!loaded.is_dirty());
        assert_eq!(loaded.title(), "round - Marbles");

        // The loaded game can carry on from the cursor
        assert_eq!(loaded.redo(false), Ok(true));
        assert_eq!(loaded.history().undo_level(), 0);
    }

    #[test]
    fn test_failed_restore_leaves_session_alone() {
        let mut session = GameSession::new(5);
        session.attempt_select_or_move(Some(Slot::CENTRE), false);
        let before = session.history().clone();
        let data = SaveData::parse("Undos 3\n").unwrap();
        assert!(data.restore(&mut session, None).is_err());
        assert_eq!(session.history(), &before);
        assert_eq!(session.board().alive_count(), STARTING_COUNT - 1);
    }
}
