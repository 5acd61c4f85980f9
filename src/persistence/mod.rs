//! Save/load persistence
//!
//! Features:
//! - Line-oriented text saves, one file per named game
//! - Atomic writes (tmp file, then rename over the old save)
//! - A failed load leaves the running game untouched

pub mod format;

use std::fs;
use std::path::{Path, PathBuf};

pub use format::{MarbleRecord, SaveData};

use crate::error::{PersistError, Result};
use crate::sim::{GameSession, MessageKind};

/// Directory saves go in unless told otherwise
pub const DEFAULT_SAVE_DIR: &str = "Saves";
pub const SAVE_EXTENSION: &str = "txt";

pub const SAVE_SUCCEEDED_TICKS: u32 = 360;
pub const SAVE_FAILED_TICKS: u32 = 480;
pub const LOAD_FAILED_TICKS: u32 = 420;
pub const INVALID_NAME_TICKS: u32 = 240;

/// Characters that cannot appear in a save name on any supported platform
pub fn is_invalid_file_name_char(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

pub fn validate_save_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.chars().any(is_invalid_file_name_char) {
        return Err(PersistError::InvalidSaveName(name.to_string()));
    }
    Ok(())
}

/// A folder of `<name>.txt` saves
#[derive(Debug, Clone)]
pub struct SaveDirectory {
    root: PathBuf,
}

impl Default for SaveDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the save called `name`
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_save_name(name)?;
        Ok(self.root.join(format!("{name}.{SAVE_EXTENSION}")))
    }

    /// Names of all saves, sorted. A missing directory has no saves.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let extension = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || extension != Some(SAVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Write `session` to the save called `name`, creating the directory if
    /// needed. Shows the outcome as a transient message.
    pub fn save(&self, name: &str, session: &mut GameSession) -> Result<PathBuf> {
        match self.write(name, &SaveData::capture(session)) {
            Ok(path) => {
                session.mark_saved(name);
                session.show_message(
                    "Game Saved Successfully",
                    SAVE_SUCCEEDED_TICKS,
                    MessageKind::Success,
                );
                log::info!("Saved game to {}", path.display());
                Ok(path)
            }
            Err(err) => {
                log::warn!("Save to {name:?} failed: {err}");
                match &err {
                    PersistError::InvalidSaveName(_) => session.show_message(
                        "Invalid File Name Character",
                        INVALID_NAME_TICKS,
                        MessageKind::Info,
                    ),
                    _ => {
                        session.show_message("Save Failed", SAVE_FAILED_TICKS, MessageKind::Warning)
                    }
                }
                Err(err)
            }
        }
    }

    /// Replace the game in `session` with the save called `name`.
    /// On any error the session keeps its current game.
    pub fn load(&self, name: &str, session: &mut GameSession) -> Result<()> {
        let result = self
            .read(name)
            .and_then(|data| data.restore(session, Some(name.to_string())));
        match &result {
            Ok(()) => log::info!("Loaded game {name:?}"),
            Err(err) => {
                log::warn!("Load of {name:?} failed: {err}");
                session.show_message("Load Failed", LOAD_FAILED_TICKS, MessageKind::Warning);
            }
        }
        result
    }

    /// Parse the save called `name` without touching any session
    pub fn read(&self, name: &str) -> Result<SaveData> {
        let text = fs::read_to_string(self.path_for(name)?)?;
        let data = SaveData::parse(&text)?;
        data.validate()?;
        Ok(data)
    }

    fn write(&self, name: &str, data: &SaveData) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root)?;
        let tmp = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
        fs::write(&tmp, data.to_text())?;
        fs::rename(&tmp, &path)?;
        Ok(path)
    }
}
