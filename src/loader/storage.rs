//! Persistence for the grimoire
//!
//! The game is saved as one JSON document after every committed command.
//! Where it goes is decided by whoever builds the session: a file on disk
//! for the binary, an in-memory slot for tests.

use crate::game::GameState;
use crate::{GrimoireError, Result};
use std::path::{Path, PathBuf};

/// Default save file used by the binary
pub const DEFAULT_SAVE_PATH: &str = "game_state.json";

/// Storage handle for a single save slot
pub trait GameStore {
    /// Persist the current game (history is never persisted)
    fn save(&mut self, game: &GameState) -> Result<()>;

    /// Load the saved game, `None` if the slot is empty
    fn load(&self) -> Result<Option<GameState>>;

    /// Wipe the slot
    fn clear(&mut self) -> Result<()>;
}

fn to_json(game: &GameState) -> Result<String> {
    serde_json::to_string_pretty(game).map_err(|e| GrimoireError::SerializationError(e.to_string()))
}

fn from_json(json: &str) -> Result<GameState> {
    serde_json::from_str(json).map_err(|e| GrimoireError::SerializationError(e.to_string()))
}

/// Save slot backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        JsonFileStore::new(DEFAULT_SAVE_PATH)
    }
}

impl GameStore for JsonFileStore {
    fn save(&mut self, game: &GameState) -> Result<()> {
        let json = to_json(game)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GrimoireError::IoError(e)),
        }
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GrimoireError::IoError(e)),
        }
    }
}

/// Save slot held in memory as serialized JSON
///
/// Goes through the same serializer as the file store, so a save/load cycle
/// drops exactly what a real save would drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl GameStore for MemoryStore {
    fn save(&mut self, game: &GameState) -> Result<()> {
        self.json = Some(to_json(game)?);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>> {
        self.json.as_deref().map(from_json).transpose()
    }

    fn clear(&mut self) -> Result<()> {
        self.json = None;
        Ok(())
    }
}
