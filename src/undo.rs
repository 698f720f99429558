//! Snapshot history for undo
//!
//! Each snapshot is a plain value copy of the players, the phase and the log.
//! The turn counter and the script are not part of a snapshot.

use crate::core::Player;
use crate::game::Phase;

/// Saved copy of the mutable part of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub phase: Phase,
    pub log: Vec<String>,
}

/// Stack of snapshots (most recent at end)
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    snapshots: Vec<GameSnapshot>,
}

impl UndoHistory {
    pub fn new() -> Self {
        UndoHistory {
            snapshots: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: GameSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Get the most recent snapshot without removing it
    pub fn peek(&self) -> Option<&GameSnapshot> {
        self.snapshots.last()
    }

    /// Pop and return the most recent snapshot
    pub fn pop(&mut self) -> Option<GameSnapshot> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
