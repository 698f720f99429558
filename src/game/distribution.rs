//! Role distribution by player count

use crate::core::RoleType;
use crate::{GrimoireError, Result};

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 15;

/// How many roles of each category a game of a given size uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distribution {
    pub townsfolk: usize,
    pub outsider: usize,
    pub minion: usize,
    pub demon: usize,
}

impl Distribution {
    const fn new(townsfolk: usize, outsider: usize, minion: usize, demon: usize) -> Self {
        Distribution {
            townsfolk,
            outsider,
            minion,
            demon,
        }
    }

    /// Official setup table for 5-15 players
    ///
    /// Fewer than five players get all Townsfolk and no evil team; more than
    /// fifteen get the fifteen-player row.
    pub fn for_player_count(player_count: usize) -> Self {
        match player_count {
            0..=4 => Distribution::new(player_count, 0, 0, 0),
            5 => Distribution::new(3, 0, 1, 1),
            6 => Distribution::new(3, 1, 1, 1),
            7 => Distribution::new(5, 0, 1, 1),
            8 => Distribution::new(5, 1, 1, 1),
            9 => Distribution::new(5, 2, 1, 1),
            10 => Distribution::new(7, 0, 2, 1),
            11 => Distribution::new(7, 1, 2, 1),
            12 => Distribution::new(7, 2, 2, 1),
            13 => Distribution::new(9, 0, 3, 1),
            14 => Distribution::new(9, 1, 3, 1),
            _ => Distribution::new(9, 2, 3, 1),
        }
    }

    pub fn total(&self) -> usize {
        self.townsfolk + self.outsider + self.minion + self.demon
    }

    /// Count for one category (Travelers are never dealt)
    pub fn count_for(&self, role_type: RoleType) -> usize {
        match role_type {
            RoleType::Townsfolk => self.townsfolk,
            RoleType::Outsider => self.outsider,
            RoleType::Minion => self.minion,
            RoleType::Demon => self.demon,
            RoleType::Traveler => 0,
        }
    }
}

/// Reject player counts the setup table does not cover
pub fn validate_player_count(player_count: usize) -> Result<()> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        Ok(())
    } else {
        Err(GrimoireError::Validation(format!(
            "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {player_count}"
        )))
    }
}
