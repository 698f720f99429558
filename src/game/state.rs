//! Main game state structure

use crate::core::{NightStatus, Player, PlayerId, PlayerName, RoleName, RoleType};
use crate::game::{next_living_neighbor, Distribution, GameLogger, Phase};
use crate::loader::Script;
use crate::undo::{GameSnapshot, UndoHistory};
use crate::{GrimoireError, Result};
use serde::{Deserialize, Serialize};

/// The grimoire: seating, roles, phase and log
///
/// Player order is the seating circle. This is the document that gets
/// persisted; `history` and `logger` are process-local and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Players in seating order
    pub players: Vec<Player>,

    pub phase: Phase,

    /// The script in use
    pub script: Script,

    /// Night counter: 0 until the first night, incremented on every Day -> Night
    pub turn: u32,

    /// Append-only game log
    #[serde(default)]
    pub log: Vec<String>,

    /// Undo snapshots
    #[serde(skip)]
    pub history: UndoHistory,

    /// Event echo for the Storyteller
    #[serde(skip)]
    pub logger: GameLogger,
}

impl GameState {
    /// Create an empty game in the Setup phase
    pub fn new(script: Script) -> Self {
        GameState {
            players: Vec::new(),
            phase: Phase::Setup,
            script,
            turn: 0,
            log: Vec::new(),
            history: UndoHistory::new(),
            logger: GameLogger::new(),
        }
    }

    /// Seat a new player at the end of the circle
    pub fn add_player(&mut self, name: impl Into<PlayerName>) -> PlayerId {
        let id = PlayerId::new(self.players.len() as u32 + 1);
        self.players.push(Player::new(id, name));
        id
    }

    pub fn player(&self, seat: usize) -> Result<&Player> {
        self.players.get(seat).ok_or_else(|| GrimoireError::seat_not_found(seat))
    }

    pub fn player_mut(&mut self, seat: usize) -> Result<&mut Player> {
        self.players.get_mut(seat).ok_or_else(|| GrimoireError::seat_not_found(seat))
    }

    /// Current seat of a player
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// First seat holding the named role
    pub fn seat_of_role(&self, role_name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.holds_role(role_name))
    }

    /// Seat of the player acting as `role_name`, or `NotFound`
    pub fn actor_seat(&self, role_name: &str) -> Result<usize> {
        self.seat_of_role(role_name)
            .ok_or_else(|| GrimoireError::NotFound(format!("Actor {role_name} not found")))
    }

    pub fn next_living_neighbor(&self, seat: usize, clockwise: bool) -> Option<usize> {
        next_living_neighbor(&self.players, seat, clockwise)
    }

    /// Distribution for the current roster size
    pub fn distribution(&self) -> Distribution {
        Distribution::for_player_count(self.players.len())
    }

    /// Wake order for the current night
    pub fn night_order(&self) -> &[RoleName] {
        self.script.night_order(self.turn)
    }

    /// Append to the game log and echo it
    pub fn append_log(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        self.logger.normal(&entry);
        self.log.push(entry);
    }

    /// Clear poison, drunkenness and protection for everyone
    pub fn reset_night_changes(&mut self) {
        for player in &mut self.players {
            player.reset_night_status();
        }
    }

    /// Move to the next phase; entering Night advances the turn counter
    pub fn advance_phase(&mut self) -> Phase {
        let next = self.phase.next();
        if next == Phase::Night {
            self.turn += 1;
        }
        self.phase = next;
        self.logger.minimal(&format!("Phase: {} (turn {})", self.phase, self.turn));
        next
    }

    // Manual edits

    pub fn swap_seats(&mut self, a: usize, b: usize) -> Result<()> {
        self.player(a)?;
        self.player(b)?;
        self.players.swap(a, b);
        Ok(())
    }

    /// Give the player at `seat` the script's definition of `role_name`
    ///
    /// Status flags and reminders are kept.
    pub fn set_player_role(&mut self, seat: usize, role_name: &str) -> Result<()> {
        let role = self
            .script
            .role(role_name)
            .cloned()
            .ok_or_else(|| GrimoireError::NotFound(format!("role {role_name} not found in script")))?;
        self.player_mut(seat)?.role = role;
        Ok(())
    }

    /// Flip alive/dead; returns the new status
    pub fn toggle_life(&mut self, seat: usize) -> Result<bool> {
        let player = self.player_mut(seat)?;
        player.is_alive = !player.is_alive;
        Ok(player.is_alive)
    }

    /// Flip a night status flag; returns the new value
    pub fn toggle_status(&mut self, seat: usize, status: NightStatus) -> Result<bool> {
        let player = self.player_mut(seat)?;
        let on = !player.status(status);
        player.set_status(status, on);
        Ok(on)
    }

    pub fn red_herring(&self) -> Option<usize> {
        self.players.iter().position(|p| p.is_red_herring)
    }

    /// Make `seat` the only red herring and log it; returns the log entry
    ///
    /// The red herring is a good player the Fortune Teller sees as a Demon,
    /// so a Demon seat is a `Validation` error.
    pub fn set_red_herring(&mut self, seat: usize) -> Result<String> {
        let player = self.player(seat)?;
        if player.role.role_type == RoleType::Demon {
            return Err(GrimoireError::Validation(format!(
                "{} is the {} and cannot be the red herring",
                player.name, player.role.name
            )));
        }
        for player in &mut self.players {
            player.is_red_herring = false;
        }
        let target = &mut self.players[seat];
        target.is_red_herring = true;
        let entry = format!("[Setup] Fortune Teller Red Herring set to {}", target.name);
        self.append_log(entry.clone());
        Ok(entry)
    }

    // Snapshot / undo

    /// Push a copy of players, phase and log onto the history
    pub fn snapshot(&mut self) {
        self.history.push(GameSnapshot {
            players: self.players.clone(),
            phase: self.phase,
            log: self.log.clone(),
        });
    }

    /// Restore the most recent snapshot
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self
            .history
            .pop()
            .ok_or_else(|| GrimoireError::InvalidState("no history to undo".to_string()))?;
        self.players = snapshot.players;
        self.phase = snapshot.phase;
        self.log = snapshot.log;
        self.logger.minimal("Undo: restored previous snapshot");
        Ok(())
    }
}
