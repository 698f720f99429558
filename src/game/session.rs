//! Storyteller session: the command surface over one game
//!
//! The session owns the game, the running night walk, the ability registry
//! and the store. Every mutating command snapshots first and persists
//! after; a command that turns out to change nothing drops its snapshot so
//! undo never steps over a no-op.

use crate::core::{NightStatus, RoleType};
use crate::game::{
    AbilityRegistry, EmpathReading, GameLogger, GameState, NightWalk, Phase, VerbosityLevel, WalkCommand,
    WalkOutcome,
};
use crate::loader::GameStore;
use crate::{GrimoireError, Result};

pub struct Session {
    game: GameState,
    walk: Option<NightWalk>,
    /// The walk as it stood when each game snapshot was taken
    walk_history: Vec<Option<NightWalk>>,
    registry: AbilityRegistry,
    store: Box<dyn GameStore>,
}

impl Session {
    pub fn new(game: GameState, store: Box<dyn GameStore>) -> Self {
        Session {
            game,
            walk: None,
            walk_history: Vec::new(),
            registry: AbilityRegistry::new(),
            store,
        }
    }

    /// Load the saved game from `store`
    ///
    /// A game saved mid-night resumes without a walk; call
    /// `restart_night_walk` to walk it again.
    pub fn resume(store: Box<dyn GameStore>) -> Result<Self> {
        let game = store
            .load()?
            .ok_or_else(|| GrimoireError::NotFound("no saved game".to_string()))?;
        Ok(Self::new(game, store))
    }

    pub fn with_registry(mut self, registry: AbilityRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn walk(&self) -> Option<&NightWalk> {
        self.walk.as_ref()
    }

    pub fn registry(&self) -> &AbilityRegistry {
        &self.registry
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.game.logger
    }

    /// Write the game through the store
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.game)
    }

    /// Snapshot, run `command`, then persist or drop the snapshot
    fn mutate<T>(&mut self, command: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.game.snapshot();
        self.walk_history.push(self.walk.clone());
        let result = command(self);

        let unchanged = match self.game.history.peek() {
            Some(snap) => {
                snap.players == self.game.players && snap.phase == self.game.phase && snap.log == self.game.log
            }
            None => true,
        };
        if unchanged {
            self.game.history.pop();
            self.walk_history.pop();
        }

        match result {
            Ok(value) => {
                if !unchanged {
                    self.save()?;
                }
                Ok(value)
            }
            Err(e) => {
                self.game.logger.categorized(
                    VerbosityLevel::Minimal,
                    "error",
                    &format!("Error: {e}"),
                );
                Err(e)
            }
        }
    }

    // Queries

    pub fn phase(&self) -> Phase {
        self.game.phase
    }

    pub fn turn(&self) -> u32 {
        self.game.turn
    }

    pub fn log(&self) -> &[String] {
        &self.game.log
    }

    pub fn can_undo(&self) -> bool {
        !self.game.history.is_empty()
    }

    /// What the Storyteller is looking at right now
    pub fn prompt(&self) -> String {
        match &self.walk {
            Some(walk) => {
                let mut prompt = walk.prompt(&self.game);
                for line in walk.step_info(&self.game, &self.registry) {
                    prompt.push_str("\n  ");
                    prompt.push_str(&line);
                }
                prompt
            }
            None => format!("{} (night {})", self.game.phase, self.game.turn),
        }
    }

    /// Role, status, ability and reminder tokens for one seat
    pub fn player_info(&self, seat: usize) -> Result<Vec<String>> {
        self.registry.player_info(&self.game, seat)
    }

    pub fn empath_info(&self, seat: usize) -> Result<EmpathReading> {
        self.registry.empath_info(&self.game, seat)
    }

    // Commands

    /// Move to the next phase; entering Night starts the walk
    pub fn advance_phase(&mut self) -> Result<Phase> {
        self.mutate(|s| {
            let phase = s.game.advance_phase();
            s.walk = if phase == Phase::Night {
                Some(NightWalk::start(&mut s.game)).filter(|walk| !walk.is_finished())
            } else {
                None
            };
            Ok(phase)
        })
    }

    /// Walk the current night again from its first step
    ///
    /// Night flags are left as they are; they were reset when the night began.
    pub fn restart_night_walk(&mut self) -> Result<()> {
        if self.game.phase != Phase::Night {
            return Err(GrimoireError::InvalidState(format!(
                "cannot walk the night during {}",
                self.game.phase
            )));
        }
        self.walk = Some(NightWalk::resume(&self.game));
        Ok(())
    }

    /// Feed one command to the running walk
    pub fn night(&mut self, command: WalkCommand) -> Result<WalkOutcome> {
        if self.walk.is_none() {
            return Err(GrimoireError::InvalidState(
                "no night walk in progress".to_string(),
            ));
        }

        let outcome = self.mutate(|s| {
            let Session {
                game,
                walk,
                registry,
                ..
            } = s;
            match walk.as_mut() {
                Some(walk) => walk.handle(game, registry, command),
                None => Err(GrimoireError::InvalidState("no night walk in progress".to_string())),
            }
        })?;

        if self.walk.as_ref().is_some_and(NightWalk::is_finished) {
            self.walk = None;
        }
        Ok(outcome)
    }

    pub fn toggle_life(&mut self, seat: usize) -> Result<String> {
        self.mutate(|s| {
            let alive = s.game.toggle_life(seat)?;
            let player = &s.game.players[seat];
            Ok(format!("{} is now {}", player.name, if alive { "alive" } else { "dead" }))
        })
    }

    /// Flip poisoned, drunk or safe for one seat
    pub fn toggle_status(&mut self, seat: usize, status: NightStatus) -> Result<String> {
        self.mutate(|s| {
            let on = s.game.toggle_status(seat, status)?;
            let player = &s.game.players[seat];
            Ok(if on {
                format!("{} is now {status}", player.name)
            } else {
                format!("{} is no longer {status}", player.name)
            })
        })
    }

    pub fn swap_seats(&mut self, a: usize, b: usize) -> Result<String> {
        self.mutate(|s| {
            s.game.swap_seats(a, b)?;
            Ok(format!(
                "Swapped {} and {}",
                s.game.players[a].name, s.game.players[b].name
            ))
        })
    }

    pub fn reassign_role(&mut self, seat: usize, role_name: &str) -> Result<String> {
        self.mutate(|s| {
            s.game.set_player_role(seat, role_name)?;
            let player = &s.game.players[seat];
            Ok(format!("{} is now the {}", player.name, player.role.name))
        })
    }

    /// Set or clear the category a player registers as
    pub fn set_registration(&mut self, seat: usize, registers_as: Option<RoleType>) -> Result<String> {
        self.mutate(|s| {
            let player = s.game.player_mut(seat)?;
            player.registers_as = registers_as;
            Ok(match registers_as {
                Some(role_type) => format!("{} registers as {}", player.name, role_type),
                None => format!("{} registers as their own role", player.name),
            })
        })
    }

    pub fn set_red_herring(&mut self, seat: usize) -> Result<String> {
        self.mutate(|s| s.game.set_red_herring(seat))
    }

    pub fn add_reminder(&mut self, seat: usize, tag: &str) -> Result<String> {
        self.mutate(|s| {
            let player = s.game.player_mut(seat)?;
            player.add_reminder(tag);
            Ok(format!("Added reminder '{}' to {}", tag, player.name))
        })
    }

    pub fn remove_reminder(&mut self, seat: usize, tag: &str) -> Result<String> {
        self.mutate(|s| {
            let player = s.game.player_mut(seat)?;
            if player.remove_reminder(tag) {
                Ok(format!("Removed reminder '{}' from {}", tag, player.name))
            } else {
                Ok(format!("{} has no reminder '{}'", player.name, tag))
            }
        })
    }

    /// Delete the saved game and end the session
    pub fn wipe(mut self) -> Result<()> {
        self.store.clear()?;
        self.game.logger.normal("Saved game wiped");
        Ok(())
    }

    /// Restore the previous snapshot and persist
    ///
    /// The walk goes back to where it stood when the snapshot was taken, so
    /// an undone resolution is asked for again. Leaving the Night phase this
    /// way drops the walk.
    pub fn undo(&mut self) -> Result<()> {
        self.game.undo()?;
        let walk = self.walk_history.pop().flatten();
        self.walk = if self.game.phase == Phase::Night {
            walk
        } else {
            None
        };
        self.save()
    }
}
