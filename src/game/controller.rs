//! Storyteller controller trait and grimoire view
//!
//! This module defines the interface between the night walk and whoever
//! drives it (a human at the terminal, or a fixed script in tests). The
//! night loop calls the controller when a decision is needed, and the
//! controller inspects a read-only view of the grimoire to make it.

use crate::core::{Player, RoleId, RoleName};
use crate::game::{GameLogger, GameState, Phase};

/// What to do with the current step of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Wake the role and resolve its ability
    Act,
    /// Move on without acting
    Skip,
    /// Re-pick the Fortune Teller's red herring
    RedHerring,
    /// Stop walking for tonight
    Leave,
}

/// Read-only view of the grimoire for controllers
pub struct GrimoireView<'a> {
    game: &'a GameState,
}

impl<'a> GrimoireView<'a> {
    pub fn new(game: &'a GameState) -> Self {
        GrimoireView { game }
    }

    /// Players in seating order
    pub fn players(&self) -> &[Player] {
        &self.game.players
    }

    pub fn player_count(&self) -> usize {
        self.game.players.len()
    }

    pub fn player_name(&self, seat: usize) -> Option<&str> {
        self.game.players.get(seat).map(|p| p.name.as_str())
    }

    /// Seats of living players
    pub fn living_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.game
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive)
            .map(|(seat, _)| seat)
    }

    pub fn phase(&self) -> Phase {
        self.game.phase
    }

    pub fn turn(&self) -> u32 {
        self.game.turn
    }

    pub fn red_herring(&self) -> Option<usize> {
        self.game.red_herring()
    }

    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }

    /// The last `n` game log entries
    pub fn recent_log(&self, n: usize) -> &[String] {
        let start = self.game.log.len().saturating_sub(n);
        &self.game.log[start..]
    }
}

/// Storyteller controller trait
///
/// Implement this to connect the night walk to a UI or a test script.
/// Returning `None` (or `false` from `confirm`) cancels the current
/// interaction back to the step overview.
pub trait StorytellerController {
    /// Decide what to do with the step for `role`
    fn choose_step_action(&mut self, view: &GrimoireView, role: &RoleName, prompt: &str) -> StepAction;

    /// Pick a player by seat
    fn choose_player(&mut self, view: &GrimoireView, prompt: &str) -> Option<usize>;

    /// Pick a role to reveal from the offered candidates
    fn choose_role(&mut self, view: &GrimoireView, prompt: &str, candidates: &[RoleName]) -> Option<RoleName>;

    /// Confirm a reveal
    fn confirm(&mut self, view: &GrimoireView, prompt: &str) -> bool;

    /// Called with every resolved log line (for echo/replay)
    fn on_logged(&mut self, _view: &GrimoireView, _message: &str) {}

    /// Called when the night walk ends
    fn on_night_end(&mut self, _view: &GrimoireView) {}
}

// Token parsing shared by the fixed-script and interactive controllers.
// Seats are typed 1-based, as printed in the grimoire.

pub(crate) fn is_cancel(token: &str) -> bool {
    matches!(token.to_ascii_lowercase().as_str(), "c" | "cancel" | "back")
}

pub(crate) fn parse_step_action(token: &str) -> Option<StepAction> {
    match token.to_ascii_lowercase().as_str() {
        "" | "a" | "act" => Some(StepAction::Act),
        "s" | "skip" => Some(StepAction::Skip),
        "h" | "herring" => Some(StepAction::RedHerring),
        "l" | "leave" | "q" => Some(StepAction::Leave),
        _ => None,
    }
}

pub(crate) fn parse_seat(token: &str, player_count: usize) -> Option<usize> {
    let number: usize = token.parse().ok()?;
    (1..=player_count).contains(&number).then(|| number - 1)
}

pub(crate) fn parse_confirm(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Match a typed role against the candidates by canonical id, falling back
/// to a 1-based index into the list
pub(crate) fn parse_role(token: &str, candidates: &[RoleName]) -> Option<RoleName> {
    let id = RoleId::from_name(token);
    if let Some(found) = candidates.iter().find(|c| c.id() == id) {
        return Some(found.clone());
    }
    let index: usize = token.parse().ok()?;
    candidates.get(index.checked_sub(1)?).cloned()
}
