//! Fixed script controller for deterministic testing
//!
//! This controller follows a predetermined sequence of tokens, the same
//! tokens a Storyteller would type at the interactive prompt. Once the
//! script is exhausted it acts on every step, picks the first living player,
//! the first candidate role, and confirms.

use crate::core::RoleName;
use crate::game::controller::{
    is_cancel, parse_confirm, parse_role, parse_seat, parse_step_action, GrimoireView, StepAction,
    StorytellerController,
};
use crate::game::VerbosityLevel;
use serde::{Deserialize, Serialize};

/// A controller that replays a fixed list of input tokens
///
/// Serializable so a half-consumed script can be saved with a replay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedScriptController {
    /// The predetermined sequence of tokens
    script: Vec<String>,
    /// Current position in the script
    pub current_index: usize,
}

impl FixedScriptController {
    /// Create a controller from a token list
    ///
    /// # Example
    /// ```
    /// use grimoire_rs::game::FixedScriptController;
    ///
    /// // Poisoner acts on seat 5, then the Washerwoman step is skipped
    /// let controller = FixedScriptController::new(vec!["act", "5", "skip"]);
    /// assert_eq!(controller.remaining(), 3);
    /// ```
    pub fn new<S: Into<String>>(script: Vec<S>) -> Self {
        FixedScriptController {
            script: script.into_iter().map(Into::into).collect(),
            current_index: 0,
        }
    }

    /// Parse a comma- or newline-separated token list
    pub fn parse(text: &str) -> Self {
        let tokens: Vec<&str> = text
            .split([',', '\n'])
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.starts_with('#'))
            .collect();
        Self::new(tokens)
    }

    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.current_index)
    }

    /// Next token, or `None` once the script is exhausted
    fn next_token(&mut self) -> Option<&str> {
        let token = self.script.get(self.current_index)?;
        self.current_index += 1;
        Some(token.as_str())
    }

    fn note(view: &GrimoireView, message: &str) {
        view.logger()
            .categorized(VerbosityLevel::Verbose, "controller", &format!("SCRIPT {message}"));
    }
}

impl StorytellerController for FixedScriptController {
    fn choose_step_action(&mut self, view: &GrimoireView, role: &RoleName, _prompt: &str) -> StepAction {
        let Some(token) = self.next_token().map(str::to_string) else {
            return StepAction::Act;
        };
        let action = parse_step_action(&token).unwrap_or_else(|| {
            Self::note(view, &format!("unrecognized step token '{token}', acting"));
            StepAction::Act
        });
        Self::note(view, &format!("{role}: {action:?}"));
        action
    }

    fn choose_player(&mut self, view: &GrimoireView, _prompt: &str) -> Option<usize> {
        let first_living = view.living_seats().next().unwrap_or(0);
        let Some(token) = self.next_token().map(str::to_string) else {
            return Some(first_living);
        };
        if is_cancel(&token) {
            return None;
        }
        match parse_seat(&token, view.player_count()) {
            Some(seat) => {
                Self::note(view, &format!("chose seat {}", seat + 1));
                Some(seat)
            }
            None => {
                Self::note(view, &format!("bad seat '{token}', cancelling"));
                None
            }
        }
    }

    fn choose_role(&mut self, view: &GrimoireView, _prompt: &str, candidates: &[RoleName]) -> Option<RoleName> {
        let Some(token) = self.next_token().map(str::to_string) else {
            return candidates.first().cloned();
        };
        if is_cancel(&token) {
            return None;
        }
        // Anything else is taken as typed: the Storyteller may show a role
        // that was not offered
        let role = parse_role(&token, candidates).unwrap_or_else(|| RoleName::new(token.as_str()));
        Self::note(view, &format!("chose role {role}"));
        Some(role)
    }

    fn confirm(&mut self, _view: &GrimoireView, _prompt: &str) -> bool {
        match self.next_token() {
            None => true,
            Some(token) => parse_confirm(token).unwrap_or(false),
        }
    }
}
