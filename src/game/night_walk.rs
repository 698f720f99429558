//! Night walk: stepping the Storyteller through tonight's wake order
//!
//! A walk is started once per night. It resets the night flags, builds the
//! queue, and then consumes one `WalkCommand` at a time. Each role's step
//! either auto-advances or branches into the interaction its ability needs;
//! resolution appends a `[Night] ` entry to the game log and moves on.
//!
//! Commands that make no sense in the current state fail with
//! `InvalidState` and leave both the walk and the game untouched.

use crate::core::RoleName;
use crate::game::{AbilityRegistry, GameState, Interaction, NightQueue, VerbosityLevel};
use crate::{GrimoireError, Result};
use std::fmt;

const NIGHT_PREFIX: &str = "[Night] ";

/// Where the walk currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkState {
    /// The current step is shown; waiting to act or skip
    Walk,
    /// Single-target role: pick the target
    SelectTarget,
    /// Two-player interaction: pick the first player
    SelectFirst,
    SelectSecond { first: usize },
    /// Info token: pick the role to show
    SelectRevealRole {
        first: usize,
        second: usize,
        candidates: Vec<RoleName>,
    },
    /// Info token: ready to show
    Reveal {
        first: usize,
        second: usize,
        role: RoleName,
    },
    /// Fortune Teller red herring. `forced` when it has to be picked before
    /// the check can happen.
    SelectRedHerring { forced: bool },
    /// Fortune Teller: ready to show the result
    FortuneReveal { first: usize, second: usize },
    /// Walk over; control is back with the overview
    Finished,
}

impl WalkState {
    fn name(&self) -> &'static str {
        match self {
            WalkState::Walk => "Walk",
            WalkState::SelectTarget => "SelectTarget",
            WalkState::SelectFirst => "SelectFirst",
            WalkState::SelectSecond { .. } => "SelectSecond",
            WalkState::SelectRevealRole { .. } => "SelectRevealRole",
            WalkState::Reveal { .. } => "Reveal",
            WalkState::SelectRedHerring { .. } => "SelectRedHerring",
            WalkState::FortuneReveal { .. } => "FortuneReveal",
            WalkState::Finished => "Finished",
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input to the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkCommand {
    /// Act on the current step
    Advance,
    /// Move past the current step without acting
    Skip,
    /// Re-pick the Fortune Teller's red herring
    ChooseRedHerring,
    /// Pick a player by seat
    Choose(usize),
    /// Pick the role to reveal
    ChooseRole(RoleName),
    Confirm,
    /// Back to `Walk` with nothing changed
    Cancel,
    /// Abandon the rest of the night
    Leave,
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Moved within the current step; more input needed
    Waiting,
    /// Moved to the next step without logging
    Advanced,
    /// Something was resolved and logged
    Logged(String),
    /// The walk is over
    Finished,
}

/// Traversal of one night's queue
#[derive(Debug, Clone)]
pub struct NightWalk {
    queue: NightQueue,
    step: usize,
    state: WalkState,
}

impl NightWalk {
    /// Reset night flags, then build the queue for the current turn
    pub fn start(game: &mut GameState) -> Self {
        game.reset_night_changes();
        Self::resume(game)
    }

    /// Build the queue for the current turn without touching night flags
    ///
    /// For picking a night back up (after loading a save or leaving the
    /// walk early); the walk starts again from the first step.
    pub fn resume(game: &GameState) -> Self {
        let queue = NightQueue::build(game.night_order(), &game.players);
        game.logger.categorized(
            VerbosityLevel::Verbose,
            "night_walk",
            &format!("Night {} walk: {} steps", game.turn, queue.len()),
        );

        let state = if queue.is_empty() {
            WalkState::Finished
        } else {
            WalkState::Walk
        };
        NightWalk {
            queue,
            step: 0,
            state,
        }
    }

    pub fn state(&self) -> &WalkState {
        &self.state
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn queue(&self) -> &NightQueue {
        &self.queue
    }

    pub fn is_finished(&self) -> bool {
        self.state == WalkState::Finished
    }

    /// Role of the current step, if the walk is still running
    pub fn current_role(&self) -> Option<&RoleName> {
        if self.is_finished() {
            return None;
        }
        self.queue.get(self.step)
    }

    /// Interaction for the current role; roles missing from the script are passive
    pub fn current_interaction(&self, game: &GameState, registry: &AbilityRegistry) -> Interaction {
        self.current_role()
            .and_then(|name| game.script.role(name.as_str()))
            .map(|role| registry.interaction(role))
            .unwrap_or(Interaction::Passive)
    }

    /// Apply one command
    pub fn handle(
        &mut self,
        game: &mut GameState,
        registry: &AbilityRegistry,
        command: WalkCommand,
    ) -> Result<WalkOutcome> {
        let before = self.state.name();
        let outcome = self.dispatch(game, registry, command)?;
        game.logger.categorized(
            VerbosityLevel::Verbose,
            "night_walk",
            &format!("{before} -> {} (step {}/{})", self.state, self.step, self.queue.len()),
        );
        Ok(outcome)
    }

    fn dispatch(
        &mut self,
        game: &mut GameState,
        registry: &AbilityRegistry,
        command: WalkCommand,
    ) -> Result<WalkOutcome> {
        if command == WalkCommand::Leave {
            self.state = WalkState::Finished;
            return Ok(WalkOutcome::Finished);
        }

        let role = match self.current_role() {
            Some(role) => role.clone(),
            None => return Err(self.invalid(&command)),
        };

        match (self.state.clone(), command) {
            (WalkState::Walk, WalkCommand::Advance) => {
                if game.seat_of_role(role.as_str()).is_none() {
                    return Ok(self.next_step());
                }
                match self.current_interaction(game, registry) {
                    Interaction::Passive => Ok(self.next_step()),
                    Interaction::SingleTarget => {
                        self.state = WalkState::SelectTarget;
                        Ok(WalkOutcome::Waiting)
                    }
                    Interaction::InfoToken => {
                        self.state = WalkState::SelectFirst;
                        Ok(WalkOutcome::Waiting)
                    }
                    Interaction::FortuneTeller => {
                        self.state = if game.red_herring().is_none() {
                            WalkState::SelectRedHerring { forced: true }
                        } else {
                            WalkState::SelectFirst
                        };
                        Ok(WalkOutcome::Waiting)
                    }
                }
            }

            (WalkState::Walk, WalkCommand::Skip) => Ok(self.next_step()),

            (WalkState::Walk, WalkCommand::ChooseRedHerring)
                if self.current_interaction(game, registry) == Interaction::FortuneTeller =>
            {
                self.state = WalkState::SelectRedHerring { forced: false };
                Ok(WalkOutcome::Waiting)
            }

            (WalkState::SelectTarget, WalkCommand::Choose(target)) => {
                let message = registry.resolve_night_action(game, role.as_str(), target)?;
                Ok(self.log_and_advance(game, message))
            }

            (WalkState::SelectFirst, WalkCommand::Choose(first)) => {
                game.player(first)?;
                self.state = WalkState::SelectSecond { first };
                Ok(WalkOutcome::Waiting)
            }

            (WalkState::SelectSecond { first }, WalkCommand::Choose(second)) => {
                game.player(second)?;
                self.state = if self.current_interaction(game, registry) == Interaction::FortuneTeller {
                    WalkState::FortuneReveal { first, second }
                } else {
                    let candidates = registry.reveal_candidates(game, role.as_str(), first, second)?;
                    WalkState::SelectRevealRole {
                        first,
                        second,
                        candidates,
                    }
                };
                Ok(WalkOutcome::Waiting)
            }

            (WalkState::SelectRevealRole { first, second, .. }, WalkCommand::ChooseRole(revealed)) => {
                if game.script.role(revealed.as_str()).is_none() {
                    return Err(GrimoireError::NotFound(format!(
                        "role {revealed} not found in script"
                    )));
                }
                self.state = WalkState::Reveal {
                    first,
                    second,
                    role: revealed,
                };
                Ok(WalkOutcome::Waiting)
            }

            (WalkState::Reveal { first, second, role: revealed }, WalkCommand::Confirm) => {
                let message =
                    registry.resolve_info_action(game, role.as_str(), first, second, revealed.as_str())?;
                Ok(self.log_and_advance(game, message))
            }

            (WalkState::SelectRedHerring { forced }, WalkCommand::Choose(seat)) => {
                let entry = game.set_red_herring(seat)?;
                self.state = if forced {
                    WalkState::SelectFirst
                } else {
                    WalkState::Walk
                };
                Ok(WalkOutcome::Logged(entry))
            }

            (WalkState::FortuneReveal { first, second }, WalkCommand::Confirm) => {
                let actor = game.actor_seat(role.as_str())?;
                let reading = registry.resolve_fortune_teller(game, actor, first, second)?;
                Ok(self.log_and_advance(game, reading.message))
            }

            (WalkState::Walk, WalkCommand::Cancel) => Err(self.invalid(&WalkCommand::Cancel)),

            (_, WalkCommand::Cancel) => {
                self.state = WalkState::Walk;
                Ok(WalkOutcome::Waiting)
            }

            (_, command) => Err(self.invalid(&command)),
        }
    }

    fn invalid(&self, command: &WalkCommand) -> GrimoireError {
        GrimoireError::InvalidState(format!("{command:?} is not valid in {}", self.state))
    }

    fn next_step(&mut self) -> WalkOutcome {
        self.step += 1;
        if self.step >= self.queue.len() {
            self.state = WalkState::Finished;
            WalkOutcome::Finished
        } else {
            self.state = WalkState::Walk;
            WalkOutcome::Advanced
        }
    }

    fn log_and_advance(&mut self, game: &mut GameState, message: String) -> WalkOutcome {
        game.append_log(format!("{NIGHT_PREFIX}{message}"));
        self.next_step();
        WalkOutcome::Logged(message)
    }

    /// Notes on the current role's holder while their step is shown
    ///
    /// Empty when the role is not in play or the walk is mid-interaction.
    pub fn step_info(&self, game: &GameState, registry: &AbilityRegistry) -> Vec<String> {
        if self.state != WalkState::Walk {
            return Vec::new();
        }
        self.current_role()
            .and_then(|role| game.seat_of_role(role.as_str()))
            .and_then(|seat| registry.player_info(game, seat).ok())
            .unwrap_or_default()
    }

    /// One-line description of what the walk is waiting for
    pub fn prompt(&self, game: &GameState) -> String {
        let Some(role) = self.current_role() else {
            return "The night is over".to_string();
        };
        let name = |seat: usize| {
            game.players
                .get(seat)
                .map(|p| p.name.to_string())
                .unwrap_or_else(|| format!("seat {seat}"))
        };

        match &self.state {
            WalkState::Walk => {
                let holder = match game.seat_of_role(role.as_str()) {
                    Some(seat) => name(seat),
                    None => "not in play".to_string(),
                };
                format!("Step {}/{}: {} ({})", self.step + 1, self.queue.len(), role, holder)
            }
            WalkState::SelectTarget => format!("{role}: choose a target"),
            WalkState::SelectFirst => format!("{role}: choose the first player"),
            WalkState::SelectSecond { first } => {
                format!("{role}: {} and who else?", name(*first))
            }
            WalkState::SelectRevealRole { candidates, .. } => {
                let list: Vec<&str> = candidates.iter().map(|c| c.as_str()).collect();
                format!("{role}: which role to show? [{}]", list.join(", "))
            }
            WalkState::Reveal { first, second, role: revealed } => format!(
                "{role}: show that {} or {} is the {revealed}",
                name(*first),
                name(*second)
            ),
            WalkState::SelectRedHerring { .. } => {
                "Fortune Teller: choose the red herring".to_string()
            }
            WalkState::FortuneReveal { first, second } => {
                format!("{role}: reveal the result for {} & {}", name(*first), name(*second))
            }
            WalkState::Finished => "The night is over".to_string(),
        }
    }
}
