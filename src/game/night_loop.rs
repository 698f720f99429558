//! Night loop: drive a session's night walk from a controller
//!
//! Each iteration turns the walk's current state into one controller
//! question and feeds the answer back as a `WalkCommand`. Rejected commands
//! (bad seat, command not valid here, a Demon as red herring) are reported
//! and the loop asks again; store failures end the loop.

use crate::game::controller::{GrimoireView, StepAction, StorytellerController};
use crate::game::{Session, WalkCommand, WalkOutcome, WalkState};
use crate::{GrimoireError, Result};

/// Guard against a controller that never finishes the night
pub const DEFAULT_MAX_EVENTS: usize = 500;

/// Summary of one run of the loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightReport {
    /// Resolved log lines, in order
    pub logged: Vec<String>,
    /// Commands sent to the walk, including rejected ones
    pub events: usize,
    pub rejected: usize,
    /// False when the event limit stopped the loop
    pub finished: bool,
}

/// Ask `controller` for decisions until the walk ends
pub fn run_night<C: StorytellerController + ?Sized>(
    session: &mut Session,
    controller: &mut C,
    max_events: usize,
) -> Result<NightReport> {
    let mut report = NightReport::default();

    loop {
        if session.walk().is_none() {
            report.finished = true;
            break;
        }
        if report.events >= max_events {
            session
                .logger_mut()
                .minimal(&format!("Night loop stopped after {max_events} events"));
            return Ok(report);
        }

        let command = {
            let Some(walk) = session.walk() else {
                break;
            };
            let view = GrimoireView::new(session.game());
            let prompt = session.prompt();
            match walk.state() {
                WalkState::Walk => {
                    let Some(role) = walk.current_role() else {
                        report.finished = true;
                        break;
                    };
                    match controller.choose_step_action(&view, role, &prompt) {
                        StepAction::Act => WalkCommand::Advance,
                        StepAction::Skip => WalkCommand::Skip,
                        StepAction::RedHerring => WalkCommand::ChooseRedHerring,
                        StepAction::Leave => WalkCommand::Leave,
                    }
                }
                WalkState::SelectTarget
                | WalkState::SelectFirst
                | WalkState::SelectSecond { .. }
                | WalkState::SelectRedHerring { .. } => controller
                    .choose_player(&view, &prompt)
                    .map_or(WalkCommand::Cancel, WalkCommand::Choose),
                WalkState::SelectRevealRole { candidates, .. } => controller
                    .choose_role(&view, &prompt, candidates)
                    .map_or(WalkCommand::Cancel, WalkCommand::ChooseRole),
                WalkState::Reveal { .. } | WalkState::FortuneReveal { .. } => {
                    if controller.confirm(&view, &prompt) {
                        WalkCommand::Confirm
                    } else {
                        WalkCommand::Cancel
                    }
                }
                WalkState::Finished => {
                    report.finished = true;
                    break;
                }
            }
        };

        report.events += 1;
        match session.night(command) {
            Ok(WalkOutcome::Logged(message)) => {
                controller.on_logged(&GrimoireView::new(session.game()), &message);
                report.logged.push(message);
            }
            Ok(_) => {}
            Err(GrimoireError::NotFound(_))
            | Err(GrimoireError::InvalidState(_))
            | Err(GrimoireError::Validation(_)) => {
                report.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    controller.on_night_end(&GrimoireView::new(session.game()));
    Ok(report)
}
