//! Interactive controller for a Storyteller at the terminal
//!
//! Reads choices line by line and prints prompts. Informational commands
//! ('?' for help, 'g' for the grimoire, 'l' for the recent log) re-prompt.
//! End of input behaves like cancelling, and leaves the walk at a step.

use crate::core::RoleName;
use crate::game::controller::{
    is_cancel, parse_confirm, parse_role, parse_seat, parse_step_action, GrimoireView, StepAction,
    StorytellerController,
};
use std::io::{self, BufRead, Write};

/// A controller that prompts the Storyteller for decisions
pub struct InteractiveController<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl InteractiveController<io::StdinLock<'static>, io::Stdout> {
    /// Controller on the process's stdin/stdout
    pub fn stdio() -> Self {
        InteractiveController::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        InteractiveController { input, output }
    }

    /// Prompt until a non-informational line arrives; `None` at end of input
    fn read_choice(&mut self, view: &GrimoireView, prompt: &str) -> Option<String> {
        loop {
            let _ = write!(self.output, "{prompt} > ");
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    let _ = writeln!(self.output, "Error reading input: {e}");
                    return None;
                }
            }

            match line.trim() {
                "?" => self.display_help(),
                "g" => self.display_grimoire(view),
                "log" => self.display_log(view),
                other => return Some(other.to_string()),
            }
        }
    }

    fn display_help(&mut self) {
        let _ = writeln!(
            self.output,
            "\n=== Help ===\n\
             At a step:  Enter/act, skip, herring (Fortune Teller), leave\n\
             Players:    seat number as shown in the grimoire\n\
             Roles:      role name or its number in the list\n\
             Reveal:     Enter/y to confirm, n to go back\n\
             Anywhere:   cancel, ? help, g grimoire, log recent log\n"
        );
    }

    fn display_grimoire(&mut self, view: &GrimoireView) {
        let _ = writeln!(self.output, "\n=== Grimoire (night {}) ===", view.turn());
        for (seat, player) in view.players().iter().enumerate() {
            let mut flags = Vec::new();
            if !player.is_alive {
                flags.push("dead");
            }
            if player.is_poisoned {
                flags.push("poisoned");
            }
            if player.is_drunk {
                flags.push("drunk");
            }
            if player.is_protected {
                flags.push("safe");
            }
            if player.is_red_herring {
                flags.push("red herring");
            }
            let _ = writeln!(
                self.output,
                "  [{}] {} - {} {}",
                seat + 1,
                player.name,
                player.role.name,
                if flags.is_empty() {
                    String::new()
                } else {
                    format!("({})", flags.join(", "))
                }
            );
        }
        let _ = writeln!(self.output);
    }

    fn display_log(&mut self, view: &GrimoireView) {
        for entry in view.recent_log(10) {
            let _ = writeln!(self.output, "  {entry}");
        }
    }
}

impl<R: BufRead, W: Write> StorytellerController for InteractiveController<R, W> {
    fn choose_step_action(&mut self, view: &GrimoireView, _role: &RoleName, prompt: &str) -> StepAction {
        loop {
            let Some(line) = self.read_choice(view, prompt) else {
                return StepAction::Leave;
            };
            match parse_step_action(&line) {
                Some(action) => return action,
                None => {
                    let _ = writeln!(self.output, "Enter act, skip, herring or leave ('?' for help).");
                }
            }
        }
    }

    fn choose_player(&mut self, view: &GrimoireView, prompt: &str) -> Option<usize> {
        loop {
            let line = self.read_choice(view, prompt)?;
            if is_cancel(&line) {
                return None;
            }
            match parse_seat(&line, view.player_count()) {
                Some(seat) => return Some(seat),
                None => {
                    let _ = writeln!(self.output, "Enter a seat from 1 to {}.", view.player_count());
                }
            }
        }
    }

    fn choose_role(&mut self, view: &GrimoireView, prompt: &str, candidates: &[RoleName]) -> Option<RoleName> {
        for (i, role) in candidates.iter().enumerate() {
            let _ = writeln!(self.output, "  [{}] {}", i + 1, role);
        }
        loop {
            let line = self.read_choice(view, prompt)?;
            if is_cancel(&line) {
                return None;
            }
            if let Some(role) = parse_role(&line, candidates) {
                return Some(role);
            }
            if !line.is_empty() && line.parse::<usize>().is_err() {
                return Some(RoleName::new(line));
            }
            let _ = writeln!(self.output, "Enter a role name or a number from the list.");
        }
    }

    fn confirm(&mut self, view: &GrimoireView, prompt: &str) -> bool {
        loop {
            let Some(line) = self.read_choice(view, prompt) else {
                return false;
            };
            if is_cancel(&line) {
                return false;
            }
            match parse_confirm(&line) {
                Some(answer) => return answer,
                None => {
                    let _ = writeln!(self.output, "Enter y or n.");
                }
            }
        }
    }

    fn on_logged(&mut self, _view: &GrimoireView, message: &str) {
        let _ = writeln!(self.output, ">> {message}");
    }

    fn on_night_end(&mut self, view: &GrimoireView) {
        let _ = writeln!(self.output, "Night {} is over.", view.turn());
    }
}
