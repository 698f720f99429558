//! Game phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the game as the Storyteller sees it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    Day,
    Night,
}

impl Phase {
    /// Next phase: Setup and Night lead to Day, Day leads to Night
    pub fn next(&self) -> Phase {
        match self {
            Phase::Setup | Phase::Night => Phase::Day,
            Phase::Day => Phase::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Day => "Day",
            Phase::Night => "Night",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
