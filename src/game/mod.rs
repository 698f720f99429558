//! Core game state, the night walk and its drivers

pub mod abilities;
pub mod controller;
pub mod distribution;
pub mod fixed_script_controller;
pub mod interactive_controller;
pub mod logger;
pub mod night_loop;
pub mod night_queue;
pub mod night_walk;
pub mod phase;
pub mod seating;
pub mod session;
pub mod setup;
pub mod state;

pub use abilities::{
    is_demon_or_red_herring, AbilityRegistry, EmpathReading, FalseReading, FortuneReading, Interaction,
    RoleAbility, ShiftedReading,
};
pub use controller::{GrimoireView, StepAction, StorytellerController};
pub use distribution::{validate_player_count, Distribution, MAX_PLAYERS, MIN_PLAYERS};
pub use fixed_script_controller::FixedScriptController;
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use night_loop::{run_night, NightReport, DEFAULT_MAX_EVENTS};
pub use night_queue::NightQueue;
pub use night_walk::{NightWalk, WalkCommand, WalkOutcome, WalkState};
pub use phase::Phase;
pub use seating::{circle_order, next_living_neighbor, Neighbors};
pub use session::Session;
pub use setup::{assign_roles, deal_roles, deal_roles_seeded, new_game};
pub use state::GameState;
