//! Grimoire - Storyteller assistant for social-deduction night phases
//!
//! Tracks seating, roles and life status, and walks the Storyteller through
//! each night: wake order, per-role interactions, ability resolution with
//! poison/drunk malfunction, and snapshot-based undo.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod undo;

pub use error::{GrimoireError, Result};
