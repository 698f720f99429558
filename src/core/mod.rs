//! Core grimoire types and entities

pub mod entity;
pub mod player;
pub mod role;
pub mod types;

pub use entity::PlayerId;
pub use player::{NightStatus, Player, Reminders};
pub use role::{ActionType, Role, RoleType};
pub use types::{PlayerName, RoleId, RoleName};
