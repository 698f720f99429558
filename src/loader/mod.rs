//! Script loading and game persistence

pub mod script;
pub mod storage;

pub use script::{Script, ScriptLoader};
pub use storage::{GameStore, JsonFileStore, MemoryStore, DEFAULT_SAVE_PATH};
