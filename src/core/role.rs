//! Role definitions as they appear in a script

use crate::core::{RoleId, RoleName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleType {
    #[default]
    Townsfolk,
    Outsider,
    Minion,
    Demon,
    Traveler,
}

impl RoleType {
    /// Minions and Demons
    pub fn is_evil(&self) -> bool {
        matches!(self, RoleType::Minion | RoleType::Demon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Townsfolk => "Townsfolk",
            RoleType::Outsider => "Outsider",
            RoleType::Minion => "Minion",
            RoleType::Demon => "Demon",
            RoleType::Traveler => "Traveler",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "townsfolk" => Ok(RoleType::Townsfolk),
            "outsider" => Ok(RoleType::Outsider),
            "minion" => Ok(RoleType::Minion),
            "demon" => Ok(RoleType::Demon),
            "traveler" | "traveller" => Ok(RoleType::Traveler),
            _ => Err(format!("unknown role type '{s}'")),
        }
    }
}

/// How the Storyteller interacts with a role when it wakes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[default]
    None,
    SelectPlayer,
    SelectRole,
    YesNo,
    /// Two players plus one revealed role (e.g. Washerwoman)
    InfoToken,
}

/// A role definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: RoleName,

    #[serde(rename = "type")]
    pub role_type: RoleType,

    #[serde(default)]
    pub ability: String,

    #[serde(default)]
    pub action_type: ActionType,

    #[serde(default)]
    pub reminders: Vec<String>,
}

impl Role {
    pub fn new(name: impl Into<RoleName>, role_type: RoleType, action_type: ActionType) -> Self {
        Role {
            name: name.into(),
            role_type,
            ability: String::new(),
            action_type,
            reminders: Vec::new(),
        }
    }

    pub fn id(&self) -> RoleId {
        self.name.id()
    }

    /// Placeholder role held before assignment
    pub fn is_unassigned(&self) -> bool {
        self.name.is_empty()
    }
}
