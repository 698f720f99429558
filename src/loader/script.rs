//! Script loader (.json format)
//!
//! A script is a named bundle of role definitions plus the canonical wake
//! order for the first night and for every other night.

use crate::core::{Role, RoleName, RoleType};
use crate::{GrimoireError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const TROUBLE_BREWING: &str = include_str!("../../data/scripts/trouble_brewing.json");

/// A script: role definitions and night orders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,

    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub first_night: Vec<RoleName>,

    #[serde(default)]
    pub other_night: Vec<RoleName>,
}

impl Script {
    /// The built-in Trouble Brewing script
    pub fn trouble_brewing() -> Result<Self> {
        ScriptLoader::parse(TROUBLE_BREWING)
    }

    /// Look up a role definition by exact name
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Wake order for the given night (`turn <= 1` is the first night)
    pub fn night_order(&self, turn: u32) -> &[RoleName] {
        if turn <= 1 {
            &self.first_night
        } else {
            &self.other_night
        }
    }

    /// All roles of a category, in script order
    pub fn roles_of_type(&self, role_type: RoleType) -> impl Iterator<Item = &Role> {
        self.roles.iter().filter(move |r| r.role_type == role_type)
    }

    /// Wake-order names with no matching role definition
    pub fn unknown_wake_names(&self) -> Vec<&RoleName> {
        self.first_night
            .iter()
            .chain(self.other_night.iter())
            .filter(|name| self.role(name.as_str()).is_none())
            .collect()
    }
}

/// Script loader for .json files
pub struct ScriptLoader;

impl ScriptLoader {
    /// Load a script from a .json file
    pub fn load_from_file(path: &Path) -> Result<Script> {
        let content = fs::read_to_string(path).map_err(GrimoireError::IoError)?;
        Self::parse(&content)
    }

    /// Parse a script from its JSON text
    pub fn parse(content: &str) -> Result<Script> {
        let script: Script = serde_json::from_str(content)
            .map_err(|e| GrimoireError::InvalidScriptFormat(e.to_string()))?;

        if script.roles.is_empty() {
            return Err(GrimoireError::InvalidScriptFormat(format!(
                "script '{}' defines no roles",
                script.name
            )));
        }

        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionType;

    #[test]
    fn test_parse_minimal_script() {
        let json = r#"{
            "name": "Tiny",
            "roles": [
                {"name": "Chef", "type": "Townsfolk", "ability": "Learn evil pairs."},
                {"name": "Imp", "type": "Demon", "action_type": "SelectPlayer"}
            ],
            "first_night": ["Chef"],
            "other_night": ["Imp"]
        }"#;

        let script = ScriptLoader::parse(json).unwrap();
        assert_eq!(script.name, "Tiny");
        assert_eq!(script.roles.len(), 2);
        assert_eq!(script.role("Imp").unwrap().action_type, ActionType::SelectPlayer);
        assert_eq!(script.night_order(0), &[RoleName::new("Chef")]);
        assert_eq!(script.night_order(1), &[RoleName::new("Chef")]);
        assert_eq!(script.night_order(2), &[RoleName::new("Imp")]);
        assert!(script.unknown_wake_names().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ScriptLoader::parse("not json"),
            Err(GrimoireError::InvalidScriptFormat(_))
        ));
        assert!(matches!(
            ScriptLoader::parse(r#"{"name": "Empty"}"#),
            Err(GrimoireError::InvalidScriptFormat(_))
        ));
    }

    #[test]
    fn test_unknown_wake_names() {
        let json = r#"{
            "name": "Broken",
            "roles": [{"name": "Chef", "type": "Townsfolk"}],
            "first_night": ["Chef", "Ghost"],
            "other_night": []
        }"#;
        let script = ScriptLoader::parse(json).unwrap();
        let unknown = script.unknown_wake_names();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].as_str(), "Ghost");
    }

    #[test]
    fn test_trouble_brewing_builtin() {
        let script = Script::trouble_brewing().unwrap();
        assert_eq!(script.name, "Trouble Brewing");
        assert_eq!(script.roles_of_type(RoleType::Demon).count(), 1);
        assert_eq!(script.roles_of_type(RoleType::Minion).count(), 4);
        assert_eq!(script.roles_of_type(RoleType::Outsider).count(), 4);
        assert_eq!(script.roles_of_type(RoleType::Townsfolk).count(), 13);
        assert!(script.unknown_wake_names().is_empty());
        assert_eq!(script.first_night[0], "Poisoner");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ScriptLoader::load_from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(GrimoireError::IoError(_))));
    }
}
