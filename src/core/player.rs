//! Player representation

use crate::core::{PlayerId, PlayerName, Role, RoleType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Reminder tags placed next to a player's token
pub type Reminders = SmallVec<[String; 4]>;

/// Night status flags the Storyteller can flip by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NightStatus {
    Poisoned,
    Drunk,
    Protected,
}

impl NightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NightStatus::Poisoned => "poisoned",
            NightStatus::Drunk => "drunk",
            NightStatus::Protected => "safe",
        }
    }
}

impl std::fmt::Display for NightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seated player in the grimoire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Current role (empty placeholder until assigned)
    pub role: Role,

    pub is_alive: bool,

    /// Has the player spent their ghost vote?
    #[serde(default, alias = "shroud")]
    pub used_ghost_vote: bool,

    #[serde(default)]
    pub reminders: Reminders,

    /// Category this player shows to information abilities, if not their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registers_as: Option<RoleType>,

    // Night status, cleared at the start of every night
    #[serde(default)]
    pub is_poisoned: bool,
    #[serde(default)]
    pub is_drunk: bool,
    #[serde(default)]
    pub is_protected: bool,

    /// Fortune Teller's red herring (at most one per game)
    #[serde(default)]
    pub is_red_herring: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>) -> Self {
        Player {
            id,
            name: name.into(),
            role: Role::default(),
            is_alive: true,
            used_ghost_vote: false,
            reminders: Reminders::new(),
            registers_as: None,
            is_poisoned: false,
            is_drunk: false,
            is_protected: false,
            is_red_herring: false,
        }
    }

    /// Poisoned or drunk: abilities and readings are unreliable
    pub fn is_malfunctioning(&self) -> bool {
        self.is_poisoned || self.is_drunk
    }

    /// Category seen by information abilities
    pub fn registered_type(&self) -> RoleType {
        self.registers_as.unwrap_or(self.role.role_type)
    }

    pub fn holds_role(&self, role_name: &str) -> bool {
        self.role.name == role_name
    }

    pub fn reset_night_status(&mut self) {
        self.is_poisoned = false;
        self.is_drunk = false;
        self.is_protected = false;
    }

    pub fn status(&self, status: NightStatus) -> bool {
        match status {
            NightStatus::Poisoned => self.is_poisoned,
            NightStatus::Drunk => self.is_drunk,
            NightStatus::Protected => self.is_protected,
        }
    }

    pub fn set_status(&mut self, status: NightStatus, on: bool) {
        let flag = match status {
            NightStatus::Poisoned => &mut self.is_poisoned,
            NightStatus::Drunk => &mut self.is_drunk,
            NightStatus::Protected => &mut self.is_protected,
        };
        *flag = on;
    }

    /// Short grimoire notes: life, night flags, herring, registration, reminders
    pub fn status_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if !self.is_alive {
            notes.push("dead".to_string());
        }
        for status in [NightStatus::Poisoned, NightStatus::Drunk, NightStatus::Protected] {
            if self.status(status) {
                notes.push(status.to_string());
            }
        }
        if self.is_red_herring {
            notes.push("red herring".to_string());
        }
        if let Some(role_type) = self.registers_as {
            notes.push(format!("registers as {role_type}"));
        }
        notes.extend(self.reminders.iter().map(|r| format!("[{r}]")));
        notes
    }

    pub fn add_reminder(&mut self, tag: impl Into<String>) {
        self.reminders.push(tag.into());
    }

    /// Remove the first reminder matching `tag`; returns whether one was found
    pub fn remove_reminder(&mut self, tag: &str) -> bool {
        match self.reminders.iter().position(|r| r == tag) {
            Some(pos) => {
                self.reminders.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionType;

    #[test]
    fn test_player_creation() {
        let player = Player::new(PlayerId::new(1), "Alice");

        assert_eq!(player.id, PlayerId::new(1));
        assert_eq!(player.name.as_str(), "Alice");
        assert!(player.is_alive);
        assert!(player.role.is_unassigned());
        assert!(!player.is_malfunctioning());
    }

    #[test]
    fn test_night_status_reset_keeps_red_herring() {
        let mut player = Player::new(PlayerId::new(1), "Bob");
        player.is_poisoned = true;
        player.is_drunk = true;
        player.is_protected = true;
        player.is_red_herring = true;
        assert!(player.is_malfunctioning());

        player.reset_night_status();
        assert!(!player.is_poisoned);
        assert!(!player.is_drunk);
        assert!(!player.is_protected);
        assert!(player.is_red_herring);
    }

    #[test]
    fn test_registration_override() {
        let mut player = Player::new(PlayerId::new(2), "Cora");
        player.role = Role::new("Recluse", RoleType::Outsider, ActionType::None);
        assert_eq!(player.registered_type(), RoleType::Outsider);

        player.registers_as = Some(RoleType::Demon);
        assert_eq!(player.registered_type(), RoleType::Demon);
    }

    #[test]
    fn test_set_status() {
        let mut player = Player::new(PlayerId::new(1), "Ben");
        player.set_status(NightStatus::Poisoned, true);
        assert!(player.status(NightStatus::Poisoned));
        assert!(player.is_malfunctioning());

        player.set_status(NightStatus::Poisoned, false);
        player.set_status(NightStatus::Protected, true);
        assert!(!player.is_malfunctioning());
        assert!(player.is_protected);
    }

    #[test]
    fn test_status_notes() {
        let mut player = Player::new(PlayerId::new(4), "Fay");
        assert!(player.status_notes().is_empty());

        player.is_alive = false;
        player.is_drunk = true;
        player.registers_as = Some(RoleType::Minion);
        player.add_reminder("Red Herring");
        assert_eq!(
            player.status_notes(),
            vec!["dead", "drunk", "registers as Minion", "[Red Herring]"]
        );
    }

    #[test]
    fn test_reminders() {
        let mut player = Player::new(PlayerId::new(3), "Dan");
        player.add_reminder("Poisoned");
        player.add_reminder("Dead");
        assert!(player.remove_reminder("Poisoned"));
        assert!(!player.remove_reminder("Poisoned"));
        assert_eq!(player.reminders.as_slice(), ["Dead".to_string()]);
    }

    #[test]
    fn test_legacy_shroud_field() {
        let json = r#"{"id":1,"name":"Eve","role":{"name":"Imp","type":"Demon"},"is_alive":false,"shroud":true}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert!(player.used_ghost_vote);
        assert!(!player.is_alive);
        assert!(player.reminders.is_empty());
    }
}
