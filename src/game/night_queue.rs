//! Night queue: the wake order filtered to roles in play

use crate::core::{Player, RoleName};
use smallvec::SmallVec;

/// Ordered list of roles to wake tonight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightQueue {
    roles: SmallVec<[RoleName; 16]>,
}

impl NightQueue {
    /// Keep the names from `order` that some player currently holds
    ///
    /// Order is preserved. A name held by several players still appears once.
    pub fn build(order: &[RoleName], players: &[Player]) -> Self {
        let mut roles: SmallVec<[RoleName; 16]> = SmallVec::new();
        for name in order {
            let in_play = players.iter().any(|p| p.holds_role(name.as_str()));
            if in_play && !roles.contains(name) {
                roles.push(name.clone());
            }
        }
        NightQueue { roles }
    }

    pub fn get(&self, step: usize) -> Option<&RoleName> {
        self.roles.get(step)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionType, PlayerId, Role, RoleType};

    fn roster(roles: &[&str]) -> Vec<Player> {
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| {
                let mut p = Player::new(PlayerId::new(i as u32 + 1), format!("P{}", i + 1));
                p.role = Role::new(*role, RoleType::Townsfolk, ActionType::None);
                p
            })
            .collect()
    }

    fn names(list: &[&str]) -> Vec<RoleName> {
        list.iter().map(|s| RoleName::new(*s)).collect()
    }

    #[test]
    fn test_filters_and_preserves_order() {
        let players = roster(&["Empath", "Imp", "Chef", "Soldier"]);
        let order = names(&["Poisoner", "Chef", "Empath", "Fortune Teller", "Imp"]);
        let queue = NightQueue::build(&order, &players);

        let got: Vec<&str> = queue.iter().map(|r| r.as_str()).collect();
        assert_eq!(got, vec!["Chef", "Empath", "Imp"]);
    }

    #[test]
    fn test_never_contains_absent_roles() {
        let players = roster(&["Saint", "Mayor"]);
        let order = names(&["Poisoner", "Monk", "Imp"]);
        let queue = NightQueue::build(&order, &players);
        assert!(queue.is_empty());
        assert_eq!(queue.get(0), None);
    }

    #[test]
    fn test_duplicate_holders_listed_once() {
        let players = roster(&["Monk", "Monk", "Imp"]);
        let order = names(&["Monk", "Imp"]);
        let queue = NightQueue::build(&order, &players);
        assert_eq!(queue.len(), 2);
    }
}
