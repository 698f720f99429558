//! Role abilities: night effects and information results
//!
//! Handlers are registered per canonical role id. A role with no handler
//! still works: it gets the interaction its script action type implies and
//! a generic "targeted" log line.

use crate::core::{ActionType, Player, Role, RoleId, RoleName, RoleType};
use crate::game::{GameState, Neighbors};
use crate::Result;
use rustc_hash::FxHashMap;
use std::fmt;

const MALFUNCTION_NOTE: &str = "(FALSE - Is Drunk/Poisoned)";

/// The shape of the Storyteller's interaction when a role wakes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing to record; the step just advances
    Passive,
    /// Choose one player
    SingleTarget,
    /// Choose two players and a revealed role
    InfoToken,
    /// Red herring (once), two players, yes/no reveal
    FortuneTeller,
}

impl Interaction {
    /// Default interaction for a script action type
    pub fn for_action_type(action_type: ActionType) -> Self {
        match action_type {
            ActionType::SelectPlayer => Interaction::SingleTarget,
            ActionType::InfoToken => Interaction::InfoToken,
            ActionType::None | ActionType::SelectRole | ActionType::YesNo => Interaction::Passive,
        }
    }
}

/// A role's night behaviour
///
/// `actor` and `target` are seats already checked against the roster.
pub trait RoleAbility {
    /// Interaction to use instead of the one implied by the action type
    fn interaction(&self) -> Option<Interaction> {
        None
    }

    /// Category offered when choosing the role to reveal on an info token
    fn reveal_category(&self) -> Option<RoleType> {
        None
    }

    /// Apply a single-target night action and describe it
    fn resolve_target(&self, game: &mut GameState, actor: usize, target: usize) -> String {
        targeted(game, actor, target)
    }
}

fn targeted(game: &GameState, actor: usize, target: usize) -> String {
    format!("{} targeted {}", game.players[actor].role.name, game.players[target].name)
}

struct Poisoner;

impl RoleAbility for Poisoner {
    fn resolve_target(&self, game: &mut GameState, _actor: usize, target: usize) -> String {
        let target = &mut game.players[target];
        target.is_poisoned = true;
        format!("Poisoner poisoned {}", target.name)
    }
}

struct Monk;

impl RoleAbility for Monk {
    fn resolve_target(&self, game: &mut GameState, actor: usize, target: usize) -> String {
        if game.players[actor].is_malfunctioning() {
            return format!(
                "Monk tried to protect {} but was malfunctioning",
                game.players[target].name
            );
        }
        let target = &mut game.players[target];
        target.is_protected = true;
        format!("Monk protected {}", target.name)
    }
}

struct Imp;

impl RoleAbility for Imp {
    fn resolve_target(&self, game: &mut GameState, actor: usize, target: usize) -> String {
        if game.players[actor].is_malfunctioning() {
            return format!("Imp attacked {} but was malfunctioning", game.players[target].name);
        }

        let target = &mut game.players[target];
        if target.is_protected {
            return format!("Imp attacked {} but they were protected!", target.name);
        }
        if target.role.id() == RoleId::from("Soldier") && !target.is_malfunctioning() {
            return format!("Imp attacked Soldier {}! No effect.", target.name);
        }

        target.is_alive = false;
        format!("Imp killed {}!", target.name)
    }
}

struct FortuneTeller;

impl RoleAbility for FortuneTeller {
    fn interaction(&self) -> Option<Interaction> {
        Some(Interaction::FortuneTeller)
    }

    fn resolve_target(&self, game: &mut GameState, actor: usize, target: usize) -> String {
        let name = &game.players[target].name;
        if game.players[actor].is_malfunctioning() {
            format!("Fortune Teller checked {name} (False Info due to malfunction)")
        } else {
            format!("Fortune Teller checked {name}")
        }
    }
}

struct Butler;

impl RoleAbility for Butler {
    fn resolve_target(&self, game: &mut GameState, _actor: usize, target: usize) -> String {
        format!("Butler chose master {}", game.players[target].name)
    }
}

struct Empath;

impl RoleAbility for Empath {
    fn resolve_target(&self, _game: &mut GameState, _actor: usize, _target: usize) -> String {
        "Empath checked neighbors".to_string()
    }
}

/// "One of these two players is the X" for a fixed category
struct InfoToken(RoleType);

impl RoleAbility for InfoToken {
    fn reveal_category(&self) -> Option<RoleType> {
        Some(self.0)
    }
}

/// Strategy for the number a malfunctioning Empath is shown
pub trait FalseReading {
    fn fabricate(&self, true_count: u8) -> u8;
}

/// Default false reading: `(count + 1) mod 3`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftedReading;

impl FalseReading for ShiftedReading {
    fn fabricate(&self, true_count: u8) -> u8 {
        (true_count + 1) % 3
    }
}

impl<F: Fn(u8) -> u8> FalseReading for F {
    fn fabricate(&self, true_count: u8) -> u8 {
        self(true_count)
    }
}

/// Fortune Teller result for two players
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneReading {
    /// True answer: is either player the Demon (or the red herring)?
    pub yes: bool,
    /// The Fortune Teller is poisoned or drunk; the Storyteller may lie
    pub malfunctioning: bool,
    pub message: String,
}

impl fmt::Display for FortuneReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Empath result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmpathReading {
    /// Nobody else is alive
    NoNeighbors,
    Reading {
        true_count: u8,
        /// Number to show the Empath (fabricated when malfunctioning)
        reported: u8,
        malfunctioning: bool,
    },
}

impl EmpathReading {
    pub fn reported(&self) -> Option<u8> {
        match self {
            EmpathReading::NoNeighbors => None,
            EmpathReading::Reading { reported, .. } => Some(*reported),
        }
    }
}

impl fmt::Display for EmpathReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmpathReading::NoNeighbors => f.write_str("Not enough neighbors"),
            EmpathReading::Reading {
                reported,
                malfunctioning: true,
                ..
            } => write!(f, "Reading: {reported} {MALFUNCTION_NOTE}"),
            EmpathReading::Reading { reported, .. } => write!(f, "Reading: {reported}"),
        }
    }
}

/// Demon-typed (by registration) or flagged as the red herring
pub fn is_demon_or_red_herring(player: &Player) -> bool {
    player.registered_type() == RoleType::Demon || player.is_red_herring
}

/// Ability handlers keyed by canonical role id
pub struct AbilityRegistry {
    handlers: FxHashMap<RoleId, Box<dyn RoleAbility>>,
    false_reading: Box<dyn FalseReading>,
}

impl AbilityRegistry {
    /// Registry with no handlers; every role falls back to its action type
    pub fn empty() -> Self {
        AbilityRegistry {
            handlers: FxHashMap::default(),
            false_reading: Box::new(ShiftedReading),
        }
    }

    /// Registry with the built-in roles
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("Poisoner", Poisoner);
        registry.register("Monk", Monk);
        registry.register("Imp", Imp);
        registry.register("Fortune Teller", FortuneTeller);
        registry.register("Butler", Butler);
        registry.register("Empath", Empath);
        registry.register("Washerwoman", InfoToken(RoleType::Townsfolk));
        registry.register("Librarian", InfoToken(RoleType::Outsider));
        registry.register("Investigator", InfoToken(RoleType::Minion));
        registry
    }

    /// Register (or replace) the handler for a role
    pub fn register(&mut self, role_name: &str, ability: impl RoleAbility + 'static) {
        self.handlers.insert(RoleId::from_name(role_name), Box::new(ability));
    }

    pub fn with_false_reading(mut self, strategy: impl FalseReading + 'static) -> Self {
        self.false_reading = Box::new(strategy);
        self
    }

    pub fn handler(&self, role_name: &str) -> Option<&dyn RoleAbility> {
        self.handlers.get(&RoleId::from_name(role_name)).map(|h| h.as_ref())
    }

    /// Interaction used when `role` wakes
    pub fn interaction(&self, role: &Role) -> Interaction {
        self.handler(role.name.as_str())
            .and_then(|h| h.interaction())
            .unwrap_or_else(|| Interaction::for_action_type(role.action_type))
    }

    /// Roles to offer for an info token reveal
    ///
    /// The chosen players' own roles when they match the actor's category,
    /// otherwise every script role of that category. Without a category,
    /// every script role.
    pub fn reveal_candidates(
        &self,
        game: &GameState,
        actor_role: &str,
        first: usize,
        second: usize,
    ) -> Result<Vec<RoleName>> {
        let chosen = [game.player(first)?, game.player(second)?];

        let Some(category) = self.handler(actor_role).and_then(|h| h.reveal_category()) else {
            return Ok(game.script.roles.iter().map(|r| r.name.clone()).collect());
        };

        let mut candidates: Vec<RoleName> = Vec::new();
        for player in chosen {
            if player.role.role_type == category && !candidates.contains(&player.role.name) {
                candidates.push(player.role.name.clone());
            }
        }
        if candidates.is_empty() {
            candidates = game.script.roles_of_type(category).map(|r| r.name.clone()).collect();
        }
        Ok(candidates)
    }

    /// Resolve a single-target night action for the role `actor_name`
    pub fn resolve_night_action(
        &self,
        game: &mut GameState,
        actor_name: &str,
        target: usize,
    ) -> Result<String> {
        let actor = game.actor_seat(actor_name)?;
        game.player(target)?;

        let message = match self.handler(actor_name) {
            Some(handler) => handler.resolve_target(game, actor, target),
            None => targeted(game, actor, target),
        };
        Ok(message)
    }

    /// "`actor` learned that `first` or `second` is `revealed`"
    ///
    /// A malfunctioning actor gets a "(False Info)" note; the revealed role is
    /// left exactly as the Storyteller chose it.
    pub fn resolve_info_action(
        &self,
        game: &GameState,
        actor_name: &str,
        first: usize,
        second: usize,
        revealed: &str,
    ) -> Result<String> {
        let actor = game.player(game.actor_seat(actor_name)?)?;
        let (first, second) = (game.player(first)?, game.player(second)?);

        let mut message = format!(
            "{} learned that {} or {} is {}",
            actor_name, first.name, second.name, revealed
        );
        if actor.is_malfunctioning() {
            message.push_str(" (False Info)");
        }
        Ok(message)
    }

    /// Fortune Teller check of two players
    ///
    /// The result is always the true answer; malfunction only adds a note.
    pub fn resolve_fortune_teller(
        &self,
        game: &GameState,
        actor: usize,
        first: usize,
        second: usize,
    ) -> Result<FortuneReading> {
        let malfunctioning = game.player(actor)?.is_malfunctioning();
        let (first, second) = (game.player(first)?, game.player(second)?);

        let yes = is_demon_or_red_herring(first) || is_demon_or_red_herring(second);
        let mut message = format!(
            "Fortune Teller checked {} & {}. Result: {}",
            first.name,
            second.name,
            if yes { "YES" } else { "NO" }
        );
        if malfunctioning {
            message.push(' ');
            message.push_str(MALFUNCTION_NOTE);
        }

        Ok(FortuneReading {
            yes,
            malfunctioning,
            message,
        })
    }

    /// How many of the Empath's living neighbors register as evil
    pub fn empath_info(&self, game: &GameState, empath: usize) -> Result<EmpathReading> {
        let malfunctioning = game.player(empath)?.is_malfunctioning();
        let Some(neighbors) = Neighbors::of(&game.players, empath) else {
            return Ok(EmpathReading::NoNeighbors);
        };

        let true_count = neighbors
            .seats()
            .filter(|&seat| game.players[seat].registered_type().is_evil())
            .count() as u8;
        let reported = if malfunctioning {
            self.false_reading.fabricate(true_count)
        } else {
            true_count
        };

        Ok(EmpathReading::Reading {
            true_count,
            reported,
            malfunctioning,
        })
    }

    /// Grimoire notes for one seat: role, status, ability text, reminder
    /// tokens, and the live reading for an Empath
    pub fn player_info(&self, game: &GameState, seat: usize) -> Result<Vec<String>> {
        let player = game.player(seat)?;
        let role = &player.role;

        let mut lines = vec![format!("{}: {} ({})", player.name, role.name, role.role_type)];
        let notes = player.status_notes();
        if !notes.is_empty() {
            lines.push(format!("Status: {}", notes.join(", ")));
        }
        if !role.ability.is_empty() {
            lines.push(format!("Ability: {}", role.ability));
        }
        if !role.reminders.is_empty() {
            lines.push(format!("Reminders: {}", role.reminders.join(", ")));
        }
        if role.id() == RoleId::from("Empath") {
            lines.push(self.empath_info(game, seat)?.to_string());
        }
        Ok(lines)
    }
}

impl Default for AbilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut roles: Vec<&str> = self.handlers.keys().map(|id| id.as_str()).collect();
        roles.sort_unstable();
        f.debug_struct("AbilityRegistry").field("roles", &roles).finish()
    }
}
