//! Game setup: roster creation and role dealing

use crate::core::{Role, RoleType};
use crate::game::{validate_player_count, GameState};
use crate::loader::Script;
use crate::{GrimoireError, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Create a Setup-phase game with one player per name, in seating order
pub fn new_game<S: AsRef<str>>(script: Script, names: &[S]) -> Result<GameState> {
    validate_player_count(names.len())?;

    let mut game = GameState::new(script);
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(GrimoireError::Validation(
                "player names must not be empty".to_string(),
            ));
        }
        game.add_player(name);
    }
    Ok(game)
}

/// Give each seat the named script role, in seating order
pub fn assign_roles<S: AsRef<str>>(game: &mut GameState, roles: &[S]) -> Result<()> {
    if roles.len() != game.players.len() {
        return Err(GrimoireError::Validation(format!(
            "{} roles for {} players",
            roles.len(),
            game.players.len()
        )));
    }
    for (seat, role) in roles.iter().enumerate() {
        game.set_player_role(seat, role.as_ref())?;
    }
    Ok(())
}

/// Deal roles at random following the distribution for the roster size
///
/// Each category draws distinct roles from the script; the drawn roles are
/// then shuffled around the circle.
pub fn deal_roles<R: Rng + ?Sized>(game: &mut GameState, rng: &mut R) -> Result<()> {
    let dist = game.distribution();
    let mut dealt: Vec<Role> = Vec::with_capacity(game.players.len());

    for role_type in [
        RoleType::Townsfolk,
        RoleType::Outsider,
        RoleType::Minion,
        RoleType::Demon,
    ] {
        let wanted = dist.count_for(role_type);
        let pool: Vec<&Role> = game.script.roles_of_type(role_type).collect();
        if pool.len() < wanted {
            return Err(GrimoireError::Validation(format!(
                "script '{}' has {} {} roles, {} players need {}",
                game.script.name,
                pool.len(),
                role_type,
                game.players.len(),
                wanted
            )));
        }
        dealt.extend(pool.choose_multiple(rng, wanted).map(|r| (*r).clone()));
    }

    dealt.shuffle(rng);
    for (player, role) in game.players.iter_mut().zip(dealt) {
        player.role = role;
    }

    game.append_log(format!("[Setup] Roles dealt to {} players", game.players.len()));
    Ok(())
}

/// `deal_roles` with a ChaCha12 generator seeded from `seed`
pub fn deal_roles_seeded(game: &mut GameState, seed: u64) -> Result<()> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    deal_roles(game, &mut rng)
}
