//! End-to-end tests for snapshot/undo
//!
//! Every mutating session command pushes exactly one snapshot; undoing them
//! all in reverse walks the grimoire back through each earlier state.

use grimoire_rs::core::Player;
use grimoire_rs::game::{
    assign_roles, new_game, run_night, FixedScriptController, GameState, Phase, Session, WalkCommand,
    WalkOutcome, WalkState, DEFAULT_MAX_EVENTS,
};
use grimoire_rs::loader::{GameStore, JsonFileStore, MemoryStore, Script};
use grimoire_rs::{GrimoireError, Result};
use similar_asserts::assert_eq;

fn five_player_game() -> Result<GameState> {
    let mut game = new_game(Script::trouble_brewing()?, &["Ann", "Ben", "Cat", "Dan", "Eve"])?;
    assign_roles(&mut game, &["Poisoner", "Monk", "Imp", "Empath", "Soldier"])?;
    game.logger.enable_capture();
    Ok(game)
}

type Checkpoint = (Vec<Player>, Phase, Vec<String>);

fn checkpoint(session: &Session) -> Checkpoint {
    let game = session.game();
    (game.players.clone(), game.phase, game.log.clone())
}

#[test]
fn test_undo_walks_back_through_every_change() -> Result<()> {
    let mut session = Session::new(five_player_game()?, Box::new(MemoryStore::new()));
    let mut checkpoints = vec![checkpoint(&session)];

    session.add_reminder(0, "Poisoned")?;
    checkpoints.push(checkpoint(&session));
    session.advance_phase()?;
    checkpoints.push(checkpoint(&session));
    session.toggle_life(4)?;
    checkpoints.push(checkpoint(&session));
    session.advance_phase()?;
    checkpoints.push(checkpoint(&session));

    // Poisoner poisons the Monk; the Empath step passes without a log line
    let mut controller = FixedScriptController::parse("act, 2, act");
    run_night(&mut session, &mut controller, DEFAULT_MAX_EVENTS)?;
    checkpoints.push(checkpoint(&session));
    assert!(session.game().players[1].is_poisoned);

    assert_eq!(session.game().history.len(), checkpoints.len() - 1);

    checkpoints.pop();
    while let Some(expected) = checkpoints.pop() {
        session.undo()?;
        assert_eq!(checkpoint(&session), expected);
    }

    assert!(!session.can_undo());
    assert!(matches!(session.undo(), Err(GrimoireError::InvalidState(_))));
    Ok(())
}

#[test]
fn test_undo_does_not_rewind_turn() -> Result<()> {
    let mut session = Session::new(five_player_game()?, Box::new(MemoryStore::new()));
    session.advance_phase()?;
    session.advance_phase()?;
    assert_eq!(session.turn(), 1);

    session.undo()?;
    assert_eq!(session.phase(), Phase::Day);
    assert_eq!(session.turn(), 1);
    assert!(session.walk().is_none());
    Ok(())
}

#[test]
fn test_undo_mid_night_asks_for_the_step_again() -> Result<()> {
    let mut session = Session::new(five_player_game()?, Box::new(MemoryStore::new()));
    session.advance_phase()?;
    session.advance_phase()?;

    session.night(WalkCommand::Advance)?;
    session.night(WalkCommand::Choose(3))?;
    assert_eq!(session.walk().map(|w| w.step()), Some(1));

    session.undo()?;
    assert!(!session.game().players[3].is_poisoned);
    assert_eq!(session.phase(), Phase::Night);
    let walk = session.walk().expect("walk survives a mid-night undo");
    assert_eq!(walk.step(), 0);
    assert_eq!(walk.state(), &WalkState::SelectTarget);

    // The Poisoner picks again
    session.night(WalkCommand::Choose(4))?;
    assert!(session.game().players[4].is_poisoned);
    Ok(())
}

#[test]
fn test_undone_red_herring_is_asked_for_again() -> Result<()> {
    let mut game = new_game(Script::trouble_brewing()?, &["Ann", "Ben", "Cat", "Dan", "Eve"])?;
    assign_roles(&mut game, &["Fortune Teller", "Monk", "Imp", "Empath", "Soldier"])?;
    game.logger.enable_capture();
    let mut session = Session::new(game, Box::new(MemoryStore::new()));
    session.advance_phase()?;
    session.advance_phase()?;

    // Empath wakes before the Fortune Teller on the first night
    while session.walk().and_then(|w| w.current_role()).map(|r| r.as_str()) != Some("Fortune Teller") {
        session.night(WalkCommand::Skip)?;
    }
    session.night(WalkCommand::Advance)?;
    session.night(WalkCommand::Choose(1))?;
    assert_eq!(session.game().red_herring(), Some(1));

    session.undo()?;
    assert_eq!(session.game().red_herring(), None);
    assert_eq!(
        session.walk().map(|w| w.state().clone()),
        Some(WalkState::SelectRedHerring { forced: true })
    );

    session.night(WalkCommand::Choose(3))?;
    session.night(WalkCommand::Choose(1))?;
    session.night(WalkCommand::Choose(3))?;
    let outcome = session.night(WalkCommand::Confirm)?;
    assert_eq!(
        outcome,
        WalkOutcome::Logged("Fortune Teller checked Ben & Dan. Result: YES".to_string())
    );
    Ok(())
}

#[test]
fn test_undo_is_persisted() -> Result<()> {
    let path = std::env::temp_dir().join(format!("grimoire_undo_e2e_{}.json", std::process::id()));
    let mut session = Session::new(five_player_game()?, Box::new(JsonFileStore::new(&path)));

    session.toggle_life(2)?;
    let saved = JsonFileStore::new(&path).load()?.expect("saved after toggle");
    assert!(!saved.players[2].is_alive);

    session.undo()?;
    let saved = JsonFileStore::new(&path).load()?.expect("saved after undo");
    assert!(saved.players[2].is_alive);

    JsonFileStore::new(&path).clear()?;
    Ok(())
}

#[test]
fn test_history_is_not_persisted() -> Result<()> {
    let mut session = Session::new(five_player_game()?, Box::new(MemoryStore::new()));
    session.toggle_life(0)?;
    session.toggle_life(1)?;
    assert_eq!(session.game().history.len(), 2);

    let mut store = MemoryStore::new();
    store.save(session.game())?;
    let json = store.raw().unwrap_or_default();
    assert!(!json.contains("history"));

    let restored = Session::resume(Box::new(store))?;
    assert!(!restored.can_undo());
    assert_eq!(restored.game().players, session.game().players);
    Ok(())
}

#[test]
fn test_wipe_deletes_the_save() -> Result<()> {
    let path = std::env::temp_dir().join(format!("grimoire_wipe_e2e_{}.json", std::process::id()));
    let mut session = Session::new(five_player_game()?, Box::new(JsonFileStore::new(&path)));
    session.toggle_life(0)?;
    assert!(path.exists());

    session.wipe()?;
    assert!(!path.exists());
    assert!(JsonFileStore::new(&path).load()?.is_none());
    assert!(matches!(
        Session::resume(Box::new(JsonFileStore::new(&path))),
        Err(GrimoireError::NotFound(_))
    ));
    Ok(())
}
