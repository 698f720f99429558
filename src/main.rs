//! Grimoire - Main Binary
//!
//! Plain-text Storyteller assistant: create a game, inspect the grimoire,
//! and walk the nights from the terminal.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use grimoire_rs::{
    core::{NightStatus, RoleType},
    game::{
        deal_roles_seeded, new_game, run_night, FixedScriptController, GameState, InteractiveController,
        Phase, Session, StorytellerController, VerbosityLevel, DEFAULT_MAX_EVENTS,
    },
    loader::{GameStore, JsonFileStore, Script, ScriptLoader, DEFAULT_SAVE_PATH},
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Verbosity level for output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "grimoire")]
#[command(about = "Grimoire - Storyteller assistant for the night phase", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a game with randomly dealt roles and save it
    New {
        /// Comma-separated player names in seating order (5 to 15)
        #[arg(long, short = 'p', value_name = "NAMES")]
        players: String,

        /// Script file (.json); defaults to the built-in Trouble Brewing
        #[arg(long, value_name = "SCRIPT_FILE")]
        script: Option<PathBuf>,

        /// Seed for role dealing (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Save file
        #[arg(long, default_value = DEFAULT_SAVE_PATH)]
        save: PathBuf,
    },

    /// Print the saved grimoire
    Show {
        /// Save file
        #[arg(long, default_value = DEFAULT_SAVE_PATH)]
        save: PathBuf,
    },

    /// Delete the saved game
    Wipe {
        /// Save file
        #[arg(long, default_value = DEFAULT_SAVE_PATH)]
        save: PathBuf,
    },

    /// Run the Storyteller command loop on the saved game
    Play {
        /// Save file
        #[arg(long, default_value = DEFAULT_SAVE_PATH)]
        save: PathBuf,

        /// Fixed night-walk inputs (comma-separated tokens, e.g. "act,3,skip")
        #[arg(long, value_name = "TOKENS")]
        inputs: Option<String>,

        /// Verbosity level for output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            players,
            script,
            seed,
            save,
        } => run_new(&players, script, seed, save),
        Commands::Show { save } => {
            let game = load_game(&save)?;
            print_grimoire(&game);
            Ok(())
        }
        Commands::Wipe { save } => {
            JsonFileStore::new(&save).clear()?;
            println!("Deleted {}", save.display());
            Ok(())
        }
        Commands::Play {
            save,
            inputs,
            verbosity,
        } => run_play(save, inputs, verbosity.into()),
    }
}

fn load_game(save: &Path) -> anyhow::Result<GameState> {
    JsonFileStore::new(save)
        .load()?
        .with_context(|| format!("no saved game at {}", save.display()))
}

fn run_new(players: &str, script: Option<PathBuf>, seed: Option<u64>, save: PathBuf) -> anyhow::Result<()> {
    let script = match script {
        Some(path) => ScriptLoader::load_from_file(&path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => Script::trouble_brewing()?,
    };
    for name in script.unknown_wake_names() {
        eprintln!("warning: wake order names unknown role '{name}'");
    }

    let names: Vec<&str> = players.split(',').map(str::trim).collect();
    let seed = seed.unwrap_or_else(rand::random);
    let mut game = new_game(script, &names)?;
    deal_roles_seeded(&mut game, seed)?;

    let mut store = JsonFileStore::new(save);
    store.save(&game)?;
    println!(
        "Created {}-player game of {} (seed {seed}), saved to {}",
        game.players.len(),
        game.script.name,
        store.path().display()
    );
    print_grimoire(&game);
    Ok(())
}

fn print_grimoire(game: &GameState) {
    println!("=== {} | {} | night {} ===", game.script.name, game.phase, game.turn);
    for (seat, player) in game.players.iter().enumerate() {
        println!(
            "  {:>2}. {:<12} {:<16} {}",
            seat + 1,
            player.name,
            player.role.name,
            player.status_notes().join(" ")
        );
    }
    let dist = game.distribution();
    println!(
        "  Distribution: {} townsfolk, {} outsider, {} minion, {} demon",
        dist.townsfolk, dist.outsider, dist.minion, dist.demon
    );
}

const PLAY_HELP: &str = "\
Commands:
  show                 print the grimoire
  next                 advance the phase (entering night starts the walk)
  night                continue (or restart) tonight's walk
  toggle <seat>        flip alive/dead
  swap <seat> <seat>   swap two seats
  role <seat> <role>   reassign a role
  register <seat> <type|none>
  remind <seat> <tag>  /  unremind <seat> <tag>
  herring <seat>       set the Fortune Teller's red herring
  info <seat>          role, status, ability and reminders for a seat
  drunk <seat>  /  poison <seat>  /  safe <seat>
                       flip a night status
  empath <seat>        Empath reading for a seat
  log                  recent game log
  undo                 undo the last change
  wipe                 delete the saved game and quit
  quit";

fn run_play(save: PathBuf, inputs: Option<String>, verbosity: VerbosityLevel) -> anyhow::Result<()> {
    let store = JsonFileStore::new(save);
    let mut session = Session::resume(Box::new(store))?;
    session.logger_mut().set_verbosity(verbosity);
    let mut fixed = inputs.as_deref().map(FixedScriptController::parse);

    println!("{PLAY_HELP}");
    print_grimoire(session.game());

    let stdin = io::stdin();
    loop {
        print!("{} > ", session.prompt());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };
        if command == "quit" || command == "q" {
            break;
        }
        if command == "wipe" {
            session.wipe()?;
            println!("Saved game deleted");
            return Ok(());
        }

        match run_command(&mut session, command, args, fixed.as_mut()) {
            Ok(Some(message)) => println!("{message}"),
            Ok(None) => {}
            Err(e) => eprintln!("Error: {e:#}"),
        }
    }

    session.save()?;
    Ok(())
}

fn seat_arg(args: &[&str], index: usize) -> anyhow::Result<usize> {
    let raw = args.get(index).context("missing seat number")?;
    let seat: usize = raw.parse().with_context(|| format!("'{raw}' is not a seat number"))?;
    if seat == 0 {
        bail!("seats are numbered from 1");
    }
    Ok(seat - 1)
}

fn rest_arg(args: &[&str], from: usize) -> anyhow::Result<String> {
    let rest = args.get(from..).unwrap_or(&[]).join(" ");
    if rest.is_empty() {
        bail!("missing argument");
    }
    Ok(rest)
}

fn run_command(
    session: &mut Session,
    command: &str,
    args: &[&str],
    fixed: Option<&mut FixedScriptController>,
) -> anyhow::Result<Option<String>> {
    let message = match command {
        "help" | "?" => PLAY_HELP.to_string(),
        "show" | "g" => {
            print_grimoire(session.game());
            return Ok(None);
        }
        "log" => {
            let log = session.log();
            log[log.len().saturating_sub(15)..].join("\n")
        }
        "next" => {
            let phase = session.advance_phase()?;
            if phase == Phase::Night {
                walk_night(session, fixed)?;
            }
            format!("Now {} (night {})", session.phase(), session.turn())
        }
        "night" => {
            if session.walk().is_none() {
                session.restart_night_walk()?;
            }
            walk_night(session, fixed)?;
            return Ok(None);
        }
        "toggle" | "kill" => session.toggle_life(seat_arg(args, 0)?)?,
        "swap" => session.swap_seats(seat_arg(args, 0)?, seat_arg(args, 1)?)?,
        "role" => session.reassign_role(seat_arg(args, 0)?, &rest_arg(args, 1)?)?,
        "register" => {
            let seat = seat_arg(args, 0)?;
            let registers_as = match rest_arg(args, 1)?.as_str() {
                "none" => None,
                other => Some(other.parse::<RoleType>().map_err(|e| anyhow::anyhow!("{e}"))?),
            };
            session.set_registration(seat, registers_as)?
        }
        "remind" => session.add_reminder(seat_arg(args, 0)?, &rest_arg(args, 1)?)?,
        "unremind" => session.remove_reminder(seat_arg(args, 0)?, &rest_arg(args, 1)?)?,
        "herring" => session.set_red_herring(seat_arg(args, 0)?)?,
        "info" => session.player_info(seat_arg(args, 0)?)?.join("\n"),
        "drunk" => session.toggle_status(seat_arg(args, 0)?, NightStatus::Drunk)?,
        "poison" => session.toggle_status(seat_arg(args, 0)?, NightStatus::Poisoned)?,
        "safe" => session.toggle_status(seat_arg(args, 0)?, NightStatus::Protected)?,
        "empath" => session.empath_info(seat_arg(args, 0)?)?.to_string(),
        "undo" => {
            session.undo()?;
            "Undone".to_string()
        }
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(message))
}

fn walk_night(session: &mut Session, fixed: Option<&mut FixedScriptController>) -> anyhow::Result<()> {
    let report = match fixed {
        Some(controller) => drive(session, controller)?,
        None => drive(session, &mut InteractiveController::stdio())?,
    };
    if !report.finished {
        println!("Night paused; type 'night' to continue.");
    }
    Ok(())
}

fn drive<C: StorytellerController + ?Sized>(
    session: &mut Session,
    controller: &mut C,
) -> anyhow::Result<grimoire_rs::game::NightReport> {
    let report = run_night(session, controller, DEFAULT_MAX_EVENTS)?;
    if report.rejected > 0 {
        eprintln!("{} commands were rejected during the night", report.rejected);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_rs::game::assign_roles;
    use grimoire_rs::loader::MemoryStore;

    fn session() -> Session {
        let names = ["Ann", "Ben", "Cat", "Dan", "Eve"];
        let mut game = new_game(Script::trouble_brewing().unwrap(), &names).unwrap();
        assign_roles(&mut game, &["Poisoner", "Empath", "Imp", "Monk", "Saint"]).unwrap();
        game.logger.enable_capture();
        Session::new(game, Box::new(MemoryStore::new()))
    }

    fn run(session: &mut Session, line: &str) -> anyhow::Result<Option<String>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        run_command(session, words[0], &words[1..], None)
    }

    #[test]
    fn test_info_command() {
        let mut s = session();
        let info = run(&mut s, "info 4").unwrap().unwrap();
        assert_eq!(
            info,
            "Dan: Monk (Townsfolk)\n\
             Ability: Each night*, choose a player (not yourself): they are safe from the Demon tonight.\n\
             Reminders: Safe"
        );

        let info = run(&mut s, "info 2").unwrap().unwrap();
        assert!(info.ends_with("Reading: 2"));

        assert!(run(&mut s, "info 0").is_err());
        assert!(run(&mut s, "info").is_err());
    }

    #[test]
    fn test_status_commands() {
        let mut s = session();
        assert_eq!(run(&mut s, "drunk 2").unwrap().as_deref(), Some("Ben is now drunk"));
        assert_eq!(run(&mut s, "poison 4").unwrap().as_deref(), Some("Dan is now poisoned"));
        assert_eq!(run(&mut s, "safe 5").unwrap().as_deref(), Some("Eve is now safe"));

        let info = run(&mut s, "info 2").unwrap().unwrap();
        assert!(info.contains("Status: drunk"));
        assert!(info.ends_with("(FALSE - Is Drunk/Poisoned)"));

        assert_eq!(run(&mut s, "drunk 2").unwrap().as_deref(), Some("Ben is no longer drunk"));
        assert!(!s.game().players[1].is_drunk);
    }
}
