//! A console front end for the Pig dice game.
//!
//! Parses the player lineup from the command line, prompts for names,
//! and drives the game engine, printing its events between steps.

use anyhow::Result;
use pico_args::Arguments;
use std::time::Duration;

use pd_cli::console;
use pig_dice::{
    DEFAULT_TIME_LIMIT_SECS, GameData, GameEvent, GameSettings, GameStateManagement, PigState,
    TARGET_SCORE,
    bot::BotDifficulty,
    entities::Die,
};

const HELP: &str = "\
Play a game of Pig dice

USAGE:
  pd_cli [OPTIONS]

OPTIONS:
  --player1 KIND        First player: human or computer   [default: human]
  --player2 KIND        Second player: human or computer  [default: computer]
  --difficulty LEVEL    Bot difficulty: cautious, standard, greedy  [default: standard]
  --time-limit SECS     Timed-game length in seconds (with --timed)  [default: 60]
  --seed SEED           Seed the die for a reproducible game

FLAGS:
  --timed               End the game once the time limit passes
  -h, --help            Print help information
";

struct Args {
    player1: String,
    player2: String,
    difficulty: String,
    timed: bool,
    time_limit: u64,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        player1: pargs
            .value_from_str("--player1")
            .unwrap_or_else(|_| "human".to_string()),
        player2: pargs
            .value_from_str("--player2")
            .unwrap_or_else(|_| "computer".to_string()),
        difficulty: pargs
            .value_from_str("--difficulty")
            .unwrap_or_else(|_| "standard".to_string()),
        timed: pargs.contains("--timed"),
        time_limit: pargs
            .value_from_str("--time-limit")
            .unwrap_or(DEFAULT_TIME_LIMIT_SECS),
        seed: pargs.opt_value_from_str("--seed").ok().flatten(),
    };

    run(args)
}

fn run(args: Args) -> Result<()> {
    console::welcome();

    let difficulty = BotDifficulty::from_name(&args.difficulty).unwrap_or_else(|| {
        log::warn!(
            "unknown difficulty '{}', defaulting to standard",
            args.difficulty
        );
        BotDifficulty::Standard
    });
    let players = vec![
        console::build_player(&args.player1, "Player 1", difficulty),
        console::build_player(&args.player2, "Player 2", difficulty),
    ];

    let time_limit = args.timed.then(|| Duration::from_secs(args.time_limit));
    let settings = GameSettings::new(TARGET_SCORE, time_limit);
    let die = match args.seed {
        Some(seed) => Die::from_seed(seed),
        None => Die::new(),
    };

    let data = GameData::with_die(players, settings, Box::new(die))?;
    let mut game = PigState::new(data);

    // Human prompts block inside `step`, so queued events are printed
    // first each time around.
    while !game.is_over() {
        print_events(&mut game);
        game = game.step();
    }
    print_events(&mut game);

    Ok(())
}

fn print_events(game: &mut PigState) {
    for event in game.drain_events() {
        match &event {
            GameEvent::StandingsUpdated(_) | GameEvent::GameEnded(_) => println!("\n{event}"),
            GameEvent::RolledOne(_) => println!("  {event}"),
            _ => println!("{event}"),
        }
    }
}
