//! Console glue: the welcome banner, stdin prompts, and player setup.

use std::io::{self, Write};

use pig_dice::bot::{BotControls, BotDifficulty};
use pig_dice::entities::{NumberPrompt, Player, PlayerKind};

const BANNER_WIDTH: usize = 70;

fn centered(text: &str) -> String {
    format!("{text:^width$}", width = BANNER_WIDTH)
}

fn starred(text: &str) -> String {
    format!("{text:*^width$}", width = BANNER_WIDTH)
}

/// Prints the welcome banner and rules.
pub fn welcome() {
    let border = "*".repeat(BANNER_WIDTH);
    println!("{border}");
    println!("{}", centered("Welcome to Pig Dice!"));
    println!("{border}");
    println!("{}", centered("The objective is to be the first to reach 100 points."));
    println!("{}", centered("On each turn, the player will roll a die."));
    println!("{}", centered("The die value will be stored in a temporary score box."));
    println!("{}", centered("(If the die value is 1, the player earns no points,"));
    println!("{}", centered("and the turn goes to the next player.)"));
    println!("{}", centered("The player has an option to either roll again,"));
    println!("{}", centered("or hold. If you hold, the score in the"));
    println!("{}", centered("temporary box will be added to your total score."));
    println!("{}", starred(" Good luck! "));
    println!("{}", starred(" Fortune favors the brave... "));
    println!("{}", starred(" but chance favors the smart! "));
    println!();
}

/// Reads a number within `min..=max` from stdin, re-prompting until the
/// response is valid. A closed stdin resolves to `min`.
pub fn input_number(prompt: &str, min: u32, max: u32) -> u32 {
    let mut line = String::new();
    loop {
        print!("{prompt}");
        let _ = io::stdout().flush();
        line.clear();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => {
                log::warn!("stdin closed, answering {min}");
                return min;
            }
            Ok(_) => {}
        }
        match line.trim().parse::<u32>() {
            Ok(number) if number >= min && number <= max => return number,
            Ok(_) => println!("Number is not within range: {min} to {max}"),
            Err(_) => println!("You need to enter a number"),
        }
    }
}

/// Stdin-backed prompt for human roll-or-hold decisions.
#[derive(Debug)]
pub struct StdinPrompt;

impl NumberPrompt for StdinPrompt {
    fn read_number(&mut self, prompt: &str, min: u32, max: u32) -> u32 {
        input_number(prompt, min, max)
    }
}

fn read_name(kind: &str, fallback: &str) -> String {
    print!("Enter {kind} name: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(n) if n > 0 && !line.trim().is_empty() => line.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Builds a player from a kind string, prompting for a name. Anything
/// other than a computer kind plays as a human.
pub fn build_player(kind: &str, fallback_name: &str, difficulty: BotDifficulty) -> Player {
    match kind {
        "computer" | "bot" => {
            let name = read_name(kind, fallback_name);
            Player::new(name, PlayerKind::Bot(BotControls::from_difficulty(difficulty)))
        }
        other => {
            if other != "human" {
                log::warn!("unknown player kind '{other}', defaulting to human");
            }
            let name = read_name("human", fallback_name);
            Player::human(name, Box::new(StdinPrompt))
        }
    }
}
