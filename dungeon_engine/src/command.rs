//! Command module
//!
//! Describes possible commands used during gameplay and turns a raw input
//! line into one of them.
use variantly;

use crate::room::Direction;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    Help,
    Inventory,
    Look,
    /// Empty input line.
    Missing,
    #[variantly(rename = "move_to")]
    Move(Direction),
    Quit,
    Restart,
    Take(String),
    Unknown(String),
    #[variantly(rename = "use_item")]
    Use(String),
}

/// Expand single-letter shortcuts. The shortcut always wins over a literal word.
pub fn expand_abbreviation(word: &str) -> &str {
    match word {
        "n" => "north",
        "s" => "south",
        "w" => "west",
        "e" => "east",
        "h" => "help",
        "i" => "inventory",
        "l" => "look",
        other => other,
    }
}

/// Parses an input line and returns the corresponding `Command`.
///
/// Only the action word is case-insensitive; item names are kept exactly as
/// typed, joined by single spaces.
pub fn parse_command(input: &str) -> Command {
    let mut words = input.split_whitespace();
    let Some(first) = words.next() else {
        return Command::Missing;
    };
    let lowered = first.to_lowercase();
    let action = expand_abbreviation(&lowered);
    let argument = || words.clone().collect::<Vec<_>>().join(" ");

    if let Some(direction) = Direction::from_word(action) {
        return Command::Move(direction);
    }
    match action {
        "take" => Command::Take(argument()),
        "use" => Command::Use(argument()),
        "look" => Command::Look,
        "inventory" => Command::Inventory,
        "help" => Command::Help,
        "restart" => Command::Restart,
        "quit" => Command::Quit,
        _ => Command::Unknown(first.to_string()),
    }
}
