//! Text commands accepted on stdin.

use std::str::FromStr;
use thiserror::Error;
use twenty48_core::{Direction, GameAction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// A parsed line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward an action to the game
    Action(GameAction),
    /// Print the key reference
    Help,
    /// Save and exit
    Quit,
}

pub const HELP: &str = "\
moves:   w/a/s/d or up/left/down/right
undo:    u
restart: r
keep playing after a win: c
help:    h
quit:    q";

impl FromStr for Command {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let command = match key.as_str() {
            "" => return Err(InputError::Empty),
            "a" | "left" => Command::Action(GameAction::Move(Direction::Left)),
            "d" | "right" => Command::Action(GameAction::Move(Direction::Right)),
            "w" | "up" => Command::Action(GameAction::Move(Direction::Up)),
            "s" | "down" => Command::Action(GameAction::Move(Direction::Down)),
            "u" | "undo" => Command::Action(GameAction::Undo),
            "r" | "restart" => Command::Action(GameAction::Restart),
            "c" | "continue" => Command::Action(GameAction::KeepPlaying),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(InputError::Unknown(s.trim().to_string())),
        };
        Ok(command)
    }
}
