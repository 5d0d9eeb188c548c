//! Input loop and command handling.

use crate::input::{Command, InputError, HELP};
use crate::store::SaveFile;
use std::io::{BufRead, Write};
use tracing::{debug, error, info, warn};
use twenty48_core::{GameEvent, GameState, GameStatus, MoveEffects};

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A running game wired to its save file
pub struct Session {
    pub game: GameState,
    store: Option<SaveFile>,
}

impl Session {
    pub fn new(game: GameState, store: Option<SaveFile>) -> Self {
        Self { game, store }
    }

    /// Read commands line by line until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        render(&self.game, &MoveEffects::default(), out)?;

        for line in input.lines() {
            let line = line?;
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.handle_command(command, out)? == Flow::Quit {
                        break;
                    }
                }
                Err(InputError::Empty) => {}
                Err(e) => {
                    warn!("Rejected input: {}", e);
                    writeln!(out, "{} (h for help)", e)?;
                }
            }
        }

        self.persist();
        Ok(())
    }

    /// Apply one command, print the outcome and persist.
    pub fn handle_command<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        let action = match command {
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Action(action) => action,
        };

        match self.game.apply_action(action) {
            Ok(events) => {
                for event in &events {
                    log_event(event);
                }
                if events.is_empty() {
                    writeln!(out, "Nothing moved")?;
                    return Ok(Flow::Continue);
                }

                let effects = self.game.take_effects();
                render(&self.game, &effects, out)?;
                self.persist();
            }
            Err(e) => {
                debug!("Action {:?} refused: {}", action, e);
                writeln!(out, "{}", e)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.store(&self.game) {
                error!("Failed to save game to {}: {:#}", store.path().display(), e);
            }
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameWon { max_tile } => info!("Reached {}", max_tile),
        GameEvent::GameOver { score } => info!("Game over with score {}", score),
        GameEvent::BestScoreChanged { best } => debug!("New best score {}", best),
        other => debug!("{:?}", other),
    }
}

/// Print the board, scores, status and last-turn effects
pub fn render<W: Write>(game: &GameState, effects: &MoveEffects, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", game.grid)?;
    writeln!(out, "score {}  best {}", game.score, game.best)?;

    if !effects.merged_tiles.is_empty() {
        let merged: Vec<String> = effects
            .merged_tiles
            .iter()
            .map(|at| format!("({},{})", at.r, at.c))
            .collect();
        writeln!(out, "merged {}", merged.join(" "))?;
    }
    for at in &effects.new_tiles {
        writeln!(out, "new tile at ({},{})", at.r, at.c)?;
    }

    match game.status {
        GameStatus::Won => writeln!(
            out,
            "You made {}! c to keep playing, r to restart",
            game.config().win_threshold
        )?,
        GameStatus::Over => writeln!(out, "Game over. r to try again, u to undo")?,
        GameStatus::Playing | GameStatus::Continue => {}
    }
    Ok(())
}
