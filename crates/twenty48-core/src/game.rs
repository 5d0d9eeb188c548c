//! Core game state machine.
//!
//! This module contains the `GameState` struct that runs one session: every
//! move, spawn, score update, status change and undo goes through
//! [`GameState::apply_action`].

use crate::actions::{GameAction, GameEvent};
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::history::{History, HistoryEntry};
use crate::moves::{apply_move, Direction, MoveEffects};
use crate::save::{SaveError, SaveState};
use crate::spawn::spawn_random_tile;
use crate::status::{has_moves, max_tile, GameStatus};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tiles placed on a fresh board
const STARTING_TILES: usize = 2;

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Game is not accepting moves")]
    GameFinished,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Can only keep playing after a win")]
    NotWon,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The complete state of one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The board
    pub grid: Grid,
    /// Points earned this game
    pub score: u32,
    /// Highest score seen across restarts
    pub best: u32,
    /// Current status
    pub status: GameStatus,
    /// Snapshots for undo
    history: History,
    /// Presentation hints from the last move
    effects: MoveEffects,
    config: GameConfig,
}

impl GameState {
    /// Start a new game with two random tiles
    pub fn new(config: GameConfig) -> Self {
        Self::new_with_rng(config, &mut rand::thread_rng())
    }

    /// Start a new game drawing tiles from `rng`
    pub fn new_with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        Self {
            grid: starting_grid(rng),
            score: 0,
            best: 0,
            status: GameStatus::Playing,
            history: History::new(config.history_limit),
            effects: MoveEffects::default(),
            config,
        }
    }

    /// Resume a game from a validated save
    pub fn from_save(save: SaveState, config: GameConfig) -> Result<Self, SaveError> {
        save.validate()?;

        Ok(Self {
            grid: save.grid,
            score: save.score,
            best: save.best.max(save.score),
            status: save.status,
            history: History::from_entries(save.history, config.history_limit),
            effects: MoveEffects::default(),
            config,
        })
    }

    /// Resume from save JSON, or start fresh if it does not hold a valid game
    pub fn restore_or_new(json: &str, config: GameConfig) -> Self {
        SaveState::from_json(json)
            .and_then(|save| Self::from_save(save, config))
            .unwrap_or_else(|_| Self::replacing_save(json, config))
    }

    /// New game standing in for a rejected save, keeping whatever best score
    /// the save still carries
    pub fn replacing_save(json: &str, config: GameConfig) -> Self {
        let mut game = Self::new(config);
        game.best = SaveState::recover_best(json);
        game
    }

    /// Snapshot of everything worth persisting
    pub fn to_save(&self) -> SaveState {
        SaveState {
            grid: self.grid.clone(),
            score: self.score,
            best: self.best,
            status: self.status,
            history: self.history.to_vec(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Effects of the last move (empty after undo/restart)
    pub fn effects(&self) -> &MoveEffects {
        &self.effects
    }

    /// Hand the effects to the presentation layer and clear them
    pub fn take_effects(&mut self) -> MoveEffects {
        std::mem::take(&mut self.effects)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether the game is waiting on the player (won) or cannot continue (over)
    pub fn is_finished(&self) -> bool {
        !self.status.accepts_moves()
    }

    /// Largest tile on the board
    pub fn max_tile(&self) -> u32 {
        max_tile(&self.grid)
    }

    /// Get all currently valid actions
    pub fn valid_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        if self.status.accepts_moves() {
            for direction in Direction::ALL {
                if apply_move(&self.grid, direction).moved {
                    actions.push(GameAction::Move(direction));
                }
            }
        }

        if self.can_undo() {
            actions.push(GameAction::Undo);
        }
        if self.status == GameStatus::Won {
            actions.push(GameAction::KeepPlaying);
        }
        actions.push(GameAction::Restart);

        actions
    }

    /// Apply an action to the game state
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action_with_rng(action, &mut rand::thread_rng())
    }

    /// Apply an action, drawing any new tiles from `rng`
    pub fn apply_action_with_rng<R: Rng + ?Sized>(
        &mut self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::Move(direction) => self.play_move(direction, rng),

            GameAction::Undo => {
                let entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
                self.grid = entry.grid;
                self.score = entry.score;
                self.status = entry.status;
                self.effects = MoveEffects::default();

                Ok(vec![GameEvent::MoveUndone {
                    score: self.score,
                    status: self.status,
                }])
            }

            GameAction::Restart => {
                self.grid = starting_grid(rng);
                self.score = 0;
                self.status = GameStatus::Playing;
                self.history.clear();
                self.effects = MoveEffects::default();

                Ok(vec![GameEvent::GameRestarted])
            }

            GameAction::KeepPlaying => {
                if self.status != GameStatus::Won {
                    return Err(GameError::NotWon);
                }
                self.status = GameStatus::Continue;

                Ok(vec![GameEvent::KeepPlaying])
            }
        }
    }

    fn play_move<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        if !self.status.accepts_moves() {
            return Err(GameError::GameFinished);
        }

        let result = apply_move(&self.grid, direction);
        if !result.moved {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        self.history.push(HistoryEntry {
            grid: self.grid.clone(),
            score: self.score,
            status: self.status,
        });

        events.push(GameEvent::TilesMoved {
            direction,
            merged: result.effects.merged_tiles.clone(),
        });

        let spawn = spawn_random_tile(&result.grid, rng);
        if let (Some(at), Some(value)) = (spawn.spawned, spawn.value()) {
            events.push(GameEvent::TileSpawned { at, value });
        }

        self.effects = MoveEffects {
            new_tiles: spawn.spawned.into_iter().collect(),
            merged_tiles: result.effects.merged_tiles,
        };
        self.grid = spawn.grid;

        if result.score_delta > 0 {
            self.score = self.score.saturating_add(result.score_delta);
            events.push(GameEvent::ScoreChanged {
                delta: result.score_delta,
                score: self.score,
            });
        }
        if self.score > self.best {
            self.best = self.score;
            events.push(GameEvent::BestScoreChanged { best: self.best });
        }

        events.extend(self.check_status());
        Ok(events)
    }

    /// Win check first, then the no-moves check, which overrides a same-turn win
    fn check_status(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        let max = max_tile(&self.grid);
        if self.status == GameStatus::Playing && max >= self.config.win_threshold {
            self.status = GameStatus::Won;
            events.push(GameEvent::GameWon { max_tile: max });
        }

        if !has_moves(&self.grid) {
            self.status = GameStatus::Over;
            events.push(GameEvent::GameOver { score: self.score });
        }

        events
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn starting_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    (0..STARTING_TILES).fold(Grid::new(), |grid, _| spawn_random_tile(&grid, rng).grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn game_with(grid: Grid) -> GameState {
        let mut game = GameState::new_with_rng(GameConfig::default(), &mut rng());
        game.grid = grid;
        game
    }

    #[test]
    fn test_new_game_has_two_tiles() {
        let game = GameState::new_with_rng(GameConfig::default(), &mut rng());
        assert_eq!(game.grid.occupied(), 2);
        assert_eq!(game.score, 0);
        assert_eq!(game.status, GameStatus::Playing);
        assert!(!game.can_undo());
        assert!(game.effects().is_empty());
    }

    #[test]
    fn test_move_spawns_and_scores() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        let events = game
            .apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        assert_eq!(game.score, 4);
        assert_eq!(game.best, 4);
        assert_eq!(game.grid.get(Coord::new(0, 0)), Some(4));
        assert_eq!(game.grid.occupied(), 2);
        assert_eq!(game.effects().merged_tiles, vec![Coord::new(0, 0)]);
        assert_eq!(game.effects().new_tiles.len(), 1);
        assert!(game.can_undo());

        assert!(matches!(events[0], GameEvent::TilesMoved { direction: Direction::Left, .. }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::TileSpawned { .. })));
        assert!(events.contains(&GameEvent::ScoreChanged { delta: 4, score: 4 }));
        assert!(events.contains(&GameEvent::BestScoreChanged { best: 4 }));
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let grid = Grid::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = game_with(grid.clone());
        let before = game.clone();

        let events = game
            .apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(game, before);
        assert_eq!(game.grid, grid);
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let start = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = game_with(start.clone());
        game.apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        let events = game.apply_action(GameAction::Undo).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::MoveUndone {
                score: 0,
                status: GameStatus::Playing
            }]
        );
        assert_eq!(game.grid, start);
        assert_eq!(game.score, 0);
        // Best survives undo
        assert_eq!(game.best, 4);
        assert!(game.effects().is_empty());
        assert_eq!(game.apply_action(GameAction::Undo), Err(GameError::NothingToUndo));
    }

    #[test]
    fn test_reaching_threshold_wins() {
        let mut game = game_with(Grid::from_rows([[64, 64, 0, 0], [0; 4], [0; 4], [0; 4]]));
        let events = game
            .apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        assert_eq!(game.status, GameStatus::Won);
        assert!(events.contains(&GameEvent::GameWon { max_tile: 128 }));
        assert!(game.is_finished());
        assert_eq!(
            game.apply_action(GameAction::Move(Direction::Right)),
            Err(GameError::GameFinished)
        );
        assert!(game.valid_actions().contains(&GameAction::KeepPlaying));
    }

    #[test]
    fn test_keep_playing_after_win() {
        let mut game = game_with(Grid::from_rows([[128, 0, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]]));
        assert_eq!(game.apply_action(GameAction::KeepPlaying), Err(GameError::NotWon));

        game.status = GameStatus::Won;
        let events = game.apply_action(GameAction::KeepPlaying).unwrap();
        assert_eq!(events, vec![GameEvent::KeepPlaying]);
        assert_eq!(game.status, GameStatus::Continue);

        // A later big tile does not re-trigger the win
        game.apply_action_with_rng(GameAction::Move(Direction::Right), &mut rng())
            .unwrap();
        assert_eq!(game.status, GameStatus::Continue);
    }

    #[test]
    fn test_no_moves_left_is_game_over() {
        // Merging the leading pair frees exactly one cell; a 2 or a 4 there locks the board
        let grid = Grid::from_rows([
            [2, 2, 8, 16],
            [16, 2, 4, 8],
            [2, 4, 8, 16],
            [4, 8, 16, 32],
        ]);
        let mut game = game_with(grid);

        let events = game
            .apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        assert_eq!(game.grid.row(0)[..3], [4, 8, 16]);
        assert_eq!(game.grid.occupied(), 16);
        assert_eq!(game.status, GameStatus::Over);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 4 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::GameWon { .. })));
        assert!(game.valid_actions().iter().all(|a| !matches!(a, GameAction::Move(_))));
    }

    #[test]
    fn test_over_takes_precedence_over_won() {
        let mut game = game_with(Grid::new());
        game.grid = Grid::from_rows([
            [128, 2, 4, 8],
            [2, 4, 8, 16],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
        ]);
        let events = game.check_status();

        assert_eq!(game.status, GameStatus::Over);
        assert_eq!(
            events,
            vec![
                GameEvent::GameWon { max_tile: 128 },
                GameEvent::GameOver { score: game.score }
            ]
        );
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        game.apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        let events = game
            .apply_action_with_rng(GameAction::Restart, &mut rng())
            .unwrap();
        assert_eq!(events, vec![GameEvent::GameRestarted]);
        assert_eq!(game.score, 0);
        assert_eq!(game.best, 4);
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.grid.occupied(), 2);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_valid_actions() {
        let game = game_with(Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]));
        assert_eq!(
            game.valid_actions(),
            vec![
                GameAction::Move(Direction::Right),
                GameAction::Move(Direction::Down),
                GameAction::Restart,
            ]
        );
    }

    #[test]
    fn test_take_effects_clears() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        game.apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        let effects = game.take_effects();
        assert!(!effects.is_empty());
        assert!(game.effects().is_empty());
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        game.score = u32::MAX - 1;

        let events = game
            .apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();

        assert_eq!(game.score, u32::MAX);
        assert_eq!(game.best, u32::MAX);
        assert!(events.contains(&GameEvent::ScoreChanged {
            delta: 4,
            score: u32::MAX
        }));
    }

    #[test]
    fn test_restored_max_score_keeps_playing() {
        let json = r#"{"grid":[[2,2,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],"score":4294967295,"best":4294967295,"status":"Playing"}"#;
        let mut game = GameState::restore_or_new(json, GameConfig::default());
        assert_eq!(game.score, u32::MAX);

        game.apply_action_with_rng(GameAction::Move(Direction::Left), &mut rng())
            .unwrap();
        assert_eq!(game.score, u32::MAX);
        assert_eq!(game.grid.get(Coord::new(0, 0)), Some(4));
    }

    #[test]
    fn test_rejected_save_keeps_best() {
        let json = r#"{"grid":[[2147483648,2147483648,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],"score":10,"best":512,"status":"Playing"}"#;
        let game = GameState::restore_or_new(json, GameConfig::default());

        assert_eq!(game.score, 0);
        assert_eq!(game.best, 512);
        assert_eq!(game.grid.occupied(), 2);
        assert!(game.grid.is_well_formed());
    }

    #[test]
    fn test_history_respects_limit() {
        let config = GameConfig {
            win_threshold: 2048,
            history_limit: 2,
        };
        let mut rng = rng();
        let mut game = GameState::new_with_rng(config, &mut rng);

        let mut applied = 0;
        for direction in Direction::ALL.iter().cycle().take(40) {
            if let Ok(events) = game.apply_action_with_rng(GameAction::Move(*direction), &mut rng) {
                if !events.is_empty() {
                    applied += 1;
                }
            }
        }

        assert!(applied > 2);
        assert_eq!(game.history().len(), 2);
    }
}
