//! Human-vs-AI games and a store of concurrent sessions.
//!
//! A [`Game`] pairs a [`Board`] with the selector playing the AI's color and
//! enforces whose turn it is. [`SessionStore`] hands out ids for games so a
//! hosting layer can keep several of them alive at once.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{LogEntry, PositionAnalysis, analyze, move_log};
use crate::board::{Board, Move, Score};
use crate::config::GameConfig;
use crate::error::GoError;
use crate::grid::{Color, Point};
use crate::selector::{Decision, MoveSelector};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct Game {
    board: Board,
    ai: MoveSelector,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GoError> {
        let board = config.board()?;
        let ai = config.selector(config.ai_color);
        Ok(Self { board, ai })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ai_color(&self) -> Color {
        self.ai.color()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.board.current_player() == self.ai.color()
    }

    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    fn human_turn(&self) -> Result<(), GoError> {
        if self.is_over() {
            return Err(GoError::GameOver);
        }
        if self.is_ai_turn() {
            return Err(GoError::OutOfTurn);
        }
        Ok(())
    }

    /// The human places a stone. Returns stones captured.
    pub fn play(&mut self, pt: Point) -> Result<u32, GoError> {
        self.human_turn()?;
        self.board.place_stone(pt)
    }

    /// The human passes.
    pub fn pass(&mut self) -> Result<(), GoError> {
        self.human_turn()?;
        self.board.pass_move()
    }

    /// Let the AI choose and apply its move.
    pub fn ai_move(&mut self) -> Result<Decision, GoError> {
        if self.is_over() {
            return Err(GoError::GameOver);
        }
        if !self.is_ai_turn() {
            return Err(GoError::OutOfTurn);
        }
        let decision = self.ai.get_move(&self.board);
        self.board.play(decision.mv)?;
        Ok(decision)
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Final score and winner once two consecutive passes ended the game.
    pub fn result(&self) -> Option<(Score, Color)> {
        if !self.is_over() {
            return None;
        }
        let score = self.score();
        Some((score, score.winner()))
    }

    pub fn analyze(&self) -> PositionAnalysis {
        analyze(&self.board)
    }

    pub fn move_log(&self) -> Vec<LogEntry> {
        move_log(&self.board)
    }

    /// Apply a move for whichever side is to move, bypassing turn checks.
    /// Used for replays and self-play.
    pub fn force(&mut self, mv: Move) -> Result<u32, GoError> {
        self.board.play(mv)
    }
}

#[derive(Default)]
pub struct SessionStore {
    games: HashMap<SessionId, Game>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, config: &GameConfig) -> Result<SessionId, GoError> {
        let game = Game::new(config)?;
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.games.insert(id, game);
        info!(
            session = %id,
            size = config.size,
            difficulty = %config.difficulty,
            ai_color = %config.ai_color,
            "session created"
        );
        Ok(id)
    }

    pub fn get(&self, id: SessionId) -> Result<&Game, GoError> {
        self.games.get(&id).ok_or(GoError::UnknownSession(id.0))
    }

    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut Game, GoError> {
        self.games.get_mut(&id).ok_or(GoError::UnknownSession(id.0))
    }

    pub fn destroy(&mut self, id: SessionId) -> Result<(), GoError> {
        let game = self.games.remove(&id).ok_or(GoError::UnknownSession(id.0))?;
        debug!(session = %id, moves = game.board.move_count(), "session destroyed");
        Ok(())
    }

    pub fn analyze(&self, id: SessionId) -> Result<PositionAnalysis, GoError> {
        Ok(self.get(id)?.analyze())
    }

    pub fn move_log(&self, id: SessionId) -> Result<Vec<LogEntry>, GoError> {
        Ok(self.get(id)?.move_log())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Difficulty;

    fn config(ai_color: Color) -> GameConfig {
        GameConfig {
            size: 9,
            ai_color,
            seed: Some(11),
            difficulty: Difficulty::Hard,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_human_and_ai_alternate() {
        let mut game = Game::new(&config(Color::White)).unwrap();
        assert!(!game.is_ai_turn());
        assert_eq!(game.ai_move().unwrap_err(), GoError::OutOfTurn);

        game.play((4, 4)).unwrap();
        assert!(game.is_ai_turn());
        assert_eq!(game.play((3, 3)).unwrap_err(), GoError::OutOfTurn);

        let d = game.ai_move().unwrap();
        assert!(matches!(d.mv, Move::Play(_)));
        assert_eq!(game.board().move_count(), 2);
        assert!(!game.is_ai_turn());
    }

    #[test]
    fn test_ai_moves_first_when_playing_black() {
        let mut game = Game::new(&config(Color::Black)).unwrap();
        assert!(game.is_ai_turn());
        game.ai_move().unwrap();
        assert_eq!(game.board().current_player(), Color::White);
    }

    #[test]
    fn test_illegal_human_move_leaves_turn() {
        let mut game = Game::new(&config(Color::White)).unwrap();
        assert!(game.play((9, 0)).is_err());
        assert!(!game.is_ai_turn());
        assert_eq!(game.board().move_count(), 0);
    }

    #[test]
    fn test_result_after_two_passes() {
        let mut game = Game::new(&config(Color::White)).unwrap();
        assert!(game.result().is_none());
        game.pass().unwrap();
        game.force(Move::Pass).unwrap();
        let (score, winner) = game.result().unwrap();
        assert_eq!(score.white, 6.5);
        assert_eq!(winner, Color::White);
        assert_eq!(game.pass().unwrap_err(), GoError::GameOver);
        assert_eq!(game.ai_move().unwrap_err(), GoError::GameOver);
    }

    #[test]
    fn test_store_lifecycle() {
        let mut store = SessionStore::new();
        assert!(store.is_empty());
        let a = store.create(&config(Color::White)).unwrap();
        let b = store.create(&config(Color::Black)).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        store.get_mut(a).unwrap().play((2, 2)).unwrap();
        assert_eq!(store.get(a).unwrap().board().move_count(), 1);
        assert_eq!(store.get(b).unwrap().board().move_count(), 0);

        store.destroy(a).unwrap();
        assert_eq!(store.destroy(a), Err(GoError::UnknownSession(a.0)));
        assert!(matches!(store.get(a), Err(GoError::UnknownSession(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_analysis_through_store() {
        let mut store = SessionStore::new();
        let id = store.create(&config(Color::White)).unwrap();
        store.get_mut(id).unwrap().play((4, 4)).unwrap();
        store.get_mut(id).unwrap().ai_move().unwrap();

        let a = store.analyze(id).unwrap();
        assert_eq!(a.move_count, 2);
        assert_eq!(a.black.stones, 1);
        assert_eq!(a.white.stones, 1);
        assert_eq!(a.to_move, Color::Black);

        let log = store.move_log(id).unwrap();
        assert_eq!(log[0].action, "E5");
        assert_eq!(log[1].player, Color::White);

        store.destroy(id).unwrap();
        assert_eq!(store.analyze(id).err(), Some(GoError::UnknownSession(id.0)));
    }

    #[test]
    fn test_invalid_config_creates_nothing() {
        let mut store = SessionStore::new();
        let bad = GameConfig {
            size: 40,
            ..GameConfig::default()
        };
        assert!(store.create(&bad).is_err());
        assert!(store.is_empty());
    }
}
