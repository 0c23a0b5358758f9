//! Game configuration shared by the CLI, the GTP engine and sessions.

use serde::{Deserialize, Serialize};

use crate::board::{Board, validate_size};
use crate::constants::{DEFAULT_BOARD_SIZE, KOMI};
use crate::error::GoError;
use crate::grid::Color;
use crate::selector::{Difficulty, MoveSelector};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub komi: f32,
    pub difficulty: Difficulty,
    /// Color the AI plays in a human-vs-AI game.
    pub ai_color: Color,
    /// Seed for the AI's RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            komi: KOMI,
            difficulty: Difficulty::default(),
            ai_color: Color::White,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GoError> {
        validate_size(self.size)?;
        if !self.komi.is_finite() {
            return Err(GoError::InvalidConfiguration(format!(
                "komi must be a finite number, got {}",
                self.komi
            )));
        }
        Ok(())
    }

    /// An empty board with this configuration's size and komi.
    pub fn board(&self) -> Result<Board, GoError> {
        self.validate()?;
        Ok(Board::new(self.size)?.with_komi(self.komi))
    }

    /// A selector playing `color` at this configuration's difficulty.
    ///
    /// Seeded selectors for different colors get distinct streams so a
    /// self-play game does not mirror itself.
    pub fn selector(&self, color: Color) -> MoveSelector {
        match self.seed {
            Some(seed) => {
                let offset = match color {
                    Color::Black => 0,
                    Color::White => 1,
                };
                MoveSelector::with_seed(color, self.difficulty, seed.wrapping_add(offset))
            }
            None => MoveSelector::new(color, self.difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = GameConfig::default();
        assert_eq!(c.size, 19);
        assert_eq!(c.komi, 6.5);
        assert_eq!(c.difficulty, Difficulty::Medium);
        assert_eq!(c.ai_color, Color::White);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_size_and_komi() {
        let c = GameConfig {
            size: 1,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(GoError::InvalidConfiguration(_))));

        let c = GameConfig {
            komi: f32::INFINITY,
            ..GameConfig::default()
        };
        assert!(matches!(c.board(), Err(GoError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_board_uses_size_and_komi() {
        let c = GameConfig {
            size: 9,
            komi: 0.5,
            ..GameConfig::default()
        };
        let b = c.board().unwrap();
        assert_eq!(b.size(), 9);
        assert_eq!(b.komi(), 0.5);
    }

    #[test]
    fn test_seeded_selectors_are_reproducible() {
        let c = GameConfig {
            size: 9,
            seed: Some(3),
            difficulty: Difficulty::Hard,
            ..GameConfig::default()
        };
        let b = c.board().unwrap();
        let a = c.selector(Color::Black).get_move(&b);
        let again = c.selector(Color::Black).get_move(&b);
        assert_eq!(a, again);
    }
}
