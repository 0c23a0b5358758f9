//! The rule engine: a board that only changes through legal moves.
//!
//! [`Board`] owns the grid, whose turn it is, the move history, capture
//! counts and the ko point. `place_stone` and `pass_move` are the only
//! mutations; both validate everything before touching the grid, so an
//! error always leaves the board as it was.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{KOMI, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{GoError, IllegalReason};
use crate::grid::{Color, Grid, Point};
use crate::group::{captured_by, group, liberties, liberties_after};
use crate::territory::territory;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Play(Point),
    Pass,
}

/// One entry of the append-only move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub player: Color,
    /// Opponent stones removed by this move.
    pub captured: u32,
}

/// Area score: stones on the board + territory + captures, komi to White.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    /// Black wins only with a strictly higher score.
    pub fn winner(&self) -> Color {
        if self.black > self.white {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl fmt::Display for Score {
    /// GTP result notation, e.g. `B+3.5` or `W+6.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diff = self.black - self.white;
        if diff > 0.0 {
            write!(f, "B+{diff}")
        } else if diff < 0.0 {
            write!(f, "W+{}", -diff)
        } else {
            write!(f, "0")
        }
    }
}

/// Deep, serializable copy of everything a client needs to draw the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub rows: Vec<Vec<Option<Color>>>,
    pub current_player: Color,
    pub captured_black: u32,
    pub captured_white: u32,
    pub ko_point: Option<Point>,
    pub last_move: Option<Point>,
    pub history: Vec<MoveRecord>,
    pub komi: f32,
}

#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    current_player: Color,
    history: Vec<MoveRecord>,
    /// Stones captured *by* Black.
    captured_black: u32,
    /// Stones captured *by* White.
    captured_white: u32,
    /// Point the player to move may not take this turn.
    ko_point: Option<Point>,
    last_move: Option<Point>,
    komi: f32,
}

pub(crate) fn validate_size(size: usize) -> Result<(), GoError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(GoError::InvalidConfiguration(format!(
            "board size {size} is not supported ({MIN_BOARD_SIZE}..={MAX_BOARD_SIZE})"
        )));
    }
    Ok(())
}

impl Board {
    /// Create an empty board with Black to move.
    pub fn new(size: usize) -> Result<Self, GoError> {
        validate_size(size)?;
        Ok(Self {
            grid: Grid::new(size),
            current_player: Color::Black,
            history: Vec::new(),
            captured_black: 0,
            captured_white: 0,
            ko_point: None,
            last_move: None,
            komi: KOMI,
        })
    }

    /// Start from an arbitrary arrangement of stones, e.g. a position
    /// restored by a hosting layer or built for analysis.
    pub fn from_position(grid: Grid, to_move: Color) -> Result<Self, GoError> {
        let mut board = Self::new(grid.size())?;
        board.grid = grid;
        board.current_player = to_move;
        Ok(board)
    }

    pub fn with_komi(mut self, komi: f32) -> Self {
        self.komi = komi;
        self
    }

    // -- Accessors --

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn ko_point(&self) -> Option<Point> {
        self.ko_point
    }

    /// Last stone placed; passes do not change it.
    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    /// Stones captured by `color`.
    pub fn captures(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.captured_black,
            Color::White => self.captured_white,
        }
    }

    /// Deep copy of the grid.
    pub fn board_state(&self) -> Grid {
        self.grid.clone()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size(),
            rows: self.grid.rows(),
            current_player: self.current_player,
            captured_black: self.captured_black,
            captured_white: self.captured_white,
            ko_point: self.ko_point,
            last_move: self.last_move,
            history: self.history.clone(),
            komi: self.komi,
        }
    }

    // -- Rules --

    /// Check whether the player to move may place a stone on `pt`.
    ///
    /// A move that captures is always legal; otherwise the new stone's group
    /// must keep at least one liberty.
    pub fn check_move(&self, pt: Point) -> Result<(), GoError> {
        if !self.grid.on_board(pt) {
            return Err(GoError::illegal(pt, IllegalReason::OutOfBounds));
        }
        if self.grid.get(pt).is_some() {
            return Err(GoError::illegal(pt, IllegalReason::Occupied));
        }
        if self.ko_point == Some(pt) {
            return Err(GoError::illegal(pt, IllegalReason::Ko));
        }
        let color = self.current_player;
        if !captured_by(&self.grid, pt, color).is_empty() {
            return Ok(());
        }
        if liberties_after(&self.grid, pt, color) == 0 {
            return Err(GoError::illegal(pt, IllegalReason::Suicide));
        }
        Ok(())
    }

    pub fn is_legal(&self, pt: Point) -> bool {
        self.check_move(pt).is_ok()
    }

    /// Place a stone for the player to move.
    ///
    /// Returns the number of opponent stones captured.
    pub fn place_stone(&mut self, pt: Point) -> Result<u32, GoError> {
        if self.is_game_over() {
            return Err(GoError::GameOver);
        }
        self.check_move(pt)?;

        let color = self.current_player;
        let removed = captured_by(&self.grid, pt, color);

        self.grid.set(pt, Some(color));
        for &r in &removed {
            self.grid.set(r, None);
        }

        let captured = removed.len() as u32;
        match color {
            Color::Black => self.captured_black += captured,
            Color::White => self.captured_white += captured,
        }

        // Single-stone capture by a stone left in atari: immediate retake is forbidden.
        self.ko_point = None;
        if captured == 1 && liberties(&self.grid, &group(&self.grid, pt, color), None) == 1 {
            self.ko_point = Some(removed[0]);
            debug!(ko = ?removed[0], "ko created");
        }
        if captured > 0 {
            debug!(player = %color, at = ?pt, captured, "stones captured");
        }

        self.history.push(MoveRecord {
            mv: Move::Play(pt),
            player: color,
            captured,
        });
        self.last_move = Some(pt);
        self.current_player = color.opponent();
        Ok(captured)
    }

    /// Pass the turn. Clears the ko point.
    pub fn pass_move(&mut self) -> Result<(), GoError> {
        if self.is_game_over() {
            return Err(GoError::GameOver);
        }
        self.history.push(MoveRecord {
            mv: Move::Pass,
            player: self.current_player,
            captured: 0,
        });
        self.current_player = self.current_player.opponent();
        self.ko_point = None;
        Ok(())
    }

    /// Apply either kind of move. Returns stones captured (0 for a pass).
    pub fn play(&mut self, mv: Move) -> Result<u32, GoError> {
        match mv {
            Move::Play(pt) => self.place_stone(pt),
            Move::Pass => self.pass_move().map(|()| 0),
        }
    }

    /// The game ends after two consecutive passes.
    pub fn is_game_over(&self) -> bool {
        matches!(
            self.history.as_slice(),
            [.., a, b] if a.mv == Move::Pass && b.mv == Move::Pass
        )
    }

    /// Legal placements for the player to move, in row-major order.
    pub fn valid_moves(&self) -> Vec<Point> {
        self.grid.points().filter(|&pt| self.is_legal(pt)).collect()
    }

    /// Area score with captures added and komi given to White.
    pub fn score(&self) -> Score {
        let black = self.captured_black as usize
            + self.grid.count(Some(Color::Black))
            + territory(&self.grid, Color::Black);
        let white = self.captured_white as usize
            + self.grid.count(Some(Color::White))
            + territory(&self.grid, Color::White);
        Score {
            black: black as f32,
            white: white as f32 + self.komi,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        writeln!(
            f,
            "{} to move, captures B:{} W:{}",
            self.current_player, self.captured_black, self.captured_white
        )
    }
}
