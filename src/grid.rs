//! Stone colors, points, and the N×N grid they live on.
//!
//! The grid is a plain row-major array of `Option<Color>` indexed by
//! `(x, y)`, with `(0, 0)` in the top-left corner. It knows nothing about
//! the rules; [`crate::board::Board`] owns one and enforces them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-letter name used by GTP and by rendered boards.
    pub fn letter(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A board coordinate `(x, y)`: column, then row from the top.
pub type Point = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (x, y): Point) -> usize {
        y * self.size + x
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    /// Contents of a cell; off-board points read as empty.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.on_board(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.on_board(pt) && self.get(pt).is_none()
    }

    pub(crate) fn set(&mut self, pt: Point, stone: Option<Color>) {
        let i = self.idx(pt);
        self.cells[i] = stone;
    }

    /// Orthogonal neighbors that are on the board.
    pub fn neighbors(&self, (x, y): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Diagonal neighbors that are on the board.
    pub fn diagonals(&self, (x, y): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 0 && y > 0 {
            v.push((x - 1, y - 1));
        }
        if x + 1 < s && y > 0 {
            v.push((x + 1, y - 1));
        }
        if x > 0 && y + 1 < s {
            v.push((x - 1, y + 1));
        }
        if x + 1 < s && y + 1 < s {
            v.push((x + 1, y + 1));
        }
        v.into_iter()
    }

    /// On-board points of the square window of `radius` around `pt`, `pt` included.
    pub fn window(&self, (x, y): Point, radius: usize) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = (x + radius).min(s.saturating_sub(1));
        let y1 = (y + radius).min(s.saturating_sub(1));
        (y0..=y1).flat_map(move |wy| (x0..=x1).map(move |wx| (wx, wy)))
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    /// Number of cells holding `stone` (`None` counts empty cells).
    pub fn count(&self, stone: Option<Color>) -> usize {
        self.cells.iter().filter(|&&c| c == stone).count()
    }

    /// Rows of cells, top row first.
    pub fn rows(&self) -> Vec<Vec<Option<Color>>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }
}

/// Distance to the nearest edge (0 on the first line).
pub fn edge_distance(size: usize, (x, y): Point) -> usize {
    x.min(y).min(size - 1 - x).min(size - 1 - y)
}

/// Chebyshev distance between two points.
pub fn chebyshev((ax, ay): Point, (bx, by): Point) -> usize {
    ax.abs_diff(bx).max(ay.abs_diff(by))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.get((x, y)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
