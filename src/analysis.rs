//! Whole-position analysis for display next to the board.
//!
//! Everything here is a pure read of a [`Board`]: per-side material, area
//! and influence, phase advice, an overall assessment from the current
//! score, and a numbered move log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{ANALYSIS_CLEAR_LEAD, ANALYSIS_INFLUENCE_RADIUS, ANALYSIS_SLIGHT_LEAD};
use crate::coord::move_to_vertex;
use crate::grid::{Color, Grid, chebyshev};
use crate::group::group;
use crate::heuristics::Phase;
use crate::territory::regions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideStrength {
    pub stones: usize,
    pub groups: usize,
    /// Zero when the side has no stones.
    pub avg_group_size: f64,
    /// Opponent stones this side has captured.
    pub captured: u32,
}

/// Area per side: stones plus the empty regions only that side borders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaReport {
    pub black: usize,
    pub white: usize,
    /// Empty points bordered by both colors or by none.
    pub neutral: usize,
}

impl AreaReport {
    pub fn black_advantage(&self) -> i64 {
        self.black as i64 - self.white as i64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfluenceReport {
    pub black: f64,
    pub white: f64,
}

impl InfluenceReport {
    /// White takes ties.
    pub fn dominant(&self) -> Color {
        if self.black > self.white {
            Color::Black
        } else {
            Color::White
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    BlackFarAhead,
    BlackAhead,
    Close,
    WhiteAhead,
    WhiteFarAhead,
}

impl Standing {
    /// Classify `black - white`.
    pub fn from_diff(diff: f32) -> Self {
        if diff > ANALYSIS_CLEAR_LEAD {
            Standing::BlackFarAhead
        } else if diff > ANALYSIS_SLIGHT_LEAD {
            Standing::BlackAhead
        } else if diff > -ANALYSIS_SLIGHT_LEAD {
            Standing::Close
        } else if diff > -ANALYSIS_CLEAR_LEAD {
            Standing::WhiteAhead
        } else {
            Standing::WhiteFarAhead
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Standing::BlackFarAhead => "Black is well ahead",
            Standing::BlackAhead => "Black is slightly ahead",
            Standing::Close => "the game is close",
            Standing::WhiteAhead => "White is slightly ahead",
            Standing::WhiteFarAhead => "White is well ahead",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub standing: Standing,
    pub black_score: f32,
    pub white_score: f32,
    pub score_diff: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionAnalysis {
    pub phase: Phase,
    pub move_count: usize,
    pub to_move: Color,
    pub black: SideStrength,
    pub white: SideStrength,
    pub area: AreaReport,
    pub influence: InfluenceReport,
    pub advice: Vec<String>,
    pub assessment: Assessment,
}

/// One numbered line of the move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based.
    pub number: usize,
    pub player: Color,
    /// Vertex such as "D4", or "pass".
    pub action: String,
    pub captured: u32,
}

pub fn analyze(board: &Board) -> PositionAnalysis {
    let grid = board.grid();
    let phase = Phase::from_move_count(board.move_count());
    let score = board.score();
    let diff = score.black - score.white;
    PositionAnalysis {
        phase,
        move_count: board.move_count(),
        to_move: board.current_player(),
        black: strength(grid, Color::Black, board.captures(Color::Black)),
        white: strength(grid, Color::White, board.captures(Color::White)),
        area: area(grid),
        influence: influence(grid),
        advice: advice(phase, board.move_count()),
        assessment: Assessment {
            standing: Standing::from_diff(diff),
            black_score: score.black,
            white_score: score.white,
            score_diff: diff,
        },
    }
}

pub fn strength(grid: &Grid, color: Color, captured: u32) -> SideStrength {
    let size = grid.size();
    let mut seen = vec![false; size * size];
    let mut sizes = Vec::new();
    for pt in grid.points() {
        if seen[pt.1 * size + pt.0] || grid.get(pt) != Some(color) {
            continue;
        }
        let stones = group(grid, pt, color);
        for &(x, y) in &stones {
            seen[y * size + x] = true;
        }
        sizes.push(stones.len());
    }

    let stones: usize = sizes.iter().sum();
    let avg_group_size = if sizes.is_empty() {
        0.0
    } else {
        stones as f64 / sizes.len() as f64
    };
    SideStrength {
        stones,
        groups: sizes.len(),
        avg_group_size,
        captured,
    }
}

pub fn area(grid: &Grid) -> AreaReport {
    let mut report = AreaReport {
        black: grid.count(Some(Color::Black)),
        white: grid.count(Some(Color::White)),
        neutral: 0,
    };
    for region in regions(grid) {
        let n = region.points.len();
        match region.owner {
            Some(Color::Black) => report.black += n,
            Some(Color::White) => report.white += n,
            None => report.neutral += n,
        }
    }
    report
}

/// Sum over every point of `1 / distance` to each stone in its window.
pub fn influence(grid: &Grid) -> InfluenceReport {
    let mut report = InfluenceReport {
        black: 0.0,
        white: 0.0,
    };
    for pt in grid.points() {
        for q in grid.window(pt, ANALYSIS_INFLUENCE_RADIUS) {
            let d = chebyshev(pt, q);
            if d == 0 {
                continue;
            }
            let w = 1.0 / d as f64;
            match grid.get(q) {
                Some(Color::Black) => report.black += w,
                Some(Color::White) => report.white += w,
                None => {}
            }
        }
    }
    report
}

fn advice(phase: Phase, moves: usize) -> Vec<String> {
    let lines: &[&str] = match phase {
        Phase::Opening if moves < 10 => &[
            "opening: corners and sides first, star points are good choices",
            "build a base in a corner before anything else",
        ],
        Phase::Opening => &["opening: corners and sides first, star points are good choices"],
        Phase::Middlegame => &[
            "middlegame: balance fighting against territory",
            "look for cuts against the opponent and connections for your own groups",
        ],
        Phase::Endgame => &[
            "endgame: take the boundary points and count",
            "weigh the size of each remaining move",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

pub fn move_log(board: &Board) -> Vec<LogEntry> {
    board
        .history()
        .iter()
        .enumerate()
        .map(|(i, r)| LogEntry {
            number: i + 1,
            player: r.player,
            action: move_to_vertex(r.mv, board.size()),
            captured: r.captured,
        })
        .collect()
}
