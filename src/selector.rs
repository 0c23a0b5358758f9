//! Difficulty-tiered move selection.
//!
//! The selector enumerates the legal moves of a board, scores them with a
//! tier-specific policy, and returns a [`Decision`]. It never mutates the
//! board; the caller applies the chosen move.
//!
//! - **Easy** plays a random legal move 30% of the time, otherwise picks
//!   greedily on captures, rescues, self-capture and opening star points.
//! - **Medium** adds cuts, connections and a scaled positional score.
//! - **Hard** runs the full [`Evaluator`] and keeps the near-best
//!   candidates for its rationale.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Move};
use crate::constants::*;
use crate::coord::{move_to_vertex, point_to_vertex};
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::grid::{Color, Grid, Point};
use crate::heuristics::{Phase, Probe, Tag, is_corner_star, is_side_star, positional, tactics};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (easy, medium, hard)")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// The selector's answer: a move and why.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub mv: Move,
    /// Reasons for the chosen move, strongest heuristic first.
    pub tags: Vec<Tag>,
    /// Other candidates that scored close to the chosen one (hard tier only).
    pub alternatives: Vec<Point>,
    /// Human-readable summary, meaningful without any further enrichment.
    pub rationale: String,
}

impl Decision {
    fn pass() -> Self {
        Self {
            mv: Move::Pass,
            tags: Vec::new(),
            alternatives: Vec::new(),
            rationale: "no legal moves left, passing".into(),
        }
    }

    fn play(pt: Point, tags: Vec<Tag>, alternatives: Vec<Point>, size: usize) -> Self {
        let mut rationale = point_to_vertex(pt, size);
        rationale.push_str(": ");
        if tags.is_empty() {
            rationale.push_str("best overall balance of the position");
        } else {
            let reasons: Vec<String> = tags.iter().map(Tag::to_string).collect();
            rationale.push_str(&reasons.join(", "));
        }
        if !alternatives.is_empty() {
            let alts: Vec<String> = alternatives
                .iter()
                .map(|&a| point_to_vertex(a, size))
                .collect();
            rationale.push_str(&format!("; also considered {}", alts.join(", ")));
        }
        Self {
            mv: Move::Play(pt),
            tags,
            alternatives,
            rationale,
        }
    }
}

/// A greedy pick: best point, its score and reasons.
struct Pick {
    pt: Point,
    score: f64,
    tags: Vec<Tag>,
}

pub struct MoveSelector {
    color: Color,
    difficulty: Difficulty,
    evaluator: Evaluator,
    rng: Rng,
}

impl MoveSelector {
    pub fn new(color: Color, difficulty: Difficulty) -> Self {
        Self {
            color,
            difficulty,
            evaluator: Evaluator::default(),
            rng: Rng::new(),
        }
    }

    /// A selector whose random choices are reproducible.
    pub fn with_seed(color: Color, difficulty: Difficulty, seed: u64) -> Self {
        Self::new(color, difficulty).with_rng(Rng::with_seed(seed))
    }

    pub fn with_rng(mut self, rng: Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Choose a move for this selector's color on `board`.
    ///
    /// Candidates are the board's legal moves, so call this on the
    /// selector's own turn. Returns a pass when no legal move exists.
    pub fn get_move(&mut self, board: &Board) -> Decision {
        let candidates = board.valid_moves();
        let Some(&first) = candidates.first() else {
            return Decision::pass();
        };
        let phase = Phase::from_move_count(board.move_count());

        let chosen = match self.difficulty {
            Difficulty::Easy => self.easy(board.grid(), &candidates, phase),
            Difficulty::Medium => self.medium(board.grid(), &candidates, phase),
            Difficulty::Hard => self.hard(board.grid(), &candidates, phase),
        };

        match chosen {
            Ok(decision) => {
                debug!(
                    difficulty = %self.difficulty,
                    color = %self.color,
                    mv = %move_to_vertex(decision.mv, board.size()),
                    "selected move"
                );
                decision
            }
            Err(e) => {
                warn!(error = %e, "evaluation failed, falling back to first legal move");
                Decision::play(first, vec![Tag::Fallback], Vec::new(), board.size())
            }
        }
    }

    fn easy(&mut self, grid: &Grid, candidates: &[Point], phase: Phase) -> Result<Decision, EvalError> {
        if self.rng.f64() < EASY_RANDOM_RATE {
            let pt = candidates[self.rng.usize(..candidates.len())];
            return Ok(Decision::play(pt, vec![Tag::Exploratory], Vec::new(), grid.size()));
        }

        let color = self.color;
        let pick = self.greedy(candidates, EASY_JITTER, |pt| {
            let t = tactics(grid, pt, color);
            let mut score = 0.0;
            let mut tags = Vec::new();
            if t.captures > 0 {
                score += EASY_CAPTURE;
                tags.push(Tag::Capture(t.captures));
            }
            if t.rescued > 0 {
                score += EASY_RESCUE;
                tags.push(Tag::Rescue(t.rescued));
            }
            if t.self_capture {
                score += EASY_SELF_CAPTURE;
            }
            if phase == Phase::Opening
                && (is_corner_star(grid.size(), pt) || is_side_star(grid.size(), pt))
            {
                score += EASY_STAR;
                tags.push(Tag::StarPoint);
            }
            (score, tags)
        })?;
        Ok(Decision::play(pick.pt, pick.tags, Vec::new(), grid.size()))
    }

    fn medium(&mut self, grid: &Grid, candidates: &[Point], phase: Phase) -> Result<Decision, EvalError> {
        let color = self.color;
        let pick = self.greedy(candidates, MEDIUM_JITTER, |pt| {
            let t = tactics(grid, pt, color);
            let mut score = 0.0;
            let mut tags = Vec::new();
            if t.captures > 0 {
                score += MEDIUM_CAPTURE;
                tags.push(Tag::Capture(t.captures));
            }
            if t.rescued > 0 {
                score += MEDIUM_RESCUE;
                tags.push(Tag::Rescue(t.rescued));
            }
            if t.self_capture {
                score += MEDIUM_SELF_CAPTURE;
            }
            if t.cut {
                score += MEDIUM_CUT;
                tags.push(Tag::Cut);
            }
            if t.connect {
                score += MEDIUM_CONNECT;
                tags.push(Tag::Connect);
            }
            let pos = positional(&Probe {
                grid,
                pt,
                player: color,
                phase,
            });
            score += pos.score * MEDIUM_POSITIONAL_SCALE;
            tags.extend(pos.tags);
            (score, tags)
        })?;
        Ok(Decision::play(pick.pt, pick.tags, Vec::new(), grid.size()))
    }

    fn hard(&mut self, grid: &Grid, candidates: &[Point], phase: Phase) -> Result<Decision, EvalError> {
        let mut scored = Vec::with_capacity(candidates.len());
        for &pt in candidates {
            let eval = self
                .evaluator
                .evaluate(grid, pt, self.color, phase, &mut self.rng)?;
            let score = eval.score + self.rng.f64() * HARD_JITTER;
            scored.push(Pick {
                pt,
                score,
                tags: eval.tags,
            });
        }

        // Stable sort keeps row-major order among equal scores.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        let best_score = scored[0].score;
        let alternatives = scored
            .iter()
            .skip(1)
            .take(HARD_MAX_CANDIDATES - 1)
            .take_while(|p| p.score > best_score - HARD_NEAR_BEST_MARGIN)
            .map(|p| p.pt)
            .collect();
        let best = scored.swap_remove(0);
        debug!(score = best.score, "hard tier best score");
        Ok(Decision::play(best.pt, best.tags, alternatives, grid.size()))
    }

    /// Pick the highest `score_fn` plus jitter; the first candidate wins ties.
    fn greedy<F>(&mut self, candidates: &[Point], jitter: f64, score_fn: F) -> Result<Pick, EvalError>
    where
        F: Fn(Point) -> (f64, Vec<Tag>),
    {
        let mut best = Pick {
            pt: candidates[0],
            score: f64::NEG_INFINITY,
            tags: Vec::new(),
        };
        for &pt in candidates {
            let (base, tags) = score_fn(pt);
            let score = base + self.rng.f64() * jitter;
            if !score.is_finite() {
                return Err(EvalError::NonFinite { point: pt });
            }
            if score > best.score {
                best = Pick { pt, score, tags };
            }
        }
        Ok(best)
    }
}
