//! Constants for board geometry, scoring, and the heuristic AI.
//!
//! Everything the rule engine and the move selector treat as a fixed number
//! lives here, so the tuning of the AI can be read in one place.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest board size accepted at construction.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board size accepted at construction (the GTP vertex alphabet tops out at 25).
pub const MAX_BOARD_SIZE: usize = 25;

/// Board size used when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Maximum game length for self-play, as a multiple of the board area.
pub const MAX_GAME_LEN_FACTOR: usize = 3;

// =============================================================================
// Scoring
// =============================================================================

/// Komi (compensation points for White).
pub const KOMI: f32 = 6.5;

// =============================================================================
// Game Phases
// =============================================================================

/// Moves played before the game leaves the opening.
pub const OPENING_MOVES: usize = 40;

/// Moves played before the game enters the endgame.
pub const MIDDLEGAME_MOVES: usize = 120;

// =============================================================================
// Heuristic Weights
// =============================================================================

pub const WEIGHT_TACTICAL: f64 = 2.5;
pub const WEIGHT_POSITIONAL: f64 = 1.5;
pub const WEIGHT_SHAPE: f64 = 1.2;
pub const WEIGHT_INFLUENCE: f64 = 1.0;
pub const WEIGHT_TERRITORY: f64 = 1.0;

/// Axis scores must exceed these before their tags show up in a rationale.
pub const REPORT_TACTICAL: f64 = 10.0;
pub const REPORT_POSITIONAL: f64 = 15.0;
pub const REPORT_SHAPE: f64 = 10.0;
pub const REPORT_INFLUENCE: f64 = 8.0;
pub const REPORT_TERRITORY: f64 = 8.0;

/// Upper bound of the uniform noise added to every axis score.
pub const AXIS_JITTER: f64 = 0.1;

// =============================================================================
// Tactical Bonuses
// =============================================================================

pub const CAPTURE_BASE: f64 = 30.0;
pub const CAPTURE_PER_STONE: f64 = 5.0;
pub const RESCUE_BASE: f64 = 25.0;
pub const RESCUE_PER_STONE: f64 = 3.0;
pub const SELF_CAPTURE_PENALTY: f64 = -50.0;
pub const CUT_BONUS: f64 = 20.0;
pub const CONNECT_BONUS: f64 = 15.0;

// =============================================================================
// Positional Bonuses
// =============================================================================

pub const CORNER_STAR_BONUS: f64 = 25.0;
pub const SIDE_STAR_BONUS: f64 = 20.0;
pub const OPENING_POINT_BONUS: f64 = 18.0;
pub const THIRD_FOURTH_LINE_BONUS: f64 = 12.0;
pub const DEEP_INTERIOR_PENALTY: f64 = -5.0;

/// Center bonus at distance 0; it decays by `CENTER_DECAY` per Manhattan step.
pub const CENTER_BONUS: f64 = 15.0;
pub const CENTER_DECAY: f64 = 0.5;

/// Bonus for playing within `FIGHT_RADIUS` (Chebyshev) of an enemy stone.
pub const FIGHT_BONUS: f64 = 15.0;
pub const FIGHT_RADIUS: usize = 2;

pub const ENDGAME_BASE: f64 = 5.0;
pub const ENDGAME_EDGE_BONUS: f64 = 5.0;
pub const ENDGAME_EDGE_DISTANCE: usize = 2;
pub const ENDGAME_FRIEND_BONUS: f64 = 3.0;

// =============================================================================
// Shape and Influence
// =============================================================================

pub const GOOD_SHAPE_BONUS: f64 = 15.0;
pub const BAD_SHAPE_PENALTY: f64 = -15.0;

/// Largest square radius scanned by the efficiency term.
pub const EFFICIENCY_RADIUS: usize = 3;

/// Window radius of the thickness scan.
pub const THICKNESS_RADIUS: usize = 3;

pub const INITIATIVE_BONUS: f64 = 12.0;

/// Cells visited by the bounded territory flood fill.
pub const TERRITORY_FLOOD_CAP: usize = 20;

// =============================================================================
// Difficulty Tiers
// =============================================================================

/// Share of easy-tier calls that pick a uniformly random legal move.
pub const EASY_RANDOM_RATE: f64 = 0.3;
pub const EASY_JITTER: f64 = 5.0;
pub const EASY_CAPTURE: f64 = 20.0;
pub const EASY_RESCUE: f64 = 15.0;
pub const EASY_SELF_CAPTURE: f64 = -30.0;
pub const EASY_STAR: f64 = 15.0;

pub const MEDIUM_JITTER: f64 = 3.0;
pub const MEDIUM_CAPTURE: f64 = 25.0;
pub const MEDIUM_RESCUE: f64 = 20.0;
pub const MEDIUM_SELF_CAPTURE: f64 = -40.0;
pub const MEDIUM_CUT: f64 = 15.0;
pub const MEDIUM_CONNECT: f64 = 12.0;
pub const MEDIUM_POSITIONAL_SCALE: f64 = 0.8;

pub const HARD_JITTER: f64 = 0.5;

/// Hard-tier candidates within this margin of the best are kept for the rationale.
pub const HARD_NEAR_BEST_MARGIN: f64 = 2.0;

/// At most this many candidates (best included) are kept.
pub const HARD_MAX_CANDIDATES: usize = 3;

// =============================================================================
// Position Analysis
// =============================================================================

/// Half-width of the window each point's influence is summed over.
pub const ANALYSIS_INFLUENCE_RADIUS: usize = 3;

/// Score difference beyond which one side is clearly ahead.
pub const ANALYSIS_CLEAR_LEAD: f32 = 10.0;
pub const ANALYSIS_SLIGHT_LEAD: f32 = 5.0;
