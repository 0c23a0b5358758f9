//! Single-ply move heuristics.
//!
//! Each axis is a pure function of a [`Probe`] (grid, candidate point,
//! player, game phase) returning an [`AxisScore`]. None of them mutate the
//! grid: "what if" questions go through the excluding-liberty queries in
//! [`crate::group`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::grid::{Color, Grid, Point, chebyshev, edge_distance};
use crate::group::{adjacent_groups, captured_by, liberties, liberties_after};

/// Game phase, driven purely by the number of moves played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Opening,
    Middlegame,
    Endgame,
}

impl Phase {
    pub fn from_move_count(moves: usize) -> Self {
        if moves < OPENING_MOVES {
            Phase::Opening
        } else if moves < MIDDLEGAME_MOVES {
            Phase::Middlegame
        } else {
            Phase::Endgame
        }
    }
}

/// A reason attached to a candidate move.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Capture(usize),
    Rescue(usize),
    SelfCapture,
    Cut,
    Connect,
    LadderRisk,
    CornerStar,
    SideStar,
    OpeningPoint,
    ThirdFourthLine,
    NearFight,
    EndgameValue(f64),
    StarPoint,
    GoodShape,
    BadShape,
    Efficient(f64),
    Thickness(f64),
    Initiative,
    Territory(usize),
    Exploratory,
    Fallback,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Capture(1) => write!(f, "captures a stone"),
            Tag::Capture(n) => write!(f, "captures {n} stones"),
            Tag::Rescue(1) => write!(f, "saves a stone in atari"),
            Tag::Rescue(n) => write!(f, "saves {n} stones in atari"),
            Tag::SelfCapture => write!(f, "would be captured"),
            Tag::Cut => write!(f, "cuts opponent groups apart"),
            Tag::Connect => write!(f, "connects own stones"),
            Tag::LadderRisk => write!(f, "runs into a ladder"),
            Tag::CornerStar => write!(f, "takes a corner star point"),
            Tag::SideStar => write!(f, "takes a side star point"),
            Tag::OpeningPoint => write!(f, "takes a key opening point"),
            Tag::ThirdFourthLine => write!(f, "plays on the third or fourth line"),
            Tag::NearFight => write!(f, "joins the fight"),
            Tag::EndgameValue(v) => write!(f, "endgame move worth about {v:.0} points"),
            Tag::StarPoint => write!(f, "takes a star point"),
            Tag::GoodShape => write!(f, "makes good shape"),
            Tag::BadShape => write!(f, "makes an empty triangle"),
            Tag::Efficient(v) => write!(f, "works efficiently with nearby stones ({v:.0})"),
            Tag::Thickness(v) => write!(f, "builds thickness ({v:.0})"),
            Tag::Initiative => write!(f, "keeps the initiative"),
            Tag::Territory(n) => write!(f, "controls about {n} points"),
            Tag::Exploratory => write!(f, "tries this point"),
            Tag::Fallback => write!(f, "first legal move"),
        }
    }
}

/// Raw (unweighted) score of one heuristic axis plus its reasons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisScore {
    pub score: f64,
    pub tags: Vec<Tag>,
}

impl AxisScore {
    fn add(&mut self, points: f64, tag: Option<Tag>) {
        self.score += points;
        self.tags.extend(tag);
    }
}

/// A candidate placement seen from one player's side.
#[derive(Clone, Copy, Debug)]
pub struct Probe<'a> {
    pub grid: &'a Grid,
    pub pt: Point,
    pub player: Color,
    pub phase: Phase,
}

/// Tactical facts about a placement, shared by every difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tactics {
    /// Opponent stones the placement removes.
    pub captures: usize,
    /// Friendly stones in atari next to the point.
    pub rescued: usize,
    /// The new stone's group ends with no liberties.
    pub self_capture: bool,
    pub cut: bool,
    pub connect: bool,
}

pub fn tactics(grid: &Grid, pt: Point, player: Color) -> Tactics {
    let captures = captured_by(grid, pt, player).len();
    let rescued = adjacent_groups(grid, pt, player)
        .iter()
        .filter(|g| liberties(grid, g, None) == 1)
        .map(Vec::len)
        .sum();
    let friendly = grid
        .neighbors(pt)
        .filter(|&n| grid.get(n) == Some(player))
        .count();

    Tactics {
        captures,
        rescued,
        self_capture: captures == 0 && liberties_after(grid, pt, player) == 0,
        cut: adjacent_groups(grid, pt, player.opponent()).len() >= 2,
        connect: friendly >= 2,
    }
}

/// Ladder reading is not implemented: no move is ever flagged as running
/// into a ladder.
pub fn runs_into_ladder(_grid: &Grid, _pt: Point, _player: Color) -> bool {
    false
}

// =============================================================================
// Axes
// =============================================================================

pub fn tactical(p: &Probe) -> AxisScore {
    let t = tactics(p.grid, p.pt, p.player);
    let mut s = AxisScore::default();

    if t.captures > 0 {
        s.add(
            CAPTURE_BASE + CAPTURE_PER_STONE * t.captures as f64,
            Some(Tag::Capture(t.captures)),
        );
    }
    if t.rescued > 0 {
        s.add(
            RESCUE_BASE + RESCUE_PER_STONE * t.rescued as f64,
            Some(Tag::Rescue(t.rescued)),
        );
    }
    if t.self_capture {
        s.add(SELF_CAPTURE_PENALTY, Some(Tag::SelfCapture));
    }
    if t.cut {
        s.add(CUT_BONUS, Some(Tag::Cut));
    }
    if t.connect {
        s.add(CONNECT_BONUS, Some(Tag::Connect));
    }
    if runs_into_ladder(p.grid, p.pt, p.player) {
        s.add(0.0, Some(Tag::LadderRisk));
    }
    s
}

/// Phase-dependent value of the location itself.
pub fn positional(p: &Probe) -> AxisScore {
    match p.phase {
        Phase::Opening => opening_value(p.grid.size(), p.pt),
        Phase::Middlegame => middlegame_value(p),
        Phase::Endgame => endgame_value(p),
    }
}

fn opening_value(size: usize, pt: Point) -> AxisScore {
    let mut s = AxisScore::default();
    if is_corner_star(size, pt) {
        s.add(CORNER_STAR_BONUS, Some(Tag::CornerStar));
    } else if is_side_star(size, pt) {
        s.add(SIDE_STAR_BONUS, Some(Tag::SideStar));
    } else if is_opening_point(size, pt) {
        s.add(OPENING_POINT_BONUS, Some(Tag::OpeningPoint));
    } else {
        match edge_distance(size, pt) {
            2..=4 => s.add(THIRD_FOURTH_LINE_BONUS, Some(Tag::ThirdFourthLine)),
            0 | 1 => {}
            _ => s.add(DEEP_INTERIOR_PENALTY, None),
        }
    }
    s
}

fn middlegame_value(p: &Probe) -> AxisScore {
    let mid = p.grid.size() / 2;
    let (x, y) = p.pt;
    let center_dist = (x.abs_diff(mid) + y.abs_diff(mid)) as f64;
    let mut s = AxisScore::default();
    s.add((CENTER_BONUS - center_dist * CENTER_DECAY).max(0.0), None);

    if near_color(p.grid, p.pt, p.player.opponent(), FIGHT_RADIUS) {
        s.add(FIGHT_BONUS, Some(Tag::NearFight));
    }
    s
}

fn endgame_value(p: &Probe) -> AxisScore {
    let mut value = ENDGAME_BASE;
    if edge_distance(p.grid.size(), p.pt) <= ENDGAME_EDGE_DISTANCE {
        value += ENDGAME_EDGE_BONUS;
    }
    let friends = p
        .grid
        .neighbors(p.pt)
        .filter(|&n| p.grid.get(n) == Some(p.player))
        .count();
    value += ENDGAME_FRIEND_BONUS * friends as f64;

    let tag = (value > 10.0).then_some(Tag::EndgameValue(value));
    AxisScore {
        score: value,
        tags: tag.into_iter().collect(),
    }
}

/// Empty-triangle penalty or good-shape bonus, plus neighborhood efficiency.
pub fn shape(p: &Probe) -> AxisScore {
    let own = Some(p.player);
    let friendly = p.grid.neighbors(p.pt).filter(|&n| p.grid.get(n) == own).count();
    let diagonal = p.grid.diagonals(p.pt).filter(|&n| p.grid.get(n) == own).count();

    let mut s = AxisScore::default();
    if friendly == 2 && diagonal >= 1 {
        s.add(BAD_SHAPE_PENALTY, Some(Tag::BadShape));
    } else if friendly >= 2 {
        s.add(GOOD_SHAPE_BONUS, Some(Tag::GoodShape));
    }

    let efficiency = efficiency(p);
    let tag = (efficiency > REPORT_SHAPE).then_some(Tag::Efficient(efficiency));
    s.add(efficiency, tag);
    s
}

/// Own stones count fully and enemy stones half, summed over square
/// windows of radius 1..=3 and divided by the radius.
fn efficiency(p: &Probe) -> f64 {
    let enemy = Some(p.player.opponent());
    (1..=EFFICIENCY_RADIUS)
        .map(|r| {
            let count: f64 = p
                .grid
                .window(p.pt, r)
                .map(|n| match p.grid.get(n) {
                    c if c == Some(p.player) => 1.0,
                    c if c == enemy => 0.5,
                    _ => 0.0,
                })
                .sum();
            count / r as f64
        })
        .sum()
}

/// Thickness from nearby friendly stones plus an initiative bonus.
pub fn influence(p: &Probe) -> AxisScore {
    let thickness: f64 = p
        .grid
        .window(p.pt, THICKNESS_RADIUS)
        .filter(|&n| n != p.pt && p.grid.get(n) == Some(p.player))
        .map(|n| (THICKNESS_RADIUS + 1 - chebyshev(n, p.pt)) as f64 / 2.0)
        .sum();

    let mut s = AxisScore::default();
    let tag = (thickness > REPORT_INFLUENCE).then_some(Tag::Thickness(thickness));
    s.add(thickness, tag);
    if near_color(p.grid, p.pt, p.player.opponent(), 1) {
        s.add(INITIATIVE_BONUS, Some(Tag::Initiative));
    }
    s
}

/// Empty points reachable from the candidate, capped at
/// `TERRITORY_FLOOD_CAP` visited cells.
pub fn territory_control(p: &Probe) -> AxisScore {
    let size = p.grid.size();
    let mut visited = vec![false; size * size];
    let mut stack = vec![p.pt];
    let mut seen = 0;
    let mut empty = 0;

    while let Some(pt) = stack.pop() {
        if seen >= TERRITORY_FLOOD_CAP {
            break;
        }
        let i = pt.1 * size + pt.0;
        if visited[i] {
            continue;
        }
        visited[i] = true;
        seen += 1;

        if p.grid.get(pt).is_none() {
            empty += 1;
            stack.extend(p.grid.neighbors(pt));
        }
    }

    AxisScore {
        score: empty as f64,
        tags: vec![Tag::Territory(empty)],
    }
}

// =============================================================================
// Board geometry helpers
// =============================================================================

fn near_color(grid: &Grid, pt: Point, color: Color, radius: usize) -> bool {
    grid.window(pt, radius).any(|n| grid.get(n) == Some(color))
}

/// Line (0-based) of the star points: the 4th line from 13×13 up, the 3rd on smaller boards.
fn star_line(size: usize) -> Option<usize> {
    match size {
        s if s >= 13 => Some(3),
        s if s >= 9 => Some(2),
        _ => None,
    }
}

pub fn is_corner_star(size: usize, (x, y): Point) -> bool {
    star_line(size).is_some_and(|l| {
        let far = size - 1 - l;
        (x == l || x == far) && (y == l || y == far)
    })
}

/// Side star points exist only on odd boards of 13 and up.
pub fn is_side_star(size: usize, (x, y): Point) -> bool {
    if size < 13 || size % 2 == 0 {
        return false;
    }
    let l = 3;
    let far = size - 1 - l;
    let mid = size / 2;
    (x == mid && (y == l || y == far)) || (y == mid && (x == l || x == far))
}

/// The two komoku points next to each corner star, one step toward the edges.
pub fn is_opening_point(size: usize, (x, y): Point) -> bool {
    if size < 13 {
        return false;
    }
    let l = 3;
    let far = size - 1 - l;
    let toward_edge = |c: usize| if c == l { l - 1 } else { far + 1 };
    [l, far].iter().any(|&cx| {
        [l, far].iter().any(|&cy| {
            (x, y) == (toward_edge(cx), cy) || (x, y) == (cx, toward_edge(cy))
        })
    })
}
