//! Connected groups and liberty counting.
//!
//! All functions here are pure queries over a [`Grid`]. The `exclude`
//! argument of [`liberties`] lets callers ask "how many liberties would this
//! group have if a stone stood on `exclude`?" without writing that stone,
//! which is how legality and capture checks avoid cloning the grid.

use crate::grid::{Color, Grid, Point};

/// Collect the group of `color` stones connected to `start`.
///
/// Uses flood-fill over orthogonal neighbors. Returns an empty group when
/// `start` does not hold a `color` stone.
pub fn group(grid: &Grid, start: Point, color: Color) -> Vec<Point> {
    let size = grid.size();
    let mut out = Vec::new();
    if grid.get(start) != Some(color) {
        return out;
    }
    let mut stack = vec![start];
    let mut visited = vec![false; size * size];
    visited[start.1 * size + start.0] = true;

    while let Some(pt) = stack.pop() {
        out.push(pt);
        for n in grid.neighbors(pt) {
            let ni = n.1 * size + n.0;
            if !visited[ni] && grid.get(n) == Some(color) {
                visited[ni] = true;
                stack.push(n);
            }
        }
    }
    out
}

/// Count the distinct empty points adjacent to any member of `stones`.
///
/// When `exclude` is set, that point is treated as occupied.
pub fn liberties(grid: &Grid, stones: &[Point], exclude: Option<Point>) -> usize {
    let size = grid.size();
    let mut seen = vec![false; size * size];
    let mut libs = 0;

    for &pt in stones {
        for n in grid.neighbors(pt) {
            if Some(n) == exclude || grid.get(n).is_some() {
                continue;
            }
            let ni = n.1 * size + n.0;
            if !seen[ni] {
                seen[ni] = true;
                libs += 1;
            }
        }
    }
    libs
}

/// Distinct groups of `color` orthogonally adjacent to `pt`.
pub fn adjacent_groups(grid: &Grid, pt: Point, color: Color) -> Vec<Vec<Point>> {
    let mut groups: Vec<Vec<Point>> = Vec::new();
    for n in grid.neighbors(pt) {
        if grid.get(n) != Some(color) || groups.iter().any(|g| g.contains(&n)) {
            continue;
        }
        groups.push(group(grid, n, color));
    }
    groups
}

/// Opponent stones that a `color` stone on `pt` would remove.
pub fn captured_by(grid: &Grid, pt: Point, color: Color) -> Vec<Point> {
    adjacent_groups(grid, pt, color.opponent())
        .into_iter()
        .filter(|g| liberties(grid, g, Some(pt)) == 0)
        .flatten()
        .collect()
}

/// Liberties of the group a `color` stone on `pt` would join, before any
/// captures are resolved.
pub fn liberties_after(grid: &Grid, pt: Point, color: Color) -> usize {
    let mut stones = vec![pt];
    for g in adjacent_groups(grid, pt, color) {
        stones.extend(g);
    }
    liberties(grid, &stones, Some(pt))
}
