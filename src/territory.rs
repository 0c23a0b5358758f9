//! Territory classification for end-of-game scoring.
//!
//! Each maximal 4-connected region of empty points belongs to a color when
//! every stone on its border is of that color. Regions with no border
//! stones at all (an empty board) or with both colors on the border are
//! neutral.

use crate::grid::{Color, Grid, Point};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Point>,
    pub owner: Option<Color>,
}

/// Partition the empty points of `grid` into classified regions.
///
/// Regions come out in row-major order of their first point.
pub fn regions(grid: &Grid) -> Vec<Region> {
    let size = grid.size();
    let mut visited = vec![false; size * size];
    let mut out = Vec::new();

    for start in grid.points() {
        if visited[start.1 * size + start.0] || grid.get(start).is_some() {
            continue;
        }
        let mut points = Vec::new();
        let mut touches_black = false;
        let mut touches_white = false;
        let mut stack = vec![start];
        visited[start.1 * size + start.0] = true;

        while let Some(pt) = stack.pop() {
            points.push(pt);
            for n in grid.neighbors(pt) {
                match grid.get(n) {
                    Some(Color::Black) => touches_black = true,
                    Some(Color::White) => touches_white = true,
                    None => {
                        let ni = n.1 * size + n.0;
                        if !visited[ni] {
                            visited[ni] = true;
                            stack.push(n);
                        }
                    }
                }
            }
        }

        let owner = match (touches_black, touches_white) {
            (true, false) => Some(Color::Black),
            (false, true) => Some(Color::White),
            _ => None,
        };
        out.push(Region { points, owner });
    }
    out
}

/// Territory points owned by `color`.
pub fn territory(grid: &Grid, color: Color) -> usize {
    regions(grid)
        .iter()
        .filter(|r| r.owner == Some(color))
        .map(|r| r.points.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_one_neutral_region() {
        let g = Grid::new(9);
        let rs = regions(&g);
        assert_eq!(rs.len(), 1);
        assert_eq!(rs[0].points.len(), 81);
        assert_eq!(rs[0].owner, None);
    }

    #[test]
    fn test_wall_splits_board_between_colors() {
        // Black wall on column 2, White wall on column 4 of a 7x7 board.
        let mut g = Grid::new(7);
        for y in 0..7 {
            g.set((2, y), Some(Color::Black));
            g.set((4, y), Some(Color::White));
        }
        assert_eq!(territory(&g, Color::Black), 14);
        assert_eq!(territory(&g, Color::White), 14);

        let rs = regions(&g);
        assert_eq!(rs.len(), 3);
        let middle = rs.iter().find(|r| r.points.contains(&(3, 0))).unwrap();
        assert_eq!(middle.owner, None, "column between the walls is dame");
    }

    #[test]
    fn test_corner_eye_belongs_to_owner() {
        let mut g = Grid::new(5);
        g.set((1, 0), Some(Color::White));
        g.set((0, 1), Some(Color::White));
        g.set((1, 1), Some(Color::White));
        // The rest of the board touches White only as well.
        assert_eq!(territory(&g, Color::White), 22);
        assert_eq!(territory(&g, Color::Black), 0);
    }
}
