use std::collections::HashSet;

use crate::error::MapfError;

/// An `(x, y)` cell coordinate. `x` is the column, `y` is the row.
pub type Position = (usize, usize);

/// A rectangular occupancy grid, `grid[y][x]`: `false` is free, `true` is an obstacle.
///
/// Immutable once constructed; every planner treats it as read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Builds a grid from a `[y][x]` matrix where a truthy cell is an obstacle.
    ///
    /// Rejects empty or ragged input rather than silently padding it.
    pub fn new(cells: Vec<Vec<bool>>) -> Result<Self, MapfError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(MapfError::InvalidInput("grid must be non-empty".into()));
        }
        let width = cells[0].len();
        if cells.iter().any(|row| row.len() != width) {
            return Err(MapfError::InvalidInput("grid rows must be equal length".into()));
        }
        Ok(Grid {
            width,
            height: cells.len(),
            cells,
        })
    }

    /// Convenience constructor from `0`/`1` markers, matching the host contract in the spec.
    pub fn from_u8(cells: Vec<Vec<u8>>) -> Result<Self, MapfError> {
        Grid::new(
            cells
                .into_iter()
                .map(|row| row.into_iter().map(|c| c != 0).collect())
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, p: Position) -> bool {
        p.0 < self.width && p.1 < self.height
    }

    /// `grid[y][x] == 0`, i.e. the cell is in bounds and not an obstacle.
    pub fn is_free(&self, p: Position) -> bool {
        self.in_bounds(p) && !self.cells[p.1][p.0]
    }

    pub fn cell(&self, p: Position) -> Option<bool> {
        if self.in_bounds(p) {
            Some(self.cells[p.1][p.0])
        } else {
            None
        }
    }

    /// The four cardinal neighbors of `p` that are in bounds and free. Does not include wait.
    pub fn neighbors(&self, p: Position) -> impl Iterator<Item = Position> + '_ {
        const DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        DIRS.into_iter().filter_map(move |(dx, dy)| {
            let nx = p.0 as isize + dx;
            let ny = p.1 as isize + dy;
            if nx < 0 || ny < 0 {
                return None;
            }
            let next = (nx as usize, ny as usize);
            self.is_free(next).then_some(next)
        })
    }
}

/// Manhattan distance between two cells. Admissible and consistent for unit-cost 4-connected moves.
pub fn manhattan(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Time-keyed vertex and edge reservations shared by the prioritized planner and, indirectly,
/// by space-time A* whenever it is handed a non-empty table.
///
/// Keyed by `(t, pos)` / `(t, u, v)` hash sets rather than `map<t, set<..>>` for O(1) average
/// lookups without a sentinel for empty time slots.
#[derive(Debug, Clone, Default)]
pub struct ReservationTable {
    vertices: HashSet<(usize, Position)>,
    edges: HashSet<(usize, Position, Position)>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, t: usize, p: Position) {
        self.vertices.insert((t, p));
    }

    /// Reserves the transition `u -> v` arriving at time `t` (i.e. it occurs between `t-1` and `t`).
    pub fn add_edge(&mut self, t: usize, u: Position, v: Position) {
        self.edges.insert((t, u, v));
    }

    pub fn vertex_blocked(&self, t: usize, p: Position) -> bool {
        self.vertices.contains(&(t, p))
    }

    /// True if moving `u -> v` arriving at `t` collides with an already-reserved opposing
    /// transition `v -> u` at the same arrival time.
    pub fn edge_blocked(&self, t: usize, u: Position, v: Position) -> bool {
        self.edges.contains(&(t, v, u))
    }

    /// Reserves an entire path: vertex `pᵢ` at time `i`, and edge `(pᵢ₋₁, pᵢ)` at time `i`.
    pub fn reserve_path(&mut self, path: &[Position]) {
        for (i, &pos) in path.iter().enumerate() {
            self.add_vertex(i, pos);
            if i > 0 {
                self.add_edge(i, path[i - 1], pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_grid() {
        let cells = vec![vec![0, 0], vec![0]];
        assert!(Grid::from_u8(cells).is_err());
    }

    #[test]
    fn is_free_respects_bounds_and_obstacles() {
        let grid = Grid::from_u8(vec![vec![0, 1], vec![0, 0]]).unwrap();
        assert!(grid.is_free((0, 0)));
        assert!(!grid.is_free((1, 0)));
        assert!(!grid.is_free((5, 5)));
    }

    #[test]
    fn neighbors_exclude_obstacles_and_out_of_bounds() {
        let grid = Grid::from_u8(vec![vec![0, 1], vec![0, 0]]).unwrap();
        let ns: Vec<_> = grid.neighbors((0, 0)).collect();
        assert_eq!(ns.len(), 1);
        assert!(ns.contains(&(0, 1)));
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan((0, 0), (3, 4)), 7);
    }

    #[test]
    fn reservation_table_edge_swap_direction() {
        let mut table = ReservationTable::new();
        table.add_edge(3, (1, 1), (2, 1));
        // opposing transition (2,1) -> (1,1) arriving at t=3 is blocked
        assert!(table.edge_blocked(3, (2, 1), (1, 1)));
        // same-direction travel is not blocked by its own reservation
        assert!(!table.edge_blocked(3, (1, 1), (2, 1)));
    }
}
