use std::collections::HashMap;

use crate::agent::Path;
use crate::grid::Position;

/// The first collision between two agents' paths, as found by [`first_conflict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Vertex {
        t: usize,
        a1: usize,
        a2: usize,
        pos: Position,
    },
    Edge {
        t: usize,
        a1: usize,
        a2: usize,
        u: Position,
        v: Position,
    },
}

impl Conflict {
    pub fn agents(&self) -> (usize, usize) {
        match *self {
            Conflict::Vertex { a1, a2, .. } => (a1, a2),
            Conflict::Edge { a1, a2, .. } => (a1, a2),
        }
    }
}

fn pos_at(path: &Path, t: usize) -> Position {
    if t < path.len() {
        path[t]
    } else {
        *path.last().expect("path is never empty")
    }
}

/// Scans `paths` (agent id -> path) for the first vertex or edge conflict, time ascending;
/// within a time step, vertex conflicts are reported before edge conflicts, and pairs are
/// compared in ascending agent-id order. Returns `None` if the paths never collide.
pub fn first_conflict(paths: &HashMap<usize, Path>) -> Option<Conflict> {
    if paths.is_empty() {
        return None;
    }
    let max_t = paths.values().map(|p| p.len()).max().unwrap_or(0);
    let mut ids: Vec<usize> = paths.keys().copied().collect();
    ids.sort_unstable();

    for t in 0..max_t {
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let (a1, a2) = (ids[i], ids[j]);
                let p1 = pos_at(&paths[&a1], t);
                let p2 = pos_at(&paths[&a2], t);
                if p1 == p2 {
                    return Some(Conflict::Vertex { t, a1, a2, pos: p1 });
                }
            }
        }

        if t == 0 {
            continue;
        }
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let (a1, a2) = (ids[i], ids[j]);
                let u1 = pos_at(&paths[&a1], t - 1);
                let v1 = pos_at(&paths[&a1], t);
                let u2 = pos_at(&paths[&a2], t - 1);
                let v2 = pos_at(&paths[&a2], t);
                if u1 == v2 && v1 == u2 && u1 != v1 {
                    return Some(Conflict::Edge {
                        t,
                        a1,
                        a2,
                        u: u1,
                        v: v1,
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(pairs: &[(usize, Vec<Position>)]) -> HashMap<usize, Path> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn no_conflict_on_disjoint_paths() {
        let p = paths(&[(0, vec![(0, 0), (1, 0)]), (1, vec![(5, 5), (5, 4)])]);
        assert!(first_conflict(&p).is_none());
    }

    #[test]
    fn detects_vertex_conflict() {
        let p = paths(&[(0, vec![(0, 0), (1, 0)]), (1, vec![(2, 0), (1, 0)])]);
        match first_conflict(&p).unwrap() {
            Conflict::Vertex { t, pos, .. } => {
                assert_eq!(t, 1);
                assert_eq!(pos, (1, 0));
            }
            other => panic!("expected vertex conflict, got {other:?}"),
        }
    }

    #[test]
    fn detects_edge_swap_conflict() {
        let p = paths(&[(0, vec![(0, 0), (1, 0)]), (1, vec![(1, 0), (0, 0)])]);
        match first_conflict(&p).unwrap() {
            Conflict::Edge { t, u, v, .. } => {
                assert_eq!(t, 1);
                assert_eq!(u, (0, 0));
                assert_eq!(v, (1, 0));
            }
            other => panic!("expected edge conflict, got {other:?}"),
        }
    }

    #[test]
    fn waiting_is_not_an_edge_conflict() {
        // agent 0 waits at (0,0); agent 1 waits at (1,0) -- u == v for both, no swap.
        let p = paths(&[(0, vec![(0, 0), (0, 0)]), (1, vec![(1, 0), (1, 0)])]);
        assert!(first_conflict(&p).is_none());
    }

    #[test]
    fn shorter_path_freezes_at_its_goal() {
        let p = paths(&[(0, vec![(0, 0)]), (1, vec![(2, 0), (1, 0), (0, 0)])]);
        match first_conflict(&p).unwrap() {
            Conflict::Vertex { t, pos, .. } => {
                assert_eq!(t, 2);
                assert_eq!(pos, (0, 0));
            }
            other => panic!("expected vertex conflict, got {other:?}"),
        }
    }

    #[test]
    fn vertex_conflict_reported_before_edge_at_same_time() {
        // at t=1: agents 0 and 1 collide at (1,0) (vertex); agents 0 and 2 would also swap.
        let p = paths(&[
            (0, vec![(0, 0), (1, 0)]),
            (1, vec![(2, 0), (1, 0)]),
            (2, vec![(1, 0), (0, 0)]),
        ]);
        assert!(matches!(first_conflict(&p).unwrap(), Conflict::Vertex { t: 1, .. }));
    }
}
