use std::collections::{HashMap, HashSet};

use crate::grid::Position;

/// A CBS tree-node constraint, always scoped to a single agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `agent_id` must not occupy `pos` at `t`.
    Vertex {
        agent_id: usize,
        pos: Position,
        t: usize,
    },
    /// `agent_id` must not make the transition `u -> v` arriving at `t`.
    Edge {
        agent_id: usize,
        u: Position,
        v: Position,
        t: usize,
    },
}

impl Constraint {
    pub fn agent_id(&self) -> usize {
        match self {
            Constraint::Vertex { agent_id, .. } => *agent_id,
            Constraint::Edge { agent_id, .. } => *agent_id,
        }
    }
}

/// Translates one agent's constraints into the `time -> blocked vertices` map that
/// [`crate::astar::astar_st`] expects. Edge constraints are encoded by forbidding the
/// destination vertex at the arrival time — a conservative over-approximation that is
/// sound but not complete, per the design notes on low-level edge-constraint handling.
pub(crate) fn vertex_constraints_for(
    constraints: &[Constraint],
    agent_id: usize,
) -> HashMap<usize, HashSet<Position>> {
    let mut out: HashMap<usize, HashSet<Position>> = HashMap::new();
    for c in constraints {
        if c.agent_id() != agent_id {
            continue;
        }
        match *c {
            Constraint::Vertex { pos, t, .. } => {
                out.entry(t).or_default().insert(pos);
            }
            Constraint::Edge { v, t, .. } => {
                out.entry(t).or_default().insert(v);
            }
        }
    }
    out
}

/// Counts constraints of the same kind already attached to `agent_id`, used to enforce
/// `max_constraints_per_agent` before replanning a CBS child.
pub(crate) fn count_same_kind(constraints: &[Constraint], new: &Constraint) -> usize {
    constraints
        .iter()
        .filter(|c| {
            c.agent_id() == new.agent_id()
                && std::mem::discriminant(*c) == std::mem::discriminant(new)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_constraint_translates_directly() {
        let cs = vec![Constraint::Vertex {
            agent_id: 0,
            pos: (2, 2),
            t: 5,
        }];
        let translated = vertex_constraints_for(&cs, 0);
        assert!(translated[&5].contains(&(2, 2)));
    }

    #[test]
    fn edge_constraint_blocks_destination_at_arrival() {
        let cs = vec![Constraint::Edge {
            agent_id: 1,
            u: (0, 0),
            v: (1, 0),
            t: 3,
        }];
        let translated = vertex_constraints_for(&cs, 1);
        assert!(translated[&3].contains(&(1, 0)));
    }

    #[test]
    fn constraints_for_other_agents_are_ignored() {
        let cs = vec![Constraint::Vertex {
            agent_id: 0,
            pos: (2, 2),
            t: 5,
        }];
        assert!(vertex_constraints_for(&cs, 1).is_empty());
    }

    #[test]
    fn count_same_kind_ignores_other_agents_and_kinds() {
        let cs = vec![
            Constraint::Vertex {
                agent_id: 0,
                pos: (1, 1),
                t: 1,
            },
            Constraint::Vertex {
                agent_id: 0,
                pos: (2, 2),
                t: 2,
            },
            Constraint::Edge {
                agent_id: 0,
                u: (0, 0),
                v: (1, 0),
                t: 1,
            },
            Constraint::Vertex {
                agent_id: 1,
                pos: (3, 3),
                t: 1,
            },
        ];
        let probe = Constraint::Vertex {
            agent_id: 0,
            pos: (9, 9),
            t: 9,
        };
        assert_eq!(count_same_kind(&cs, &probe), 2);
    }
}
