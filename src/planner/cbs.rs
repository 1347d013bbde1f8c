use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::agent::{AgentSpec, Path};
use crate::astar::astar_st;
use crate::conflict::{first_conflict, Conflict};
use crate::constraint::{count_same_kind, vertex_constraints_for, Constraint};
use crate::grid::{Grid, ReservationTable};

use super::prioritized::{pad_to_equal_length, prioritized_plan, Priority};

/// What CBS returns when it exhausts its time or node budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CbsFallback {
    /// Re-plan from scratch with the prioritized planner.
    Prioritized,
    /// Return the best (lowest-cost) open-set node seen so far, or each agent's start if
    /// the open set is already empty.
    BestSoFar,
}

impl Default for CbsFallback {
    fn default() -> Self {
        CbsFallback::Prioritized
    }
}

/// Tunables for the CBS high-level search. Defaults match the host contract in the spec.
#[derive(Debug, Clone)]
pub struct CbsOptions {
    pub time_limit: Duration,
    pub node_limit: usize,
    pub max_constraints_per_agent: usize,
    pub fallback: CbsFallback,
    pub pp_priority: Priority,
}

impl Default for CbsOptions {
    fn default() -> Self {
        CbsOptions {
            time_limit: Duration::from_secs_f64(5.0),
            node_limit: 1000,
            max_constraints_per_agent: 50,
            fallback: CbsFallback::Prioritized,
            pp_priority: Priority::Id,
        }
    }
}

#[derive(Debug, Clone)]
struct CbsNode {
    constraints: Vec<Constraint>,
    paths: HashMap<usize, Path>,
    cost: usize,
    conflict_count: usize,
    seq: u64,
}

impl CbsNode {
    fn key(&self) -> (usize, usize, u64) {
        (self.cost, self.conflict_count, self.seq)
    }
}

impl PartialEq for CbsNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for CbsNode {}
impl PartialOrd for CbsNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for CbsNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // (cost, conflict_count) lexicographic min-first, FIFO tie-break by `seq`.
        self.key().cmp(&other.key())
    }
}

fn total_cost(paths: &HashMap<usize, Path>) -> usize {
    paths.values().map(|p| p.len()).sum()
}

/// Conflict-Based Search: best-first expansion of constraint-tree nodes, splitting on the
/// first conflict found in a node's paths, bounded by wall-clock time, node count, and
/// per-agent constraint depth. Falls back to the prioritized planner (or best-so-far) when
/// any bound is hit; never panics and never returns a malformed map.
pub fn cbs(grid: &Grid, agents: &[AgentSpec], options: &CbsOptions) -> HashMap<usize, Path> {
    let start_time = Instant::now();
    let empty_reservations = ReservationTable::new();

    let mut root_paths = HashMap::new();
    for agent in agents {
        match astar_st(grid, agent.start, agent.goal, &empty_reservations, None, 500) {
            Some(path) => {
                root_paths.insert(agent.id, path);
            }
            None if options.fallback == CbsFallback::Prioritized => {
                warn!(agent_id = agent.id, "cbs: no root path, falling back to prioritized");
                return prioritized_plan(grid, agents, options.pp_priority.clone());
            }
            None => {
                // best-so-far fallback: this agent stays put, the rest of the root still
                // gets built so the high-level search has something to expand.
                warn!(agent_id = agent.id, "cbs: no root path, staying put");
                root_paths.insert(agent.id, vec![agent.start]);
            }
        }
    }

    let mut seq = 0u64;
    let root = CbsNode {
        constraints: Vec::new(),
        cost: total_cost(&root_paths),
        conflict_count: 0,
        paths: root_paths,
        seq,
    };
    seq += 1;

    let mut open: BTreeSet<CbsNode> = BTreeSet::new();
    open.insert(root);

    let mut nodes_expanded = 0usize;

    loop {
        if start_time.elapsed() >= options.time_limit {
            warn!("cbs: time budget exceeded, falling back");
            return fallback(grid, agents, options, &open);
        }
        if nodes_expanded >= options.node_limit {
            warn!("cbs: node budget exceeded, falling back");
            return fallback(grid, agents, options, &open);
        }

        let Some(current) = pop_best(&mut open) else {
            warn!("cbs: open set exhausted, falling back");
            return fallback(grid, agents, options, &open);
        };
        nodes_expanded += 1;

        let conflict = match first_conflict(&current.paths) {
            Some(c) => c,
            None => {
                debug!(cost = current.cost, "cbs: conflict-free solution found");
                let mut paths = current.paths;
                let max_len = paths.values().map(|p| p.len()).max().unwrap_or(0);
                pad_to_equal_length(&mut paths, max_len);
                return paths;
            }
        };

        for new_constraint in child_constraints(&conflict) {
            let agent_id = new_constraint.agent_id();
            if count_same_kind(&current.constraints, &new_constraint)
                >= options.max_constraints_per_agent
            {
                continue;
            }

            let mut constraints = current.constraints.clone();
            constraints.push(new_constraint);

            let agent_spec = match agents.iter().find(|a| a.id == agent_id) {
                Some(a) => a,
                None => continue,
            };
            let vertex_constraints = vertex_constraints_for(&constraints, agent_id);
            let Some(new_path) = astar_st(
                grid,
                agent_spec.start,
                agent_spec.goal,
                &empty_reservations,
                Some(&vertex_constraints),
                500,
            ) else {
                continue;
            };

            let mut paths = current.paths.clone();
            paths.insert(agent_id, new_path);
            let child = CbsNode {
                cost: total_cost(&paths),
                conflict_count: 0,
                constraints,
                paths,
                seq,
            };
            seq += 1;
            open.insert(child);
        }
    }
}

fn pop_best(open: &mut BTreeSet<CbsNode>) -> Option<CbsNode> {
    let first = open.iter().next().cloned()?;
    open.remove(&first);
    Some(first)
}

/// The two child constraints a conflict produces, one per involved agent.
fn child_constraints(conflict: &Conflict) -> [Constraint; 2] {
    match *conflict {
        Conflict::Vertex { t, a1, a2, pos } => [
            Constraint::Vertex { agent_id: a1, pos, t },
            Constraint::Vertex { agent_id: a2, pos, t },
        ],
        Conflict::Edge { t, a1, a2, u, v } => [
            Constraint::Edge { agent_id: a1, u, v, t },
            Constraint::Edge { agent_id: a2, u: v, v: u, t },
        ],
    }
}

fn fallback(
    grid: &Grid,
    agents: &[AgentSpec],
    options: &CbsOptions,
    open: &BTreeSet<CbsNode>,
) -> HashMap<usize, Path> {
    match options.fallback {
        CbsFallback::Prioritized => {
            prioritized_plan(grid, agents, options.pp_priority.clone())
        }
        CbsFallback::BestSoFar => {
            if let Some(best) = open.iter().next() {
                let mut paths = best.paths.clone();
                let max_len = paths.values().map(|p| p.len()).max().unwrap_or(0);
                pad_to_equal_length(&mut paths, max_len);
                paths
            } else {
                agents.iter().map(|a| (a.id, vec![a.start])).collect()
            }
        }
    }
}
