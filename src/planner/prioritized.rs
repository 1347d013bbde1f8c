use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::agent::{AgentSpec, Path};
use crate::astar::astar_st;
use crate::grid::{manhattan, Grid, ReservationTable};

/// Agent ordering strategy for the prioritized planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    /// Ascending by agent id.
    Id,
    /// Ascending by start-goal Manhattan distance (closer agents first).
    Distance,
    /// A deterministic shuffle from an explicit seed — no hidden global RNG.
    Random(u64),
}

/// Sequentially plans each agent with space-time A*, reserving its path before the next
/// agent is planned. Agents that find no path stay at their start cell. Not complete: a
/// blocked agent may stay put even when a solution exists for it.
pub fn prioritized_plan(
    grid: &Grid,
    agents: &[AgentSpec],
    priority: Priority,
) -> HashMap<usize, Path> {
    let mut ordered: Vec<AgentSpec> = agents.to_vec();
    match priority {
        Priority::Id => ordered.sort_by_key(|a| a.id),
        Priority::Distance => ordered.sort_by_key(|a| manhattan(a.start, a.goal)),
        Priority::Random(seed) => {
            use rand::seq::SliceRandom;
            let mut rng = StdRng::seed_from_u64(seed);
            ordered.shuffle(&mut rng);
        }
    }

    let mut reserved = ReservationTable::new();
    let mut plans: HashMap<usize, Path> = HashMap::new();
    let mut max_len = 0usize;

    for agent in &ordered {
        let path = astar_st(grid, agent.start, agent.goal, &reserved, None, 1000)
            .unwrap_or_else(|| {
                debug!(agent_id = agent.id, "prioritized: no path, staying put");
                vec![agent.start]
            });
        reserved.reserve_path(&path);
        max_len = max_len.max(path.len());
        plans.insert(agent.id, path);
    }

    pad_to_equal_length(&mut plans, max_len);
    plans
}

/// Pads every path to `len` by repeating its last position. Padding never adds
/// reservations: later agents already observed only the earlier agents' real finish times.
pub(crate) fn pad_to_equal_length(plans: &mut HashMap<usize, Path>, len: usize) {
    for path in plans.values_mut() {
        if let Some(&last) = path.last() {
            while path.len() < len {
                path.push(last);
            }
        }
    }
}
