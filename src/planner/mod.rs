pub mod cbs;
mod prioritized;

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use tracing::info;

use crate::agent::{AgentSpec, Path};
use crate::error::MapfError;
use crate::grid::Grid;

pub use cbs::{CbsFallback, CbsOptions};
pub use prioritized::Priority;

/// Which of the three interchangeable path planners to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planner {
    /// Order-and-reserve discipline with a fixed `priority = Id` ordering.
    Cooperative,
    /// Order-and-reserve discipline with a caller-supplied [`Priority`].
    Prioritized,
    /// Conflict-Based Search with a prioritized (or best-so-far) fallback.
    Cbs,
}

impl FromStr for Planner {
    type Err = MapfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cooperative" => Ok(Planner::Cooperative),
            "prioritized" => Ok(Planner::Prioritized),
            "cbs" => Ok(Planner::Cbs),
            other => Err(MapfError::InvalidPlanner(other.to_string())),
        }
    }
}

/// Options shared by the façade; only the fields relevant to the chosen [`Planner`] are read.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub priority: Priority,
    pub cbs: CbsOptions,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            priority: Priority::Id,
            cbs: CbsOptions::default(),
        }
    }
}

/// Validates a grid/agent list pair: in-bounds, not-on-obstacle starts/goals and unique ids.
fn validate(grid: &Grid, agents: &[AgentSpec]) -> Result<(), MapfError> {
    let mut seen = HashSet::new();
    for agent in agents {
        if !seen.insert(agent.id) {
            return Err(MapfError::InvalidInput(format!(
                "duplicate agent id {}",
                agent.id
            )));
        }
        for (label, pos) in [("start", agent.start), ("goal", agent.goal)] {
            if !grid.in_bounds(pos) {
                return Err(MapfError::InvalidInput(format!(
                    "agent {} {label} {pos:?} is out of bounds",
                    agent.id
                )));
            }
            if !grid.is_free(pos) {
                return Err(MapfError::InvalidInput(format!(
                    "agent {} {label} {pos:?} is on an obstacle",
                    agent.id
                )));
            }
        }
    }
    Ok(())
}

/// Uniform entry point: dispatches to the cooperative, prioritized, or CBS planner and
/// returns a path per agent, all padded to equal length.
pub fn plan(
    grid: &Grid,
    agents: &[AgentSpec],
    planner: Planner,
    options: &PlanOptions,
) -> Result<HashMap<usize, Path>, MapfError> {
    validate(grid, agents)?;
    info!(?planner, num_agents = agents.len(), "dispatching plan");

    let paths = match planner {
        Planner::Cooperative => prioritized::prioritized_plan(grid, agents, Priority::Id),
        Planner::Prioritized => prioritized::prioritized_plan(grid, agents, options.priority.clone()),
        Planner::Cbs => cbs::cbs(grid, agents, &options.cbs),
    };
    Ok(paths)
}
