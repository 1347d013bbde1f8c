use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// A planning request for one robot: unique `id`, current `start`, and `goal` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentSpec {
    pub id: usize,
    pub start: Position,
    pub goal: Position,
}

/// A time-indexed path: `path[t]` is the agent's position at time `t`.
pub type Path = Vec<Position>;
