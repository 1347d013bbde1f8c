use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentSpec;
use crate::grid::{manhattan, Position};

/// A point task a robot can be assigned to service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: usize,
    pub pos: Position,
    pub completed: bool,
}

/// Task-assignment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignMethod {
    /// Exact minimum sum-of-costs one-to-one assignment (Kuhn-Munkres).
    Hungarian,
    /// Nearest still-unclaimed task per agent, in agent order.
    Greedy,
    /// Consensus-based bundle algorithm. Stubbed to greedy: see DESIGN.md.
    Cbba,
}

/// Assigns tasks to agents by Manhattan distance, `C[i][j] = manhattan(agents[i].pos, tasks[j].pos)`.
/// Completed tasks are never assigned. Agents or tasks absent from the result are unassigned.
pub fn assign(
    agents: &[AgentSpec],
    tasks: &[Task],
    method: AssignMethod,
) -> HashMap<usize, usize> {
    let open_tasks: Vec<Task> = tasks.iter().copied().filter(|t| !t.completed).collect();
    if agents.is_empty() || open_tasks.is_empty() {
        return HashMap::new();
    }

    match method {
        AssignMethod::Hungarian => hungarian_assignment(agents, &open_tasks),
        AssignMethod::Greedy | AssignMethod::Cbba => greedy_assignment(agents, &open_tasks),
    }
}

fn agent_cost(agent_pos: Position, task: &Task) -> usize {
    manhattan(agent_pos, task.pos)
}

fn greedy_assignment(agents: &[AgentSpec], tasks: &[Task]) -> HashMap<usize, usize> {
    let mut claimed: Vec<bool> = vec![false; tasks.len()];
    let mut result = HashMap::new();

    for agent in agents {
        let best = tasks
            .iter()
            .enumerate()
            .filter(|(i, _)| !claimed[*i])
            .min_by_key(|(_, t)| (agent_cost(agent.start, t), t.task_id));
        if let Some((idx, task)) = best {
            claimed[idx] = true;
            result.insert(agent.id, task.task_id);
        }
    }
    result
}

/// Kuhn-Munkres on a square matrix padded with zero-cost dummy rows/columns, so a
/// rectangular `agents` x `tasks` instance never forces a real entity onto another real
/// entity just to fill out the matrix. Dummy pairings are dropped from the result.
fn hungarian_assignment(agents: &[AgentSpec], tasks: &[Task]) -> HashMap<usize, usize> {
    let n_agents = agents.len();
    let n_tasks = tasks.len();
    let n = n_agents.max(n_tasks);

    // cost[i][j] for i < n_agents, j < n_tasks; 0 elsewhere (dummy rows/columns).
    let mut cost = vec![vec![0i64; n]; n];
    for (i, agent) in agents.iter().enumerate() {
        for (j, task) in tasks.iter().enumerate() {
            cost[i][j] = agent_cost(agent.start, task) as i64;
        }
    }

    let assignment = kuhn_munkres(&cost);

    let mut result = HashMap::new();
    for (i, &j) in assignment.iter().enumerate() {
        if i < n_agents && j < n_tasks {
            result.insert(agents[i].id, tasks[j].task_id);
        }
    }
    result
}

/// Classic O(n^3) Hungarian algorithm via the Jacobi/Bellman potentials formulation:
/// `u`/`v` are row/column potentials, `p`/`way` track the current matching and augmenting
/// path so each row is assigned a distinct column minimizing total cost. 1-indexed
/// internally (row/column 0 is an unused sentinel), as is standard for this formulation.
///
/// Returns, for each row index, the assigned column index.
fn kuhn_munkres(cost: &[Vec<i64>]) -> Vec<usize> {
    let n = cost.len();
    const INF: i64 = i64::MAX / 4;

    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut p = vec![0usize; n + 1]; // p[j] = row assigned to column j (1-indexed columns)
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![INF; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![usize::MAX; n];
    for j in 1..=n {
        if p[j] != 0 {
            assignment[p[j] - 1] = j - 1;
        }
    }
    assignment
}
