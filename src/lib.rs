//! Multi-agent path-finding (MAPF) and task-allocation core for a grid world.
//!
//! The crate provides three interchangeable path planners (cooperative,
//! prioritized, conflict-based search) over a shared space-time A* search,
//! plus a small task-allocation module (Hungarian / greedy) for turning a
//! list of robots and point tasks into per-robot goal cells.
//!
//! Hosts own the simulation loop, map/scenario file formats, and reporting;
//! this crate only consumes a [`Grid`] and a list of agents and returns
//! time-indexed paths.

mod agent;
mod astar;
mod conflict;
mod constraint;
mod error;
mod grid;
pub mod planner;
mod task;

pub use agent::{AgentSpec, Path};
pub use astar::astar_st;
pub use conflict::{first_conflict, Conflict};
pub use constraint::Constraint;
pub use error::MapfError;
pub use grid::{Grid, Position, ReservationTable};
pub use planner::{plan, Planner, PlanOptions, Priority};
pub use planner::cbs::{CbsFallback, CbsOptions};
pub use task::{assign, AssignMethod, Task};
