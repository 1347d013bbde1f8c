/// Errors surfaced across the façade boundary.
///
/// Only malformed input and an unknown planner name are real errors — budget
/// exhaustion inside CBS resolves to a fallback plan instead of an error, and
/// a single agent failing to find a path resolves to a stay-in-place path.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MapfError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown planner: {0}")]
    InvalidPlanner(String),
}
