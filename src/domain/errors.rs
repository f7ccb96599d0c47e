use derive_more::Display;

use crate::domain::workspace::value_objects::BoardId;

/// Command-level failures. None of these are fatal: the controller keeps the
/// previous valid state and surfaces a notice.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WorkspaceError {
    #[display(fmt = "Board limit reached: your plan allows {} boards", limit)]
    BoardLimitExceeded { limit: usize },
    #[display(fmt = "The main board cannot be deleted")]
    CannotDeleteLockedBoard,
    #[display(fmt = "The main board cannot be renamed")]
    CannotRenameLockedBoard,
    #[display(fmt = "Unknown board: {}", _0)]
    UnknownBoard(BoardId),
    #[display(fmt = "Layout is read-only while filtered or maximized")]
    GridReadOnly,
    #[display(fmt = "No board removal awaiting confirmation")]
    NoPendingConfirmation,
}

impl std::error::Error for WorkspaceError {}

/// Failures of the browser-facing adapters (storage, HTTP).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InfrastructureError {
    #[display(fmt = "Storage Error: {}", _0)]
    Storage(String),
    #[display(fmt = "Serialization Error: {}", _0)]
    Serialization(String),
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Request timed out after {} ms", _0)]
    Timeout(u32),
}

impl std::error::Error for InfrastructureError {}

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::Serialization(err.to_string())
    }
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
