use crate::domain::errors::InfrastructureResult;
use crate::domain::workspace::entities::WorkspaceState;

/// Raw string storage under string keys (browser local storage, memory)
pub trait KeyValueStorage {
    fn read(&self, key: &str) -> InfrastructureResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> InfrastructureResult<()>;
    fn remove(&self, key: &str) -> InfrastructureResult<()>;
}

/// Durable home of the workspace.
///
/// `load` never fails: missing or unreadable payloads resolve to the
/// bootstrap default. `save` reports storage failures so the caller can
/// surface them, but the in-memory state stays authoritative either way.
pub trait PersistenceAdapter {
    fn load(&self) -> WorkspaceState;
    fn save(&self, state: &WorkspaceState) -> InfrastructureResult<()>;
}
