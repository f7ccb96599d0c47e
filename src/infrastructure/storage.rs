use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};

use crate::domain::{
    errors::{InfrastructureError, InfrastructureResult},
    logging::{LogComponent, get_logger},
    workspace::{
        KeyValueStorage, PersistenceAdapter, ResponsiveGrid, WorkspaceConfig, WorkspaceState,
        templates::bootstrap_state,
    },
};

const COMPONENT: LogComponent = LogComponent::Infrastructure("Persistence");

/// Browser `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl KeyValueStorage for LocalStorageBackend {
    fn read(&self, key: &str) -> InfrastructureResult<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| InfrastructureError::Storage(format!("read {} failed: {:?}", key, err)))
    }

    fn write(&self, key: &str, value: &str) -> InfrastructureResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| InfrastructureError::Storage(format!("write {} failed: {:?}", key, err)))
    }

    fn remove(&self, key: &str) -> InfrastructureResult<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}

/// In-memory store for native tests and previews. Clones share the map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a full or disabled storage
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> InfrastructureResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> InfrastructureResult<()> {
        if self.fail_writes.get() {
            return Err(InfrastructureError::Storage("quota exceeded".to_string()));
        }
        self.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> InfrastructureResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Workspace as one JSON document under the configured versioned key
pub struct JsonPersistence<S: KeyValueStorage> {
    storage: S,
    config: WorkspaceConfig,
}

impl<S: KeyValueStorage> JsonPersistence<S> {
    pub fn new(storage: S, config: WorkspaceConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn key(&self) -> String {
        self.config.storage_key.render()
    }

    fn read_state(&self) -> Option<WorkspaceState> {
        let key = self.key();
        let raw = match self.storage.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                get_logger().info(COMPONENT, &format!("No workspace under {}, starting from defaults", key));
                return None;
            }
            Err(err) => {
                get_logger().warn(COMPONENT, &format!("{}; starting from defaults", err));
                return None;
            }
        };

        match serde_json::from_str::<WorkspaceState>(&raw) {
            Ok(state) if state.boards.is_empty() => {
                get_logger().warn(COMPONENT, "Stored workspace has no boards, starting from defaults");
                None
            }
            Ok(state) => Some(state),
            Err(err) => {
                get_logger().warn(COMPONENT, &format!("Stored workspace unreadable ({}), starting from defaults", err));
                None
            }
        }
    }

    fn drop_stale_keys(&self) {
        for key in self.config.storage_key.stale_keys() {
            if let Err(err) = self.storage.remove(&key) {
                get_logger().debug(COMPONENT, &format!("Could not drop stale key {}: {}", key, err));
            }
        }
    }
}

impl<S: KeyValueStorage> PersistenceAdapter for JsonPersistence<S> {
    fn load(&self) -> WorkspaceState {
        self.drop_stale_keys();
        let mut state = self.read_state().unwrap_or_else(|| bootstrap_state(&self.config));
        state.normalize(&self.config, &ResponsiveGrid::new(self.config.clone()));
        state
    }

    fn save(&self, state: &WorkspaceState) -> InfrastructureResult<()> {
        let payload = serde_json::to_string(state)?;
        self.storage.write(&self.key(), &payload)?;
        get_logger().debug(COMPONENT, &format!("Workspace written: {} bytes", payload.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{BoardId, Breakpoint, GridLayoutProvider, MAX_GRID_ROWS, ResponsiveGrid};

    fn adapter() -> (JsonPersistence<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (JsonPersistence::new(storage.clone(), WorkspaceConfig::default()), storage)
    }

    #[test]
    fn missing_payload_bootstraps() {
        let (persistence, _) = adapter();
        let state = persistence.load();
        assert_eq!(state.boards.len(), 1);
        assert_eq!(state.active_board_id, BoardId::main());
    }

    #[test]
    fn corrupt_payload_bootstraps() {
        let (persistence, storage) = adapter();
        storage.insert("crypto_workspace_v3", "{not json");
        assert_eq!(persistence.load().boards.len(), 1);

        storage.insert("crypto_workspace_v3", r#"{"dashboards":[],"activeDashboardId":"main"}"#);
        assert_eq!(persistence.load().boards.len(), 1);
    }

    #[test]
    fn save_writes_under_versioned_key_and_drops_stale_ones() {
        let (persistence, storage) = adapter();
        storage.insert("crypto_workspace_v2", "old");
        let state = persistence.load();
        assert!(!storage.contains("crypto_workspace_v2"));

        persistence.save(&state).unwrap();
        let raw = storage.get("crypto_workspace_v3").unwrap();
        assert!(raw.contains("\"activeDashboardId\":\"main\""));
        assert!(raw.contains("\"userTier\":\"TIER_1\""));
    }

    #[test]
    fn out_of_grid_entries_are_pulled_back_on_load() {
        let (persistence, storage) = adapter();
        let payload = serde_json::json!({
            "dashboards": [{
                "id": "main",
                "name": "Main Board",
                "items": [
                    { "id": "w-1", "type": "PRICE", "symbol": "BTC", "title": "Price" },
                    { "id": "w-2", "type": "PRICE", "symbol": "ETH", "title": "Price" },
                    { "id": "w-3", "type": "NEWS", "symbol": "GLOBAL", "title": "News" }
                ],
                "layouts": { "lg": [
                    { "i": "w-1", "x": 4294967290u32, "y": 0, "w": 10, "h": 3 },
                    { "i": "w-2", "x": 0, "y": 4294967295u32, "w": 40, "h": 4294967295u32 }
                ] },
                "isLocked": true
            }],
            "activeDashboardId": "main",
            "userTier": "TIER_1"
        });
        storage.insert("crypto_workspace_v3", &payload.to_string());

        let state = persistence.load();
        let board = &state.boards[0];
        assert_eq!(board.items.len(), 3);
        let grid = ResponsiveGrid::default();
        for (breakpoint, entries) in &board.layouts {
            assert_eq!(entries.len(), 3);
            for entry in entries {
                assert!(entry.right() <= grid.columns(*breakpoint), "{:?} at {}", entry, breakpoint);
                assert!(entry.y <= 2 * MAX_GRID_ROWS);
            }
        }
        let lg = board.layout(Breakpoint::Lg);
        assert_eq!((lg[0].x, lg[0].w), (10, 10));
        assert_eq!(lg[1].w, 20);
    }

    #[test]
    fn failed_write_is_reported() {
        let (persistence, storage) = adapter();
        storage.set_fail_writes(true);
        let state = persistence.load();
        assert!(matches!(persistence.save(&state), Err(InfrastructureError::Storage(_))));
    }
}
