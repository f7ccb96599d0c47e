use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value_objects::{Breakpoint, Tier, WidgetSize};

/// Versioned storage key. Bumping `version` orphans older payloads, which
/// forces every client back to the default template on next load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKey {
    pub namespace: String,
    pub version: u32,
}

impl StorageKey {
    pub fn new(namespace: &str, version: u32) -> Self {
        Self { namespace: namespace.to_string(), version }
    }

    pub fn render(&self) -> String {
        format!("{}_v{}", self.namespace, self.version)
    }

    /// Keys of every earlier version of this namespace
    pub fn stale_keys(&self) -> Vec<String> {
        (1..self.version).map(|v| format!("{}_v{}", self.namespace, v)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointSpec {
    pub min_width: u32,
    pub columns: u32,
}

/// Tunables of one workspace profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceConfig {
    pub storage_key: StorageKey,
    pub breakpoints: BTreeMap<Breakpoint, BreakpointSpec>,
    /// Max boards (main included) indexed by tier ordinal
    pub board_limits: [usize; 3],
    /// Hard cap regardless of tier; the cockpit variant hosts a single board
    pub max_boards: Option<usize>,
    pub widget_size: WidgetSize,
    pub reset_tile: WidgetSize,
    pub reset_per_row: u32,
    pub save_delay_ms: u32,
    pub coin_fetch_timeout_ms: u32,
    pub coin_api_base_url: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        let breakpoints = BTreeMap::from([
            (Breakpoint::Lg, BreakpointSpec { min_width: 1200, columns: 20 }),
            (Breakpoint::Md, BreakpointSpec { min_width: 996, columns: 16 }),
            (Breakpoint::Sm, BreakpointSpec { min_width: 768, columns: 12 }),
            (Breakpoint::Xs, BreakpointSpec { min_width: 480, columns: 8 }),
            (Breakpoint::Xxs, BreakpointSpec { min_width: 0, columns: 4 }),
        ]);

        Self {
            storage_key: StorageKey::new("crypto_workspace", 3),
            breakpoints,
            board_limits: [2, 4, 6],
            max_boards: None,
            widget_size: WidgetSize::new(3, 3),
            reset_tile: WidgetSize::new(5, 3),
            reset_per_row: 4,
            save_delay_ms: 600,
            coin_fetch_timeout_ms: 8_000,
            coin_api_base_url: "https://api.coingecko.com/api/v3".to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Single-board variant persisted under its own key
    pub fn cockpit() -> Self {
        Self {
            storage_key: StorageKey::new("crypto_cockpit", 2),
            max_boards: Some(1),
            ..Self::default()
        }
    }

    /// Parse a JSON override; unspecified fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn board_limit(&self, tier: Tier) -> usize {
        let by_tier = self.board_limits.get(tier.ordinal()).copied().unwrap_or(1);
        match self.max_boards {
            Some(cap) => by_tier.min(cap),
            None => by_tier,
        }
    }

    pub fn columns(&self, breakpoint: Breakpoint) -> u32 {
        self.breakpoints.get(&breakpoint).map(|spec| spec.columns).unwrap_or(12).max(1)
    }
}
