use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::catalog::WidgetType;
use super::packing::{GridLayoutProvider, append_placement};
use super::value_objects::{BoardId, Breakpoint, LayoutEntry, Layouts, Tier, WidgetId, WidgetSize};
use crate::domain::market_data::{Symbol, Timestamp};

/// Domain entity - one hosted widget on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInstance {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub symbol: Symbol,
    pub title: String,
    #[serde(default)]
    pub is_maximized: bool,
}

impl WidgetInstance {
    pub fn new(id: WidgetId, widget_type: WidgetType, symbol: Symbol) -> Self {
        let title = widget_type.title_for(&symbol);
        Self { id, widget_type, symbol, title, is_maximized: false }
    }
}

/// Domain entity - a named set of widgets and their per-breakpoint layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<WidgetInstance>,
    #[serde(default)]
    pub layouts: Layouts,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub last_updated: Timestamp,
}

impl Board {
    pub fn new(id: BoardId, name: String, items: Vec<WidgetInstance>, layouts: Layouts, is_locked: bool) -> Self {
        Self { id, name, items, layouts, is_locked, last_updated: Timestamp::now() }
    }

    /// The protected main board is the one locked board
    pub fn is_main(&self) -> bool {
        self.is_locked
    }

    pub fn touch(&mut self) {
        self.last_updated = Timestamp::now();
    }

    pub fn widget(&self, id: &WidgetId) -> Option<&WidgetInstance> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn widget_index(&self, id: &WidgetId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub fn layout(&self, breakpoint: Breakpoint) -> &[LayoutEntry] {
        self.layouts.get(&breakpoint).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn item_ids(&self) -> Vec<WidgetId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Append a widget and place it on every breakpoint the board tracks
    pub fn add_widget(
        &mut self,
        widget_type: WidgetType,
        symbol: Symbol,
        size: WidgetSize,
        grid: &impl GridLayoutProvider,
    ) -> WidgetId {
        let id = WidgetId::next(self.items.iter().map(|item| &item.id));

        if self.layouts.is_empty() {
            self.layouts.insert(Breakpoint::Lg, Vec::new());
        }
        for (breakpoint, entries) in self.layouts.iter_mut() {
            let entry = append_placement(entries, id.clone(), size, grid.columns(*breakpoint));
            entries.push(entry);
        }

        self.items.push(WidgetInstance::new(id.clone(), widget_type, symbol));
        self.touch();
        id
    }

    /// Remove a widget together with all of its layout entries.
    /// Returns false when the id is not on this board.
    pub fn remove_widget(&mut self, id: &WidgetId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return false;
        }
        for entries in self.layouts.values_mut() {
            entries.retain(|entry| &entry.i != id);
        }
        self.touch();
        true
    }

    pub fn clear_maximized(&mut self) {
        for item in &mut self.items {
            item.is_maximized = false;
        }
    }

    pub fn maximized(&self) -> Option<&WidgetInstance> {
        self.items.iter().find(|item| item.is_maximized)
    }

    /// Restore uniqueness and referential completeness after loading
    /// untrusted data: duplicate items are dropped, orphan or duplicate
    /// layout entries are pruned, out-of-grid entries are pulled back inside
    /// the breakpoint's columns and missing entries are appended.
    /// Returns true when anything changed.
    pub fn repair(&mut self, default_size: WidgetSize, grid: &impl GridLayoutProvider) -> bool {
        let mut changed = false;

        let mut seen = HashSet::new();
        let before = self.items.len();
        self.items.retain(|item| seen.insert(item.id.clone()));
        changed |= self.items.len() != before;

        for (breakpoint, entries) in self.layouts.iter_mut() {
            let mut placed = HashSet::new();
            let before = entries.len();
            entries.retain(|entry| seen.contains(&entry.i) && placed.insert(entry.i.clone()));
            changed |= entries.len() != before;

            let columns = grid.columns(*breakpoint);
            for entry in entries.iter_mut() {
                changed |= entry.fit_to(columns);
            }

            for item in &self.items {
                if placed.contains(&item.id) {
                    continue;
                }
                let entry = append_placement(entries, item.id.clone(), default_size, columns);
                entries.push(entry);
                changed = true;
            }
        }

        changed
    }
}

/// The persisted unit: every board, which one is active, and the tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    #[serde(rename = "dashboards")]
    pub boards: Vec<Board>,
    #[serde(rename = "activeDashboardId")]
    pub active_board_id: BoardId,
    #[serde(rename = "userTier", default)]
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::packing::ResponsiveGrid;

    fn empty_board() -> Board {
        let mut layouts = Layouts::new();
        layouts.insert(Breakpoint::Lg, Vec::new());
        layouts.insert(Breakpoint::Xxs, Vec::new());
        Board::new(BoardId::from("board-1"), "Board 2".to_string(), Vec::new(), layouts, false)
    }

    #[test]
    fn add_widget_places_on_every_breakpoint() {
        let grid = ResponsiveGrid::default();
        let mut board = empty_board();
        let first = board.add_widget(WidgetType::Price, Symbol::from("BTC"), WidgetSize::new(3, 3), &grid);
        let second = board.add_widget(WidgetType::Trend, Symbol::from("ETH"), WidgetSize::new(3, 3), &grid);

        assert_eq!(first, WidgetId::from("w-1"));
        assert_eq!(second, WidgetId::from("w-2"));
        let lg: Vec<(u32, u32)> = board.layout(Breakpoint::Lg).iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(lg, vec![(0, 0), (3, 0)]);
        // 4 columns: the second tile no longer fits beside the first
        let xxs: Vec<(u32, u32)> = board.layout(Breakpoint::Xxs).iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(xxs, vec![(0, 0), (0, 3)]);
    }

    #[test]
    fn remove_widget_prunes_all_layouts() {
        let grid = ResponsiveGrid::default();
        let mut board = empty_board();
        let id = board.add_widget(WidgetType::Price, Symbol::from("BTC"), WidgetSize::new(3, 3), &grid);
        board.add_widget(WidgetType::News, Symbol::global(), WidgetSize::new(3, 3), &grid);

        assert!(board.remove_widget(&id));
        assert!(!board.remove_widget(&id));
        assert!(board.layouts.values().all(|entries| entries.iter().all(|e| e.i != id)));
        assert_eq!(board.items.len(), 1);
    }

    #[test]
    fn repair_prunes_orphans_and_fills_gaps() {
        let grid = ResponsiveGrid::default();
        let mut board = empty_board();
        board.items.push(WidgetInstance::new(WidgetId::from("w-1"), WidgetType::Price, Symbol::from("BTC")));
        board.items.push(WidgetInstance::new(WidgetId::from("w-1"), WidgetType::Price, Symbol::from("BTC")));
        board.layouts.insert(
            Breakpoint::Lg,
            vec![
                LayoutEntry::new(WidgetId::from("ghost"), 0, 0, 3, 3),
                LayoutEntry::new(WidgetId::from("w-1"), 0, 0, 3, 3),
                LayoutEntry::new(WidgetId::from("w-1"), 3, 0, 3, 3),
            ],
        );

        assert!(board.repair(WidgetSize::new(3, 3), &grid));
        assert_eq!(board.items.len(), 1);
        assert_eq!(board.layout(Breakpoint::Lg), &[LayoutEntry::new(WidgetId::from("w-1"), 0, 0, 3, 3)]);
        assert_eq!(board.layout(Breakpoint::Xxs).len(), 1);
        assert!(!board.repair(WidgetSize::new(3, 3), &grid));
    }

    #[test]
    fn widget_instance_wire_shape() {
        let item = WidgetInstance::new(WidgetId::from("w-1"), WidgetType::FearGreed, Symbol::sentiment());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "FEAR_GREED");
        assert_eq!(json["symbol"], "SENTIMENT");
        assert_eq!(json["isMaximized"], false);
    }
}
