//! Default boards: the hand-authored main board and the starter set of every
//! board created afterwards.

use super::catalog::WidgetType;
use super::config::WorkspaceConfig;
use super::entities::{Board, WidgetInstance, WorkspaceState};
use super::packing::{derive_breakpoints, grid_placement};
use super::value_objects::{BoardId, LayoutEntry, Layouts, Tier, WidgetId};
use crate::domain::market_data::Symbol;

pub const MAIN_BOARD_NAME: &str = "Main Board";

const MAIN_TILE_W: u32 = 4;
const MAIN_TILE_H: u32 = 3;
const MAIN_TILES_PER_ROW: u32 = 5;

fn main_widgets() -> Vec<(WidgetType, Symbol)> {
    vec![
        (WidgetType::Price, Symbol::from("BTC")),
        (WidgetType::Price, Symbol::from("ETH")),
        (WidgetType::FearGreed, Symbol::sentiment()),
        (WidgetType::Trend, Symbol::from("BTC")),
        (WidgetType::Dominance, Symbol::global()),
        (WidgetType::Heatmap, Symbol::market()),
        (WidgetType::OrderBook, Symbol::from("BTC")),
        (WidgetType::FundingRate, Symbol::from("BTC")),
        (WidgetType::TopMovers, Symbol::market()),
        (WidgetType::News, Symbol::global()),
    ]
}

fn starter_widgets() -> Vec<(WidgetType, Symbol)> {
    vec![
        (WidgetType::Price, Symbol::from("BTC")),
        (WidgetType::Trend, Symbol::from("ETH")),
        (WidgetType::FearGreed, Symbol::sentiment()),
        (WidgetType::Heatmap, Symbol::market()),
    ]
}

fn instantiate(widgets: Vec<(WidgetType, Symbol)>) -> Vec<WidgetInstance> {
    widgets
        .into_iter()
        .zip(1..)
        .map(|((widget_type, symbol), n)| WidgetInstance::new(WidgetId::numbered(n), widget_type, symbol))
        .collect()
}

/// The fixed `lg` arrangement of the main board: two rows of five tiles,
/// each tile four columns wide.
pub fn main_board_lg_layout(ids: &[WidgetId]) -> Vec<LayoutEntry> {
    ids.iter()
        .enumerate()
        .map(|(index, id)| {
            let index = index as u32;
            LayoutEntry::new(
                id.clone(),
                (index % MAIN_TILES_PER_ROW) * MAIN_TILE_W,
                (index / MAIN_TILES_PER_ROW) * MAIN_TILE_H,
                MAIN_TILE_W,
                MAIN_TILE_H,
            )
            .with_min(2, 2)
        })
        .collect()
}

/// Widgets and layouts of the main board
pub fn main_board_contents(config: &WorkspaceConfig) -> (Vec<WidgetInstance>, Layouts) {
    let items = instantiate(main_widgets());
    let ids: Vec<WidgetId> = items.iter().map(|item| item.id.clone()).collect();
    let layouts = derive_breakpoints(&ids, main_board_lg_layout(&ids), config);
    (items, layouts)
}

/// Lay out an arbitrary item set as fixed tiles, `reset_per_row` to a row
pub fn grid_layouts(ids: &[WidgetId], config: &WorkspaceConfig) -> Layouts {
    let lg = grid_placement(ids, config.reset_tile, config.reset_per_row);
    derive_breakpoints(ids, lg, config)
}

/// Widgets and layouts a freshly added board starts with
pub fn starter_board_contents(config: &WorkspaceConfig) -> (Vec<WidgetInstance>, Layouts) {
    let items = instantiate(starter_widgets());
    let ids: Vec<WidgetId> = items.iter().map(|item| item.id.clone()).collect();
    let layouts = grid_layouts(&ids, config);
    (items, layouts)
}

pub fn main_board(config: &WorkspaceConfig) -> Board {
    let (items, layouts) = main_board_contents(config);
    Board::new(BoardId::main(), MAIN_BOARD_NAME.to_string(), items, layouts, true)
}

/// Default name for the n-th board (1-based, main included)
pub fn board_name(position: usize) -> String {
    format!("Board {}", position)
}

/// Fresh workspace: only the main board, active, lowest tier
pub fn bootstrap_state(config: &WorkspaceConfig) -> WorkspaceState {
    WorkspaceState { boards: vec![main_board(config)], active_board_id: BoardId::main(), tier: Tier::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::value_objects::Breakpoint;

    #[test]
    fn main_board_has_ten_widgets_on_every_breakpoint() {
        let board = main_board(&WorkspaceConfig::default());
        assert!(board.is_locked);
        assert_eq!(board.items.len(), 10);
        assert_eq!(board.layouts.len(), 5);
        assert!(board.layouts.values().all(|entries| entries.len() == 10));
    }

    #[test]
    fn narrow_breakpoints_stay_within_columns() {
        let config = WorkspaceConfig::default();
        let board = main_board(&config);
        for breakpoint in Breakpoint::all() {
            let columns = config.columns(breakpoint);
            assert!(board.layout(breakpoint).iter().all(|entry| entry.right() <= columns));
        }
        // 16 columns hold four 4-wide tiles per row
        let md_rows: Vec<u32> = board.layout(Breakpoint::Md).iter().map(|e| e.y).collect();
        assert_eq!(md_rows, vec![0, 0, 0, 0, 3, 3, 3, 3, 6, 6]);
    }

    #[test]
    fn starter_board_uses_reset_tiles() {
        let (items, layouts) = starter_board_contents(&WorkspaceConfig::default());
        assert_eq!(items.len(), 4);
        let lg: Vec<(u32, u32, u32, u32)> = layouts[&Breakpoint::Lg].iter().map(|e| (e.x, e.y, e.w, e.h)).collect();
        assert_eq!(lg, vec![(0, 0, 5, 3), (5, 0, 5, 3), (10, 0, 5, 3), (15, 0, 5, 3)]);
    }
}
