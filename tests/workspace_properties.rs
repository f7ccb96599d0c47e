use std::collections::HashSet;

use crypto_workspace_wasm::application::WorkspaceController;
use crypto_workspace_wasm::domain::market_data::{Symbol, Timestamp};
use crypto_workspace_wasm::domain::workspace::{
    Breakpoint, PersistenceAdapter, SymbolFilter, Tier, WidgetType, WorkspaceConfig, WorkspaceState,
};
use crypto_workspace_wasm::infrastructure::{JsonPersistence, MemoryStorage};
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

type Controller = WorkspaceController<JsonPersistence<MemoryStorage>>;

const SYMBOLS: [&str; 4] = ["BTC", "ETH", "SOL", "DOGE"];

fn controller(storage: &MemoryStorage) -> Controller {
    let config = WorkspaceConfig::default();
    WorkspaceController::load(JsonPersistence::new(storage.clone(), config.clone()), config)
}

/// Drive the controller with one command decoded from a byte
fn apply(controller: &mut Controller, byte: u8) {
    let arg = (byte / 10) as usize;
    match byte % 10 {
        0 => {
            let _ = controller.add_board();
        }
        1 => {
            let id = controller.active_board_id();
            let _ = controller.remove_board(&id);
        }
        2 => {
            let boards = controller.boards();
            let id = boards[arg % boards.len()].id.clone();
            let _ = controller.switch_board(&id);
        }
        3 => {
            let widget_type = WidgetType::iter().nth(arg % 18).unwrap_or(WidgetType::Price);
            controller.add_widget(widget_type, Some(Symbol::from(SYMBOLS[arg % SYMBOLS.len()])));
        }
        4 => {
            let items = controller.active_items();
            if !items.is_empty() {
                let id = items[arg % items.len()].id.clone();
                controller.remove_widget(&id);
            }
        }
        5 => {
            let items = controller.active_items();
            if !items.is_empty() {
                let id = items[arg % items.len()].id.clone();
                controller.toggle_maximize(&id);
            }
        }
        6 => {
            let options = controller.filter_options();
            controller.set_filter(options[arg % options.len()].clone());
        }
        7 => controller.reset(),
        8 => {
            let mut layouts = controller.active_layouts();
            if let Some(entry) = layouts.get_mut(&Breakpoint::Lg).and_then(|lg| lg.first_mut()) {
                entry.y += 1 + (arg as u32 % 3);
            }
            let _ = controller.on_layout_change(Breakpoint::Lg, layouts);
        }
        _ => {
            let _ = controller.save();
        }
    }
}

fn run(bytes: &[u8]) -> (Controller, MemoryStorage) {
    let storage = MemoryStorage::new();
    let mut controller = controller(&storage);
    controller.set_tier(Tier::Tier3);
    for byte in bytes {
        apply(&mut controller, *byte);
    }
    (controller, storage)
}

fn structurally_valid(state: &WorkspaceState) -> bool {
    let board_ids: HashSet<_> = state.boards.iter().map(|board| &board.id).collect();
    if board_ids.len() != state.boards.len() || !board_ids.contains(&state.active_board_id) {
        return false;
    }
    if state.locked_board_count() != 1 {
        return false;
    }

    state.boards.iter().all(|board| {
        let item_ids: HashSet<_> = board.items.iter().map(|item| &item.id).collect();
        item_ids.len() == board.items.len()
            && board.items.iter().filter(|item| item.is_maximized).count() <= 1
            && board.layouts.values().all(|entries| {
                let placed: HashSet<_> = entries.iter().map(|entry| &entry.i).collect();
                placed.len() == entries.len() && placed == item_ids
            })
    })
}

fn without_timestamps(mut state: WorkspaceState) -> WorkspaceState {
    for board in &mut state.boards {
        board.last_updated = Timestamp::default();
    }
    state
}

#[quickcheck]
fn any_command_sequence_keeps_workspace_valid(bytes: Vec<u8>) -> bool {
    let (controller, _) = run(&bytes);
    structurally_valid(controller.state()) && controller.state().boards.len() <= controller.board_limit()
}

#[quickcheck]
fn layouts_stay_within_columns(bytes: Vec<u8>) -> bool {
    let (controller, _) = run(&bytes);
    let config = controller.config().clone();
    controller.state().boards.iter().all(|board| {
        board.layouts.iter().all(|(breakpoint, entries)| {
            entries.iter().all(|entry| entry.w >= 1 && entry.right() <= config.columns(*breakpoint))
        })
    })
}

#[quickcheck]
fn filtering_never_touches_stored_layouts(bytes: Vec<u8>, pick: u8) -> bool {
    let (mut controller, _) = run(&bytes);
    controller.set_filter(SymbolFilter::All);
    let before = controller.active_layouts();

    let options = controller.filter_options();
    controller.set_filter(options[pick as usize % options.len()].clone());
    let _ = controller.active_layouts();
    controller.set_filter(SymbolFilter::All);

    controller.active_layouts() == before
}

#[quickcheck]
fn same_commands_give_same_workspace(bytes: Vec<u8>) -> bool {
    let (first, _) = run(&bytes);
    let (second, _) = run(&bytes);
    without_timestamps(first.state().clone()) == without_timestamps(second.state().clone())
}

#[quickcheck]
fn saved_workspace_loads_back_unchanged(bytes: Vec<u8>) -> bool {
    let (mut controller, storage) = run(&bytes);
    if controller.save().is_err() {
        return false;
    }

    let mut expected = controller.state().clone();
    for board in &mut expected.boards {
        board.clear_maximized();
    }
    let loaded = JsonPersistence::new(storage, controller.config().clone()).load();
    loaded == expected
}
