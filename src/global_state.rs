use crate::application::{BoardSummary, Notice, WidgetSlot, WorkspaceController};
use crate::domain::market_data::CoinLookup;
use crate::domain::workspace::{
    BoardId, GridFlags, GridLayoutProvider, Layouts, PersistenceAdapter, SymbolFilter, Tier,
};
use crate::read_signals;
use leptos::*;
use once_cell::sync::OnceCell;

/// Reactive mirror of the controller's derived views. The controller stays
/// the single writer; these signals only ever receive published snapshots.
pub struct Globals {
    pub boards: RwSignal<Vec<BoardSummary>>,
    pub active_board_id: RwSignal<BoardId>,
    pub active_slots: RwSignal<Vec<WidgetSlot>>,
    pub active_layouts: RwSignal<Layouts>,
    pub grid_flags: RwSignal<GridFlags>,
    pub active_filter: RwSignal<SymbolFilter>,
    pub filter_options: RwSignal<Vec<SymbolFilter>>,
    /// Grid remount key
    pub structural_version: RwSignal<u64>,
    pub unsaved_changes: RwSignal<bool>,
    pub notice: RwSignal<Option<Notice>>,
    pub is_saving: RwSignal<bool>,
    pub tier: RwSignal<Tier>,
    pub can_add_board: RwSignal<bool>,
    pub coin_lookup: RwSignal<CoinLookup>,
}

impl Globals {
    pub fn new() -> Self {
        Self {
            boards: create_rw_signal(Vec::new()),
            active_board_id: create_rw_signal(BoardId::main()),
            active_slots: create_rw_signal(Vec::new()),
            active_layouts: create_rw_signal(Layouts::new()),
            grid_flags: create_rw_signal(GridFlags::editable()),
            active_filter: create_rw_signal(SymbolFilter::All),
            filter_options: create_rw_signal(vec![SymbolFilter::All]),
            structural_version: create_rw_signal(0),
            unsaved_changes: create_rw_signal(false),
            notice: create_rw_signal(None),
            is_saving: create_rw_signal(false),
            tier: create_rw_signal(Tier::default()),
            can_add_board: create_rw_signal(true),
            coin_lookup: create_rw_signal(CoinLookup::default()),
        }
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(Globals::new)
}

read_signals! {
    pub boards => boards: Vec<BoardSummary>,
    pub active_slots => active_slots: Vec<WidgetSlot>,
    pub active_layouts => active_layouts: Layouts,
    pub grid_flags => grid_flags: GridFlags,
    pub structural_version => structural_version: u64,
    pub unsaved_changes => unsaved_changes: bool,
    pub notice => notice: Option<Notice>,
    pub is_saving => is_saving: bool,
    pub coin_lookup => coin_lookup: CoinLookup,
}

/// Write only when the value differs, so subscribers (and the grid remount
/// key in particular) fire on real changes
fn set_if_changed<T: PartialEq + Clone + 'static>(signal: RwSignal<T>, value: T) {
    if signal.with_untracked(|current| current != &value) {
        signal.set(value);
    }
}

/// Push the controller's current views into `globals`
pub fn publish_workspace<P, G>(globals: &Globals, controller: &WorkspaceController<P, G>)
where
    P: PersistenceAdapter,
    G: GridLayoutProvider,
{
    set_if_changed(globals.boards, controller.boards());
    set_if_changed(globals.active_board_id, controller.active_board_id());
    set_if_changed(globals.active_slots, controller.active_slots());
    set_if_changed(globals.active_layouts, controller.active_layouts());
    set_if_changed(globals.grid_flags, controller.grid_flags());
    set_if_changed(globals.active_filter, controller.filter().clone());
    set_if_changed(globals.filter_options, controller.filter_options());
    set_if_changed(globals.structural_version, controller.structural_version());
    set_if_changed(globals.unsaved_changes, controller.has_unsaved_changes());
    set_if_changed(globals.notice, controller.notice().cloned());
    set_if_changed(globals.tier, controller.tier());
    set_if_changed(globals.can_add_board, controller.can_add_board());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{WidgetType, WorkspaceConfig};
    use crate::infrastructure::{JsonPersistence, MemoryStorage};

    #[test]
    fn publish_mirrors_controller_views() {
        let config = WorkspaceConfig::default();
        let persistence = JsonPersistence::new(MemoryStorage::new(), config.clone());
        let mut controller = WorkspaceController::load(persistence, config);
        let globals = Globals::new();

        publish_workspace(&globals, &controller);
        assert_eq!(globals.structural_version.get_untracked(), 1);
        assert_eq!(globals.active_slots.with_untracked(Vec::len), 10);
        assert!(!globals.unsaved_changes.get_untracked());

        controller.add_widget(WidgetType::Volume, None);
        publish_workspace(&globals, &controller);
        assert_eq!(globals.active_slots.with_untracked(Vec::len), 11);
        assert!(globals.unsaved_changes.get_untracked());
        // widget edits never remount the grid
        assert_eq!(globals.structural_version.get_untracked(), 1);
    }
}
