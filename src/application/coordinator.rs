use serde::Serialize;

use crate::domain::{
    errors::{InfrastructureResult, WorkspaceError, WorkspaceResult},
    logging::{LogComponent, LogLevel, get_logger},
    market_data::Symbol,
    workspace::{
        Board, BoardId, Breakpoint, GridFlags, GridLayoutProvider, Layouts, PersistenceAdapter, ResponsiveGrid,
        SymbolFilter, Tier, WidgetId, WidgetInstance, WidgetType, WorkspaceConfig, WorkspaceState, access,
        templates,
    },
};

const COMPONENT: LogComponent = LogComponent::Application("WorkspaceController");

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Message for the toast area of the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn warning(message: String) -> Self {
        Self { kind: NoticeKind::Warning, message }
    }

    fn error(message: String) -> Self {
        Self { kind: NoticeKind::Error, message }
    }

    fn info(message: &str) -> Self {
        Self { kind: NoticeKind::Info, message: message.to_string() }
    }
}

/// What the host grid renders in one cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSlot {
    pub item: WidgetInstance,
    /// Position in the board's full item list, which is what gating uses
    pub index: usize,
    pub locked: bool,
    /// The widget is shown in the maximized overlay; keep its cell as an
    /// empty block so the grid does not collapse
    pub placeholder: bool,
}

/// Compact row for the board switcher
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub is_locked: bool,
    pub is_active: bool,
    pub widget_count: usize,
}

/// Owner of the workspace state and the only component that persists it.
///
/// Commands run to completion one at a time. Structural changes (board
/// add/remove/rename, tier) are flushed immediately; widget and layout edits
/// stay in memory until `save`.
pub struct WorkspaceController<P: PersistenceAdapter, G: GridLayoutProvider = ResponsiveGrid> {
    state: WorkspaceState,
    persistence: P,
    grid: G,
    config: WorkspaceConfig,
    breakpoint: Breakpoint,
    filter: SymbolFilter,
    structural_version: u64,
    unsaved_changes: bool,
    notice: Option<Notice>,
    pending_removal: Option<BoardId>,
}

impl<P: PersistenceAdapter> WorkspaceController<P, ResponsiveGrid> {
    pub fn load(persistence: P, config: WorkspaceConfig) -> Self {
        let grid = ResponsiveGrid::new(config.clone());
        Self::with_grid(persistence, grid, config)
    }
}

impl<P: PersistenceAdapter, G: GridLayoutProvider> WorkspaceController<P, G> {
    pub fn with_grid(persistence: P, grid: G, config: WorkspaceConfig) -> Self {
        let mut state = persistence.load();
        if state.normalize(&config, &grid) {
            get_logger().warn(COMPONENT, "Stored workspace needed repair; continuing with the repaired copy");
        }

        get_logger().info(
            COMPONENT,
            &format!("✅ Workspace ready: {} boards, tier {}", state.boards.len(), state.tier),
        );

        Self {
            state,
            persistence,
            grid,
            config,
            breakpoint: Breakpoint::Lg,
            filter: SymbolFilter::All,
            structural_version: 1,
            unsaved_changes: false,
            notice: None,
            pending_removal: None,
        }
    }

    // ----- board commands -------------------------------------------------

    /// Activate a board. Unknown ids self-heal to the main board and still
    /// report `UnknownBoard`.
    pub fn switch_board(&mut self, id: &BoardId) -> WorkspaceResult<()> {
        get_logger().debug(COMPONENT, &format!("switch_board({})", id));
        let result = self.state.switch_board(id);
        if result.is_err() {
            let main = self.state.main_board_id();
            if let Err(err) = self.state.switch_board(&main) {
                get_logger().error(COMPONENT, &format!("Main board fallback failed: {}", err));
            }
        }
        self.after_switch();
        result.map_err(|err| self.reject(err))
    }

    pub fn add_board(&mut self) -> WorkspaceResult<BoardId> {
        get_logger().debug(COMPONENT, "add_board()");
        let limit = self.board_limit();
        match self.state.add_board(limit, &self.config) {
            Ok(id) => {
                self.after_switch();
                self.flush();
                get_logger().info(COMPONENT, &format!("➕ Board {} created", id));
                Ok(id)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Remove a board right away. Unknown ids are a no-op (Ok(false)).
    pub fn remove_board(&mut self, id: &BoardId) -> WorkspaceResult<bool> {
        get_logger().debug(COMPONENT, &format!("remove_board({})", id));
        if self.pending_removal.as_ref() == Some(id) {
            self.pending_removal = None;
        }
        match self.state.remove_board(id) {
            Ok(was_active) => {
                if was_active {
                    self.after_switch();
                }
                self.flush();
                get_logger().info(COMPONENT, &format!("🗑️ Board {} removed", id));
                Ok(true)
            }
            Err(WorkspaceError::UnknownBoard(_)) => {
                get_logger().debug(COMPONENT, &format!("remove_board: {} not found, ignoring", id));
                Ok(false)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Stage a removal; the UI confirms or cancels it
    pub fn request_remove_board(&mut self, id: &BoardId) -> WorkspaceResult<()> {
        match self.state.board(id).map(|board| board.is_locked) {
            None => Err(self.reject(WorkspaceError::UnknownBoard(id.clone()))),
            Some(true) => Err(self.reject(WorkspaceError::CannotDeleteLockedBoard)),
            Some(false) => {
                self.pending_removal = Some(id.clone());
                Ok(())
            }
        }
    }

    pub fn confirm_remove_board(&mut self) -> WorkspaceResult<bool> {
        let id = self.pending_removal.take().ok_or(WorkspaceError::NoPendingConfirmation)?;
        self.remove_board(&id)
    }

    pub fn cancel_remove_board(&mut self) {
        self.pending_removal = None;
    }

    pub fn rename_board(&mut self, id: &BoardId, name: &str) -> WorkspaceResult<bool> {
        get_logger().debug(COMPONENT, &format!("rename_board({}, {:?})", id, name));
        match self.state.rename_board(id, name) {
            Ok(true) => {
                self.flush();
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => Err(self.reject(err)),
        }
    }

    pub fn set_tier(&mut self, tier: Tier) {
        if self.state.tier == tier {
            return;
        }
        get_logger().info(COMPONENT, &format!("Tier changed {} -> {}", self.state.tier, tier));
        self.state.tier = tier;
        self.flush();
    }

    // ----- widget commands ------------------------------------------------

    /// Add a widget to the active board. Sentinel-scoped kinds ignore
    /// `symbol`; ticker kinds default to the first catalog ticker.
    pub fn add_widget(&mut self, widget_type: WidgetType, symbol: Option<Symbol>) -> Option<WidgetId> {
        let fallback = Symbol::from("BTC");
        let symbol = widget_type.resolve_symbol(symbol, &fallback);
        let size = self.config.widget_size;
        let grid = &self.grid;
        let board = self.state.active_board_mut()?;
        let id = board.add_widget(widget_type, symbol, size, grid);
        get_logger().debug(COMPONENT, &format!("add_widget({}) -> {}", widget_type, id));
        self.unsaved_changes = true;
        Some(id)
    }

    /// Unknown ids are ignored (false)
    pub fn remove_widget(&mut self, id: &WidgetId) -> bool {
        let removed = self.state.active_board_mut().is_some_and(|board| board.remove_widget(id));
        if removed {
            self.unsaved_changes = true;
        } else {
            get_logger().debug(COMPONENT, &format!("remove_widget: {} not on active board", id));
        }
        removed
    }

    /// Flip one widget between normal and maximized. Maximizing clears the
    /// flag on every other widget so at most one overlay exists.
    pub fn toggle_maximize(&mut self, id: &WidgetId) -> bool {
        let Some(board) = self.state.active_board_mut() else {
            return false;
        };
        let Some(index) = board.widget_index(id) else {
            return false;
        };
        let maximize = !board.items[index].is_maximized;
        for (i, item) in board.items.iter_mut().enumerate() {
            item.is_maximized = maximize && i == index;
        }
        get_logger().debug(COMPONENT, &format!("toggle_maximize({}) -> {}", id, maximize));
        maximize
    }

    pub fn set_filter(&mut self, filter: SymbolFilter) {
        get_logger().debug(COMPONENT, &format!("set_filter({})", filter));
        self.filter = filter;
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        get_logger().debug(COMPONENT, &format!("set_breakpoint({})", breakpoint));
        self.breakpoint = breakpoint;
    }

    pub fn set_viewport_width(&mut self, width_px: u32) -> Breakpoint {
        self.breakpoint = self.grid.resolve_breakpoint(width_px);
        self.breakpoint
    }

    /// Accept a drag/resize result from the grid. Rejected while the grid is
    /// read-only; returns Ok(false) when nothing actually moved.
    pub fn on_layout_change(&mut self, breakpoint: Breakpoint, layouts: Layouts) -> WorkspaceResult<bool> {
        self.breakpoint = breakpoint;
        if !self.grid_flags().is_draggable {
            get_logger().debug(COMPONENT, "on_layout_change ignored: grid is read-only");
            return Err(WorkspaceError::GridReadOnly);
        }

        let grid = &self.grid;
        let Some(board) = self.state.active_board_mut() else {
            return Ok(false);
        };
        let merged = grid.on_drag_end(&board.items, &board.layouts, layouts);
        if merged == board.layouts {
            return Ok(false);
        }
        board.layouts = merged;
        board.touch();
        self.unsaved_changes = true;
        Ok(true)
    }

    /// Restore the active board to its template
    pub fn reset(&mut self) {
        let config = &self.config;
        let Some(board) = self.state.active_board_mut() else {
            return;
        };
        if board.is_locked {
            let (items, layouts) = templates::main_board_contents(config);
            board.items = items;
            board.layouts = layouts;
        } else {
            board.clear_maximized();
            let ids = board.item_ids();
            board.layouts = templates::grid_layouts(&ids, config);
        }
        board.touch();
        get_logger().info(COMPONENT, &format!("♻️ Board {} reset to defaults", board.id));
        self.filter = SymbolFilter::All;
        self.unsaved_changes = true;
        self.structural_version += 1;
    }

    /// Explicit "Save Layout"
    pub fn save(&mut self) -> InfrastructureResult<()> {
        let result = self.persistence.save(&self.persisted_state());
        match &result {
            Ok(()) => {
                self.unsaved_changes = false;
                self.notice = Some(Notice::info("Layout saved"));
                get_logger().info(COMPONENT, "💾 Workspace saved");
            }
            Err(err) => {
                get_logger().error(COMPONENT, &format!("Saving workspace failed: {}", err));
                self.notice = Some(Notice::error(format!("Could not save layout: {}", err)));
            }
        }
        result
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ----- derived views --------------------------------------------------

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.state.active_board()
    }

    pub fn active_board_id(&self) -> BoardId {
        self.active_board().map(|board| board.id.clone()).unwrap_or_else(BoardId::main)
    }

    pub fn active_items(&self) -> &[WidgetInstance] {
        self.active_board().map(|board| board.items.as_slice()).unwrap_or(&[])
    }

    /// Items passing the current filter, in board order
    pub fn visible_items(&self) -> Vec<&WidgetInstance> {
        self.active_items().iter().filter(|item| self.filter.matches(&item.symbol)).collect()
    }

    /// Layouts to hand to the grid. With a filter active these are
    /// synthetic and never written back.
    pub fn active_layouts(&self) -> Layouts {
        let Some(board) = self.active_board() else {
            return Layouts::new();
        };
        if self.filter.is_all() {
            return board.layouts.clone();
        }

        let ids: Vec<WidgetId> = self.visible_items().into_iter().map(|item| item.id.clone()).collect();
        board
            .layouts
            .keys()
            .map(|breakpoint| (*breakpoint, self.grid.compute_layout(&ids, &board.layouts, *breakpoint)))
            .collect()
    }

    pub fn is_item_locked(&self, index: usize) -> bool {
        let is_main = self.active_board().is_some_and(Board::is_main);
        access::is_locked(self.state.tier, is_main, index)
    }

    pub fn active_slots(&self) -> Vec<WidgetSlot> {
        self.active_items()
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filter.matches(&item.symbol))
            .map(|(index, item)| WidgetSlot {
                item: item.clone(),
                index,
                locked: self.is_item_locked(index),
                placeholder: item.is_maximized,
            })
            .collect()
    }

    pub fn maximized_item(&self) -> Option<&WidgetInstance> {
        self.active_board().and_then(Board::maximized)
    }

    pub fn grid_flags(&self) -> GridFlags {
        if self.filter.is_all() && self.maximized_item().is_none() {
            GridFlags::editable()
        } else {
            GridFlags::frozen()
        }
    }

    pub fn filter(&self) -> &SymbolFilter {
        &self.filter
    }

    /// "ALL" then each distinct symbol of the active board, first seen first
    pub fn filter_options(&self) -> Vec<SymbolFilter> {
        let mut options = vec![SymbolFilter::All];
        for item in self.active_items() {
            let option = SymbolFilter::Symbol(item.symbol.clone());
            if !options.contains(&option) {
                options.push(option);
            }
        }
        options
    }

    pub fn boards(&self) -> Vec<BoardSummary> {
        let active = self.active_board_id();
        self.state
            .boards
            .iter()
            .map(|board| BoardSummary {
                id: board.id.clone(),
                name: board.name.clone(),
                is_locked: board.is_locked,
                is_active: board.id == active,
                widget_count: board.items.len(),
            })
            .collect()
    }

    pub fn tier(&self) -> Tier {
        self.state.tier
    }

    pub fn board_limit(&self) -> usize {
        self.config.board_limit(self.state.tier)
    }

    pub fn can_add_board(&self) -> bool {
        self.state.boards.len() < self.board_limit()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn columns(&self) -> u32 {
        self.grid.columns(self.breakpoint)
    }

    /// Grid remount key. Changes on board switch and reset only.
    pub fn structural_version(&self) -> u64 {
        self.structural_version
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_removal(&self) -> Option<&BoardId> {
        self.pending_removal.as_ref()
    }

    // ----- internals ------------------------------------------------------

    fn after_switch(&mut self) {
        for board in &mut self.state.boards {
            board.clear_maximized();
        }
        self.filter = SymbolFilter::All;
        self.structural_version += 1;
    }

    fn reject(&mut self, err: WorkspaceError) -> WorkspaceError {
        get_logger().log_with_metadata(LogLevel::Warn, COMPONENT, "Command rejected", &err.to_string());
        self.notice = Some(Notice::warning(err.to_string()));
        err
    }

    /// Copy written to storage: maximize flags are transient
    fn persisted_state(&self) -> WorkspaceState {
        let mut state = self.state.clone();
        for board in &mut state.boards {
            board.clear_maximized();
        }
        state
    }

    /// Implicit save after a structural mutation
    fn flush(&mut self) {
        match self.persistence.save(&self.persisted_state()) {
            Ok(()) => self.unsaved_changes = false,
            Err(err) => {
                get_logger().error(COMPONENT, &format!("Persisting workspace failed: {}", err));
                self.notice = Some(Notice::error(format!("Could not persist workspace: {}", err)));
            }
        }
    }
}
