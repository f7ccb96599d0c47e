use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

use gloo::utils::format::JsValueSerdeExt;
use gloo_timers::future::TimeoutFuture;
use js_sys::Promise;
use leptos::{SignalGetUntracked, SignalSet, SignalWithUntracked};
use serde::Serialize;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::application::{CoinCatalogService, WorkspaceController};
use crate::domain::{
    logging::{LogComponent, get_logger},
    market_data::{Symbol, default_symbols},
    workspace::{
        BoardId, Breakpoint, Layouts, SymbolFilter, Tier, WidgetId, WidgetType, WorkspaceConfig,
    },
};
use crate::global_state::{Globals, globals, publish_workspace};
use crate::infrastructure::{CoinGeckoClient, JsonPersistence, LocalStorageBackend};

const COMPONENT: LogComponent = LogComponent::Presentation("WorkspaceApi");

type BrowserController = WorkspaceController<JsonPersistence<LocalStorageBackend>>;

/// Picker row for the "add widget" dialog
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    #[serde(rename = "type")]
    widget_type: WidgetType,
    title: &'static str,
    needs_symbol: bool,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    JsValue::from_serde(value).unwrap_or(JsValue::NULL)
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS-facing workspace handle. Thin bridge: parses arguments, forwards to
/// the controller and republishes the reactive views after every command.
#[wasm_bindgen]
pub struct WorkspaceApi {
    controller: Rc<RefCell<BrowserController>>,
    globals: &'static Globals,
}

#[wasm_bindgen]
impl WorkspaceApi {
    /// Multi-board workspace with the default profile
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_workspace_config(WorkspaceConfig::default())
    }

    /// Workspace with a JSON profile override (camelCase keys, all optional).
    /// Unparsable JSON falls back to the default profile.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> WorkspaceApi {
        let config = WorkspaceConfig::from_json(json).unwrap_or_else(|err| {
            get_logger().warn(COMPONENT, &format!("Invalid workspace config ({}), using defaults", err));
            WorkspaceConfig::default()
        });
        Self::with_workspace_config(config)
    }

    /// Single-board cockpit variant
    pub fn cockpit() -> Self {
        Self::with_workspace_config(WorkspaceConfig::cockpit())
    }

    // ----- boards ---------------------------------------------------------

    #[wasm_bindgen(js_name = switchBoard)]
    pub fn switch_board(&self, id: &str) -> Result<(), JsValue> {
        let result = self.controller.borrow_mut().switch_board(&BoardId::from(id));
        self.publish();
        result.map_err(js_error)
    }

    #[wasm_bindgen(js_name = addBoard)]
    pub fn add_board(&self) -> Result<String, JsValue> {
        let result = self.controller.borrow_mut().add_board();
        self.publish();
        result.map(|id| id.value().to_string()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeBoard)]
    pub fn remove_board(&self, id: &str) -> Result<bool, JsValue> {
        let result = self.controller.borrow_mut().remove_board(&BoardId::from(id));
        self.publish();
        result.map_err(js_error)
    }

    #[wasm_bindgen(js_name = requestRemoveBoard)]
    pub fn request_remove_board(&self, id: &str) -> Result<(), JsValue> {
        let result = self.controller.borrow_mut().request_remove_board(&BoardId::from(id));
        self.publish();
        result.map_err(js_error)
    }

    #[wasm_bindgen(js_name = confirmRemoveBoard)]
    pub fn confirm_remove_board(&self) -> Result<bool, JsValue> {
        let result = self.controller.borrow_mut().confirm_remove_board();
        self.publish();
        result.map_err(js_error)
    }

    #[wasm_bindgen(js_name = cancelRemoveBoard)]
    pub fn cancel_remove_board(&self) {
        self.controller.borrow_mut().cancel_remove_board();
        self.publish();
    }

    #[wasm_bindgen(js_name = pendingRemoval)]
    pub fn pending_removal(&self) -> Option<String> {
        self.controller.borrow().pending_removal().map(|id| id.value().to_string())
    }

    #[wasm_bindgen(js_name = renameBoard)]
    pub fn rename_board(&self, id: &str, name: &str) -> Result<bool, JsValue> {
        let result = self.controller.borrow_mut().rename_board(&BoardId::from(id), name);
        self.publish();
        result.map_err(js_error)
    }

    #[wasm_bindgen(js_name = setTier)]
    pub fn set_tier(&self, tier: &str) -> Result<(), JsValue> {
        let tier = Tier::from_str(tier).map_err(|_| js_error(format!("Unknown tier: {}", tier)))?;
        self.controller.borrow_mut().set_tier(tier);
        self.publish();
        Ok(())
    }

    // ----- widgets --------------------------------------------------------

    #[wasm_bindgen(js_name = addWidget)]
    pub fn add_widget(&self, widget_type: &str, symbol: Option<String>) -> Result<String, JsValue> {
        let widget_type = WidgetType::from_str(widget_type)
            .map_err(|_| js_error(format!("Unknown widget type: {}", widget_type)))?;
        let symbol = symbol.and_then(|symbol| Symbol::new(symbol).ok());
        let id = self.controller.borrow_mut().add_widget(widget_type, symbol);
        self.publish();
        id.map(|id| id.value().to_string()).ok_or_else(|| js_error("No active board"))
    }

    #[wasm_bindgen(js_name = removeWidget)]
    pub fn remove_widget(&self, id: &str) -> bool {
        let removed = self.controller.borrow_mut().remove_widget(&WidgetId::from(id));
        self.publish();
        removed
    }

    #[wasm_bindgen(js_name = toggleMaximize)]
    pub fn toggle_maximize(&self, id: &str) -> bool {
        let maximized = self.controller.borrow_mut().toggle_maximize(&WidgetId::from(id));
        self.publish();
        maximized
    }

    /// "ALL" or a symbol
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, filter: &str) -> Result<(), JsValue> {
        let filter = SymbolFilter::from_str(filter).map_err(js_error)?;
        self.controller.borrow_mut().set_filter(filter);
        self.publish();
        Ok(())
    }

    /// Resolve and remember the breakpoint for a container width
    #[wasm_bindgen(js_name = setViewportWidth)]
    pub fn set_viewport_width(&self, width_px: u32) -> String {
        let breakpoint = self.controller.borrow_mut().set_viewport_width(width_px);
        self.publish();
        breakpoint.to_string()
    }

    /// Grid `onLayoutChange(current, allLayouts)` callback
    #[wasm_bindgen(js_name = onLayoutChange)]
    pub fn on_layout_change(&self, breakpoint: &str, all_layouts: JsValue) -> Result<bool, JsValue> {
        let breakpoint = Breakpoint::from_str(breakpoint)
            .map_err(|_| js_error(format!("Unknown breakpoint: {}", breakpoint)))?;
        let layouts: Layouts = all_layouts.into_serde().map_err(js_error)?;
        let result = self.controller.borrow_mut().on_layout_change(breakpoint, layouts);
        self.publish();
        result.map_err(js_error)
    }

    pub fn reset(&self) {
        self.controller.borrow_mut().reset();
        self.publish();
    }

    /// "Save Layout". Resolves after the feedback delay; `isSaving` is true
    /// in between.
    pub fn save(&self) -> Promise {
        let controller = Rc::clone(&self.controller);
        let globals = self.globals;
        let delay_ms = controller.borrow().config().save_delay_ms;
        globals.is_saving.set(true);

        future_to_promise(async move {
            TimeoutFuture::new(delay_ms).await;
            let result = controller.borrow_mut().save();
            globals.is_saving.set(false);
            publish_workspace(globals, &*controller.borrow());
            result.map(|_| JsValue::TRUE).map_err(js_error)
        })
    }

    #[wasm_bindgen(js_name = dismissNotice)]
    pub fn dismiss_notice(&self) {
        self.controller.borrow_mut().dismiss_notice();
        self.publish();
    }

    /// Fetch the coin catalog in the background; failures only log
    #[wasm_bindgen(js_name = loadCoins)]
    pub fn load_coins(&self) {
        let globals = self.globals;
        let config = self.controller.borrow().config().clone();

        spawn_local(async move {
            let client = CoinGeckoClient::new(&config.coin_api_base_url, config.coin_fetch_timeout_ms);
            let lookup = CoinCatalogService::new(client).load().await;
            globals.coin_lookup.set(lookup);
        });
    }

    // ----- views ----------------------------------------------------------

    pub fn boards(&self) -> JsValue {
        to_js(&self.controller.borrow().boards())
    }

    #[wasm_bindgen(js_name = activeBoardId)]
    pub fn active_board_id(&self) -> String {
        self.controller.borrow().active_board_id().value().to_string()
    }

    #[wasm_bindgen(js_name = activeSlots)]
    pub fn active_slots(&self) -> JsValue {
        to_js(&self.controller.borrow().active_slots())
    }

    #[wasm_bindgen(js_name = activeLayouts)]
    pub fn active_layouts(&self) -> JsValue {
        to_js(&self.controller.borrow().active_layouts())
    }

    #[wasm_bindgen(js_name = maximizedItem)]
    pub fn maximized_item(&self) -> JsValue {
        to_js(&self.controller.borrow().maximized_item())
    }

    #[wasm_bindgen(js_name = gridFlags)]
    pub fn grid_flags(&self) -> JsValue {
        to_js(&self.controller.borrow().grid_flags())
    }

    #[wasm_bindgen(js_name = filterOptions)]
    pub fn filter_options(&self) -> Vec<String> {
        self.controller.borrow().filter_options().iter().map(ToString::to_string).collect()
    }

    #[wasm_bindgen(js_name = structuralVersion)]
    pub fn structural_version(&self) -> f64 {
        self.controller.borrow().structural_version() as f64
    }

    #[wasm_bindgen(js_name = hasUnsavedChanges)]
    pub fn has_unsaved_changes(&self) -> bool {
        self.controller.borrow().has_unsaved_changes()
    }

    #[wasm_bindgen(js_name = isSaving)]
    pub fn is_saving(&self) -> bool {
        self.globals.is_saving.get_untracked()
    }

    pub fn notice(&self) -> JsValue {
        to_js(&self.controller.borrow().notice())
    }

    pub fn tier(&self) -> String {
        self.controller.borrow().tier().to_string()
    }

    #[wasm_bindgen(js_name = boardLimit)]
    pub fn board_limit(&self) -> usize {
        self.controller.borrow().board_limit()
    }

    #[wasm_bindgen(js_name = canAddBoard)]
    pub fn can_add_board(&self) -> bool {
        self.controller.borrow().can_add_board()
    }

    pub fn columns(&self) -> u32 {
        self.controller.borrow().columns()
    }

    #[wasm_bindgen(js_name = widgetCatalog)]
    pub fn widget_catalog(&self) -> JsValue {
        let entries: Vec<CatalogEntry> = WidgetType::iter()
            .map(|widget_type| CatalogEntry {
                widget_type,
                title: widget_type.default_title(),
                needs_symbol: widget_type.is_ticker_scoped(),
            })
            .collect();
        to_js(&entries)
    }

    /// Ticker choices, catalog-ranked once coins have loaded
    #[wasm_bindgen(js_name = symbolOptions)]
    pub fn symbol_options(&self) -> Vec<String> {
        let options = self.globals.coin_lookup.with_untracked(|lookup| {
            if lookup.is_empty() { default_symbols() } else { lookup.symbol_options() }
        });
        options.iter().map(|symbol| symbol.value().to_string()).collect()
    }

    /// Live figures for a widget header, `null` when unknown
    pub fn quote(&self, symbol: &str) -> JsValue {
        let quote = self.globals.coin_lookup.with_untracked(|lookup| lookup.decorate(&Symbol::from(symbol)));
        to_js(&quote)
    }
}

impl WorkspaceApi {
    fn with_workspace_config(config: WorkspaceConfig) -> Self {
        let persistence = JsonPersistence::new(LocalStorageBackend, config.clone());
        let controller = WorkspaceController::load(persistence, config);
        get_logger().info(COMPONENT, &format!("🚀 Workspace API ready on board {}", controller.active_board_id()));

        let api = Self { controller: Rc::new(RefCell::new(controller)), globals: globals() };
        api.publish();
        api
    }

    fn publish(&self) {
        publish_workspace(self.globals, &*self.controller.borrow());
    }
}

impl Default for WorkspaceApi {
    fn default() -> Self {
        Self::new()
    }
}
