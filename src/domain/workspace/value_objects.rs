use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

use crate::domain::market_data::Symbol;

/// Value Object - board identifier, unique across the workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    const MAIN: &'static str = "main";
    const PREFIX: &'static str = "board-";

    pub fn main() -> Self {
        Self(Self::MAIN.to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// `board-{n}` with n one past the highest numeric suffix in use
    pub fn next<'a>(existing: impl IntoIterator<Item = &'a BoardId>) -> Self {
        let n = existing
            .into_iter()
            .filter_map(|id| id.0.strip_prefix(Self::PREFIX)?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Self(format!("{}{}", Self::PREFIX, n + 1))
    }
}

impl From<&str> for BoardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Value Object - widget instance identifier, unique within its board only
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    const PREFIX: &'static str = "w-";

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn numbered(n: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, n))
    }

    pub fn next<'a>(existing: impl IntoIterator<Item = &'a WidgetId>) -> Self {
        let n = existing
            .into_iter()
            .filter_map(|id| id.0.strip_prefix(Self::PREFIX)?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Self::numbered(n + 1)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Subscription tier. Ordinal drives the board limit table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum Tier {
    #[default]
    #[strum(serialize = "TIER_1")]
    #[serde(rename = "TIER_1")]
    Tier1,
    #[strum(serialize = "TIER_2")]
    #[serde(rename = "TIER_2")]
    Tier2,
    #[strum(serialize = "TIER_3")]
    #[serde(rename = "TIER_3")]
    Tier3,
}

impl Tier {
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Tier1 => 0,
            Self::Tier2 => 1,
            Self::Tier3 => 2,
        }
    }
}

/// Responsive width tier, widest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    pub fn all() -> Vec<Breakpoint> {
        Breakpoint::iter().collect()
    }
}

/// Grid span of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSize {
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
}

impl WidgetSize {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h, min_w: 2, min_h: 2 }
    }
}

/// Row ceiling for positions and heights read from untrusted layouts
pub const MAX_GRID_ROWS: u32 = 10_000;

/// Grid position and span of one widget instance at one breakpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub i: WidgetId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
}

impl LayoutEntry {
    pub fn new(i: WidgetId, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { i, x, y, w, h, min_w: None, min_h: None }
    }

    pub fn with_min(mut self, min_w: u32, min_h: u32) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Pull the entry inside a `columns`-wide grid of at most `MAX_GRID_ROWS`
    /// rows. Returns true when anything moved or shrank.
    pub fn fit_to(&mut self, columns: u32) -> bool {
        let before = (self.x, self.y, self.w, self.h);
        let columns = columns.max(1);
        self.w = self.w.clamp(1, columns);
        self.x = self.x.min(columns - self.w);
        self.h = self.h.clamp(1, MAX_GRID_ROWS);
        self.y = self.y.min(MAX_GRID_ROWS);
        before != (self.x, self.y, self.w, self.h)
    }
}

/// Per-breakpoint layout lists of one board
pub type Layouts = BTreeMap<Breakpoint, Vec<LayoutEntry>>;

/// Symbol filter of the active board view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SymbolFilter {
    #[default]
    All,
    Symbol(Symbol),
}

impl SymbolFilter {
    pub const ALL: &'static str = "ALL";

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, symbol: &Symbol) -> bool {
        match self {
            Self::All => true,
            Self::Symbol(filter) => filter == symbol,
        }
    }
}

impl FromStr for SymbolFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(Self::ALL) {
            return Ok(Self::All);
        }
        Symbol::new(value.to_string()).map(Self::Symbol)
    }
}

impl std::fmt::Display for SymbolFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{}", Self::ALL),
            Self::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

/// Whether the host grid may be dragged/resized right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridFlags {
    pub is_draggable: bool,
    pub is_resizable: bool,
}

impl GridFlags {
    pub fn editable() -> Self {
        Self { is_draggable: true, is_resizable: true }
    }

    pub fn frozen() -> Self {
        Self { is_draggable: false, is_resizable: false }
    }
}
