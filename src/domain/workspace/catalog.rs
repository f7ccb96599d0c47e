//! Closed set of widget kinds the workspace can host. Rendering lives
//! elsewhere; the workspace only needs a title and the symbol scope.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::market_data::Symbol;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetType {
    Price,
    Trend,
    FearGreed,
    Heatmap,
    OrderBook,
    Volume,
    MarketCap,
    Dominance,
    Liquidations,
    FundingRate,
    OpenInterest,
    LongShortRatio,
    SocialSentiment,
    News,
    Correlation,
    Volatility,
    TopMovers,
    Altseason,
}

/// What a widget is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolScope {
    /// Bound to one market ticker chosen by the user
    Ticker,
    /// Fixed to a sentinel symbol
    Global,
    Market,
    Sentiment,
}

impl WidgetType {
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Trend => "Trend",
            Self::FearGreed => "Fear & Greed",
            Self::Heatmap => "Market Heatmap",
            Self::OrderBook => "Order Book",
            Self::Volume => "Volume",
            Self::MarketCap => "Market Cap",
            Self::Dominance => "BTC Dominance",
            Self::Liquidations => "Liquidations",
            Self::FundingRate => "Funding Rate",
            Self::OpenInterest => "Open Interest",
            Self::LongShortRatio => "Long/Short Ratio",
            Self::SocialSentiment => "Social Sentiment",
            Self::News => "News",
            Self::Correlation => "Correlation",
            Self::Volatility => "Volatility",
            Self::TopMovers => "Top Movers",
            Self::Altseason => "Altseason Index",
        }
    }

    pub fn scope(&self) -> SymbolScope {
        match self {
            Self::Price
            | Self::Trend
            | Self::OrderBook
            | Self::Volume
            | Self::Liquidations
            | Self::FundingRate
            | Self::OpenInterest
            | Self::LongShortRatio
            | Self::Volatility => SymbolScope::Ticker,
            Self::Heatmap | Self::MarketCap | Self::TopMovers => SymbolScope::Market,
            Self::FearGreed | Self::SocialSentiment => SymbolScope::Sentiment,
            Self::Dominance | Self::News | Self::Correlation | Self::Altseason => SymbolScope::Global,
        }
    }

    pub fn is_ticker_scoped(&self) -> bool {
        self.scope() == SymbolScope::Ticker
    }

    /// Symbol the widget ends up bound to. Sentinel-scoped widgets ignore the
    /// requested symbol; ticker widgets fall back to `fallback` when none is
    /// given or a sentinel was passed.
    pub fn resolve_symbol(&self, requested: Option<Symbol>, fallback: &Symbol) -> Symbol {
        match self.scope() {
            SymbolScope::Global => Symbol::global(),
            SymbolScope::Market => Symbol::market(),
            SymbolScope::Sentiment => Symbol::sentiment(),
            SymbolScope::Ticker => requested
                .filter(|symbol| !symbol.is_sentinel())
                .unwrap_or_else(|| fallback.clone()),
        }
    }

    pub fn title_for(&self, symbol: &Symbol) -> String {
        if self.is_ticker_scoped() {
            format!("{} · {}", self.default_title(), symbol)
        } else {
            self.default_title().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn catalog_has_eighteen_kinds_with_wire_names() {
        assert_eq!(WidgetType::iter().count(), 18);
        assert_eq!(WidgetType::FearGreed.to_string(), "FEAR_GREED");
        assert_eq!("LONG_SHORT_RATIO".parse::<WidgetType>().unwrap(), WidgetType::LongShortRatio);
        assert_eq!(serde_json::to_string(&WidgetType::TopMovers).unwrap(), "\"TOP_MOVERS\"");
    }

    #[test]
    fn sentinel_widgets_ignore_requested_symbol() {
        let btc = Symbol::from("BTC");
        assert_eq!(WidgetType::FearGreed.resolve_symbol(Some(Symbol::from("ETH")), &btc), Symbol::sentiment());
        assert_eq!(WidgetType::Heatmap.resolve_symbol(None, &btc), Symbol::market());
        assert_eq!(WidgetType::Price.resolve_symbol(Some(Symbol::global()), &btc), btc);
        assert_eq!(WidgetType::Price.resolve_symbol(Some(Symbol::from("sol")), &btc), Symbol::from("SOL"));
    }

    #[test]
    fn titles_carry_ticker() {
        assert_eq!(WidgetType::Price.title_for(&Symbol::from("ETH")), "Price · ETH");
        assert_eq!(WidgetType::News.title_for(&Symbol::global()), "News");
    }
}
