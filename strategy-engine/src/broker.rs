//! Collaborator seams for the I/O the core never performs itself:
//! market-data fetching and order submission. The core decides whether
//! and how much to trade; implementations of these traits talk to the
//! outside world.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use common::{LiveSignalResult, PriceSeries, Result, SignalAction};

/// Lookback window for a price-history request. Period tokens ("1mo",
/// "3mo", "1y", ...) are opaque to the core and interpreted by the
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataRange {
    Period(String),
    Dates { start: NaiveDate, end: NaiveDate },
}

/// Supplies a price history for a ticker
pub trait MarketData {
    fn fetch(&self, ticker: &str, range: &DataRange) -> Result<PriceSeries>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Market order, day time-in-force: the only order shape the engine emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub ticker: String,
    pub side: OrderSide,
    /// Always positive; zero-quantity intents are filtered out upstream
    pub quantity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Accepted,
    Filled,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub status: OrderStatus,
}

/// Submits orders to a brokerage. Implementations are constructed from an
/// explicit `BrokerConfig`; credentials are never read ambiently inside
/// the core.
pub trait OrderExecutor {
    fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt>;
}

/// Brokerage credentials, supplied by the caller at construction time
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub api_key: String,
    pub api_secret: String,
}

/// Account view used to gate live orders
#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot {
    pub buying_power: f64,
    /// Shares held per ticker
    pub positions: HashMap<String, u64>,
}

impl AccountSnapshot {
    pub fn held(&self, ticker: &str) -> u64 {
        self.positions.get(ticker).copied().unwrap_or(0)
    }
}

/// Turns a live recommendation into an order intent, or None when no
/// order should be placed:
///
/// - Buy requires `buying_power >= estimated_cost` and a non-zero size
/// - Sell requires an existing position; quantity is capped at the lesser
///   of recommended and held shares
/// - Hold never trades
pub fn plan_order(live: &LiveSignalResult, account: &AccountSnapshot) -> Option<OrderRequest> {
    match live.signal {
        SignalAction::Buy => {
            if live.recommended_shares == 0 || account.buying_power < live.estimated_cost {
                return None;
            }
            Some(OrderRequest {
                ticker: live.ticker.clone(),
                side: OrderSide::Buy,
                quantity: live.recommended_shares,
            })
        }
        SignalAction::Sell => {
            let quantity = live.recommended_shares.min(account.held(&live.ticker));
            if quantity == 0 {
                return None;
            }
            Some(OrderRequest {
                ticker: live.ticker.clone(),
                side: OrderSide::Sell,
                quantity,
            })
        }
        SignalAction::Hold => None,
    }
}
