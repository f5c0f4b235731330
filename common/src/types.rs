use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Daily OHLCV bar. Only `close` feeds signal generation and valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Chronologically ordered, non-empty daily price history.
///
/// Construction validates strictly increasing dates (duplicates rejected);
/// gaps for non-trading days are allowed. Read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(EngineError::EmptySeries);
        }
        for i in 1..bars.len() {
            if bars[i].date <= bars[i - 1].date {
                return Err(EngineError::OutOfOrder { index: i });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// First bar. Safe: the series is non-empty by construction.
    pub fn first(&self) -> &PriceBar {
        &self.bars[0]
    }

    /// Last bar. Safe: the series is non-empty by construction.
    pub fn last(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    /// Whole calendar days between the first and last bar dates.
    pub fn date_span_days(&self) -> i64 {
        (self.last().date - self.first().date).num_days()
    }
}

/// Per-bar trading decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// Trading signal with strategy-specific conviction magnitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    pub strength: f64,
}

impl Signal {
    pub fn hold() -> Self {
        Self {
            action: SignalAction::Hold,
            strength: 0.0,
        }
    }
}

/// Portfolio snapshot after one simulated bar.
///
/// Invariant: `portfolio_value == cash + holdings_value`, `cash >= 0`,
/// long-only (`position` is an unsigned share count).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub position: u64,
    pub cash: f64,
    pub holdings_value: f64,
    pub portfolio_value: f64,
    /// None on the first simulated bar
    pub daily_return: Option<f64>,
}

/// Summary of one backtest run against its buy-and-hold baseline.
///
/// `annualized_return_pct` is None when the series spans zero calendar
/// days; `sharpe_ratio` is None when the daily returns have no variance.
/// Both serialize as JSON null and must be rendered as an explicit
/// "insufficient data" marker, never coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_investment: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub annualized_return_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown_pct: f64,
    pub buy_count: u32,
    pub sell_count: u32,
    pub buy_hold_return_pct: f64,
    pub outperformance_pct: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Last-bar recommendation for a live trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSignalResult {
    pub ticker: String,
    pub strategy: String,
    pub signal: SignalAction,
    pub signal_strength: f64,
    pub latest_price: f64,
    pub recommended_shares: u64,
    pub investment_amount: f64,
    pub estimated_cost: f64,
}
