use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Momentum strategy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumParams {
    /// Bars between the two closes compared
    pub lookback: usize,
    /// Fractional change above which the bar is a Buy
    pub buy_threshold: f64,
    /// Fractional change below which the bar is a Sell
    pub sell_threshold: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            lookback: 14,
            buy_threshold: 0.02,
            sell_threshold: -0.02,
        }
    }
}

impl MomentumParams {
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }
}

/// SMA crossover strategy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaCrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for SmaCrossoverParams {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
        }
    }
}

impl SmaCrossoverParams {
    pub fn with_windows(mut self, short: usize, long: usize) -> Self {
        self.short_window = short;
        self.long_window = long;
        self
    }
}

/// RSI strategy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiParams {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl RsiParams {
    pub fn with_thresholds(mut self, oversold: f64, overbought: f64) -> Self {
        self.oversold = oversold;
        self.overbought = overbought;
        self
    }
}

/// Signal strategy selection, each variant carrying its parameter record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    Momentum(MomentumParams),
    SmaCrossover(SmaCrossoverParams),
    Rsi(RsiParams),
}

impl Strategy {
    /// Resolve a strategy name to its variant with default parameters.
    /// Unknown names are a hard rejection, never a silent default.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "momentum" => Ok(Self::Momentum(MomentumParams::default())),
            "sma_crossover" => Ok(Self::SmaCrossover(SmaCrossoverParams::default())),
            "rsi" => Ok(Self::Rsi(RsiParams::default())),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Momentum(_) => "momentum",
            Self::SmaCrossover(_) => "sma_crossover",
            Self::Rsi(_) => "rsi",
        }
    }

    /// All three strategies with default parameters, for comparison runs
    pub fn all_defaults() -> Vec<Self> {
        vec![
            Self::Momentum(MomentumParams::default()),
            Self::SmaCrossover(SmaCrossoverParams::default()),
            Self::Rsi(RsiParams::default()),
        ]
    }
}
