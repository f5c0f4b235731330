pub mod broker;
pub mod data;
pub mod engine;
pub mod indicators;
pub mod metrics;
pub mod portfolio;
pub mod signals;

pub use broker::{plan_order, AccountSnapshot, DataRange, MarketData, OrderExecutor, OrderRequest};
pub use data::{load_file, synthetic};
pub use engine::BacktestEngine;
pub use metrics::PerformanceAnalyzer;
pub use portfolio::PortfolioSimulator;
pub use signals::SignalGenerator;

// Re-export common types
pub use common::{
    BacktestResult, EngineError, LiveSignalResult, MomentumParams, PriceBar, PriceSeries, Result,
    RsiParams, Signal, SignalAction, SimulationState, SmaCrossoverParams, Strategy,
};
