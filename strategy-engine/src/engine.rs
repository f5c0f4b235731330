use rayon::prelude::*;

use common::{
    BacktestResult, EngineError, LiveSignalResult, PriceSeries, Result, Strategy,
};

use crate::metrics::PerformanceAnalyzer;
use crate::portfolio::PortfolioSimulator;
use crate::signals::SignalGenerator;

/// Ties the pipeline together for one strategy: signals, simulation,
/// scoring. Pure over its inputs; every call is an independent computation.
pub struct BacktestEngine {
    strategy: Strategy,
    initial_investment: f64,
}

impl BacktestEngine {
    pub fn new(strategy: Strategy, initial_investment: f64) -> Self {
        Self {
            strategy,
            initial_investment,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Full-history backtest over the supplied series
    pub fn run(&self, series: &PriceSeries) -> Result<BacktestResult> {
        if self.initial_investment <= 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "initial investment must be positive, got {}",
                self.initial_investment
            )));
        }

        let generator = SignalGenerator::new(self.strategy);
        let signals = generator.generate(series);
        let states = PortfolioSimulator::simulate(series, &signals, self.initial_investment);
        Ok(PerformanceAnalyzer::analyze(
            &states,
            series,
            &signals,
            self.initial_investment,
        ))
    }

    /// Last-bar recommendation: the latest signal plus a floor-division
    /// position size for the given budget.
    pub fn live_signal(
        &self,
        series: &PriceSeries,
        ticker: &str,
        investment_amount: f64,
    ) -> Result<LiveSignalResult> {
        if investment_amount <= 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "investment amount must be positive, got {investment_amount}"
            )));
        }

        let signal = SignalGenerator::new(self.strategy).latest(series);
        let latest_price = series.last().close;
        let recommended_shares = if latest_price > 0.0 {
            (investment_amount / latest_price).floor() as u64
        } else {
            0
        };

        Ok(LiveSignalResult {
            ticker: ticker.to_string(),
            strategy: self.strategy.name().to_string(),
            signal: signal.action,
            signal_strength: signal.strength,
            latest_price,
            recommended_shares,
            investment_amount,
            estimated_cost: recommended_shares as f64 * latest_price,
        })
    }

    /// Backtests over independent series in parallel. Requests share no
    /// state, so ordering between them is irrelevant.
    pub fn run_batch(
        &self,
        series_by_ticker: &[(String, PriceSeries)],
    ) -> Vec<(String, Result<BacktestResult>)> {
        series_by_ticker
            .par_iter()
            .map(|(ticker, series)| (ticker.clone(), self.run(series)))
            .collect()
    }
}

/// Runs several strategies against the same series in parallel
pub fn compare_strategies(
    series: &PriceSeries,
    strategies: &[Strategy],
    initial_investment: f64,
) -> Vec<(&'static str, Result<BacktestResult>)> {
    strategies
        .par_iter()
        .map(|strategy| {
            let engine = BacktestEngine::new(*strategy, initial_investment);
            (strategy.name(), engine.run(series))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::{flat_series, series_from_closes, trending_series};
    use approx::assert_relative_eq;
    use common::SignalAction;

    #[test]
    fn test_flat_series_all_strategies_hold() {
        // 60 bars of constant 100: Hold throughout, value unchanged,
        // Sharpe undefined for every strategy
        let series = flat_series(60, 100.0).unwrap();
        for strategy in Strategy::all_defaults() {
            let engine = BacktestEngine::new(strategy, 10_000.0);
            let result = engine.run(&series).unwrap();

            assert_eq!(result.buy_count, 0, "{}", strategy.name());
            assert_eq!(result.sell_count, 0, "{}", strategy.name());
            assert_relative_eq!(result.final_value, 10_000.0);
            assert_relative_eq!(result.total_return_pct, 0.0);
            assert_eq!(result.sharpe_ratio, None);
        }
    }

    #[test]
    fn test_momentum_uptrend_buys_once_and_holds() {
        let series = trending_series(40, 100.0, 0.01).unwrap();
        let engine = BacktestEngine::new(Strategy::from_name("momentum").unwrap(), 10_000.0);
        let result = engine.run(&series).unwrap();

        // Buy signals fire from bar 14 on, but only the first one opens
        // a position, so the run ends long and ahead of its start.
        assert_eq!(result.buy_count, 26);
        assert_eq!(result.sell_count, 0);
        assert!(result.final_value > 10_000.0);
        assert!(result.annualized_return_pct.unwrap() > 0.0);
    }

    #[test]
    fn test_rejects_non_positive_investment() {
        let series = flat_series(10, 100.0).unwrap();
        let engine = BacktestEngine::new(Strategy::from_name("rsi").unwrap(), 0.0);
        assert!(matches!(
            engine.run(&series),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_live_signal_matches_backtest_tail() {
        let series = trending_series(20, 100.0, 0.01).unwrap();
        let engine = BacktestEngine::new(Strategy::from_name("rsi").unwrap(), 10_000.0);
        let live = engine.live_signal(&series, "NVDA", 1_000.0).unwrap();

        // RSI saturates on an uptrend with no down days
        assert_eq!(live.signal, SignalAction::Sell);
        assert_relative_eq!(live.signal_strength, 1.0);
        assert_eq!(live.ticker, "NVDA");
        assert_eq!(live.strategy, "rsi");

        let latest = series.last().close;
        assert_eq!(live.recommended_shares, (1_000.0 / latest).floor() as u64);
        assert_relative_eq!(
            live.estimated_cost,
            live.recommended_shares as f64 * latest
        );
        assert!(live.estimated_cost <= live.investment_amount);
    }

    #[test]
    fn test_live_signal_zero_shares_when_price_exceeds_budget() {
        let series = series_from_closes(&[900.0, 950.0]).unwrap();
        let engine = BacktestEngine::new(Strategy::from_name("momentum").unwrap(), 10_000.0);
        let live = engine.live_signal(&series, "AZO", 500.0).unwrap();

        assert_eq!(live.recommended_shares, 0);
        assert_relative_eq!(live.estimated_cost, 0.0);
    }

    #[test]
    fn test_run_batch_matches_sequential_runs() {
        let batch = vec![
            ("UP".to_string(), trending_series(60, 100.0, 0.01).unwrap()),
            ("DOWN".to_string(), trending_series(60, 100.0, -0.01).unwrap()),
            ("FLAT".to_string(), flat_series(60, 100.0).unwrap()),
        ];
        let engine = BacktestEngine::new(Strategy::from_name("momentum").unwrap(), 10_000.0);

        let results = engine.run_batch(&batch);
        assert_eq!(results.len(), 3);
        for (ticker, result) in &results {
            let (_, series) = batch.iter().find(|(t, _)| t == ticker).unwrap();
            let sequential = engine.run(series).unwrap();
            let parallel = result.as_ref().unwrap();
            assert_eq!(parallel.buy_count, sequential.buy_count);
            assert_relative_eq!(parallel.final_value, sequential.final_value);
        }
    }

    #[test]
    fn test_compare_strategies_covers_all() {
        let series = trending_series(80, 100.0, 0.005).unwrap();
        let results = compare_strategies(&series, &Strategy::all_defaults(), 10_000.0);

        let mut names: Vec<&str> = results.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["momentum", "rsi", "sma_crossover"]);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }
}
