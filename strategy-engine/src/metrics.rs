use common::{BacktestResult, PriceSeries, Signal, SignalAction, SimulationState};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Reduces a simulated state series to summary metrics, scored against a
/// buy-and-hold baseline on the same price history.
pub struct PerformanceAnalyzer;

impl PerformanceAnalyzer {
    pub fn analyze(
        states: &[SimulationState],
        series: &PriceSeries,
        signals: &[Signal],
        initial_investment: f64,
    ) -> BacktestResult {
        let final_value = states
            .last()
            .map(|s| s.portfolio_value)
            .unwrap_or(initial_investment);
        let total_return_pct = (final_value / initial_investment - 1.0) * 100.0;

        // Annualization needs a non-zero calendar span; a single-day series
        // reports the metric as undefined rather than failing.
        let calendar_days = series.date_span_days();
        let annualized_return_pct = if calendar_days > 0 {
            let growth = 1.0 + total_return_pct / 100.0;
            Some((growth.powf(365.0 / calendar_days as f64) - 1.0) * 100.0)
        } else {
            None
        };

        let sharpe_ratio = Self::sharpe_ratio(states);
        let max_drawdown_pct = Self::max_drawdown_pct(states);

        // Intended signals, not applied trades
        let buy_count = signals
            .iter()
            .filter(|s| s.action == SignalAction::Buy)
            .count() as u32;
        let sell_count = signals
            .iter()
            .filter(|s| s.action == SignalAction::Sell)
            .count() as u32;

        let buy_hold_return_pct = Self::buy_hold_return_pct(series, initial_investment);

        BacktestResult {
            initial_investment,
            final_value,
            total_return_pct,
            annualized_return_pct,
            sharpe_ratio,
            max_drawdown_pct,
            buy_count,
            sell_count,
            buy_hold_return_pct,
            outperformance_pct: total_return_pct - buy_hold_return_pct,
            start_date: series.first().date,
            end_date: series.last().date,
        }
    }

    /// Annualized mean/stdev of the defined daily returns. Sample standard
    /// deviation (n - 1 denominator). None when fewer than two returns are
    /// defined or the returns have zero variance.
    fn sharpe_ratio(states: &[SimulationState]) -> Option<f64> {
        let returns: Vec<f64> = states.iter().filter_map(|s| s.daily_return).collect();
        if returns.len() < 2 {
            return None;
        }

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let stdev = variance.sqrt();

        if stdev == 0.0 {
            return None;
        }
        Some(TRADING_DAYS_PER_YEAR.sqrt() * mean / stdev)
    }

    /// Worst percentage decline from the running portfolio-value peak.
    /// Zero or negative; a series that never declines reports 0.
    fn max_drawdown_pct(states: &[SimulationState]) -> f64 {
        let mut running_max = 0.0f64;
        let mut worst = 0.0f64;

        for state in states {
            if state.portfolio_value > running_max {
                running_max = state.portfolio_value;
            }
            if running_max > 0.0 {
                let drawdown = state.portfolio_value / running_max - 1.0;
                if drawdown < worst {
                    worst = drawdown;
                }
            }
        }

        worst * 100.0
    }

    /// All-in purchase at the first close, leftover kept as idle cash,
    /// valued at the final close.
    fn buy_hold_return_pct(series: &PriceSeries, initial_investment: f64) -> f64 {
        let first_close = series.first().close;
        let shares = if first_close > 0.0 {
            (initial_investment / first_close).floor()
        } else {
            0.0
        };
        let leftover = initial_investment - shares * first_close;
        let final_value = shares * series.last().close + leftover;
        (final_value / initial_investment - 1.0) * 100.0
    }
}
