use common::{PriceSeries, Signal, SignalAction, SimulationState};

/// Replays a signal sequence against a price series as a long-only,
/// single-position account: fully invested or flat, never pyramiding.
pub struct PortfolioSimulator;

impl PortfolioSimulator {
    /// One state per bar. Bar 0 seeds the account and receives no trading
    /// decision; from bar 1 the carried-forward state is adjusted by at
    /// most one rule:
    ///
    /// 1. Buy while flat: `shares = floor(cash / close)`, skipped at 0
    /// 2. Sell while long: liquidate at the close
    ///
    /// Everything else (Hold, Buy while long, Sell while flat) is a no-op.
    pub fn simulate(
        series: &PriceSeries,
        signals: &[Signal],
        initial_cash: f64,
    ) -> Vec<SimulationState> {
        let closes = series.closes();
        let mut states = Vec::with_capacity(closes.len());

        let mut position: u64 = 0;
        let mut cash = initial_cash;

        states.push(SimulationState {
            position,
            cash,
            holdings_value: 0.0,
            portfolio_value: cash,
            daily_return: None,
        });

        for i in 1..closes.len() {
            let close = closes[i];
            match signals.get(i).map(|s| s.action) {
                Some(SignalAction::Buy) if position == 0 && close > 0.0 => {
                    let shares = (cash / close).floor() as u64;
                    if shares > 0 {
                        position = shares;
                        cash -= shares as f64 * close;
                    }
                }
                Some(SignalAction::Sell) if position > 0 => {
                    cash += position as f64 * close;
                    position = 0;
                }
                _ => {}
            }

            let holdings_value = position as f64 * close;
            let portfolio_value = cash + holdings_value;
            let previous = states[i - 1].portfolio_value;
            let daily_return = if previous != 0.0 {
                Some(portfolio_value / previous - 1.0)
            } else {
                None
            };

            states.push(SimulationState {
                position,
                cash,
                holdings_value,
                portfolio_value,
                daily_return,
            });
        }

        states
    }
}
