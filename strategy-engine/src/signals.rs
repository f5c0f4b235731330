use common::{
    MomentumParams, PriceSeries, RsiParams, Signal, SignalAction, SmaCrossoverParams, Strategy,
};

use crate::indicators::{calculate_momentum, calculate_rsi, calculate_sma};

/// Maps a price series to an aligned per-bar signal sequence for one
/// strategy. Bars lacking enough history degrade to Hold, never an error.
///
/// Momentum and SMA crossover report their indicator magnitude as the
/// strength even on Hold bars; only warmup bars (and every RSI Hold)
/// carry strength 0.
pub struct SignalGenerator {
    strategy: Strategy,
}

impl SignalGenerator {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// One signal per bar, index-for-index with the series
    pub fn generate(&self, series: &PriceSeries) -> Vec<Signal> {
        let closes = series.closes();
        match &self.strategy {
            Strategy::Momentum(params) => momentum_signals(&closes, params),
            Strategy::SmaCrossover(params) => sma_crossover_signals(&closes, params),
            Strategy::Rsi(params) => rsi_signals(&closes, params),
        }
    }

    /// Signal for the most recent bar, used for live recommendations.
    /// Always equal to the last element of `generate` over the same series.
    pub fn latest(&self, series: &PriceSeries) -> Signal {
        self.generate(series).pop().unwrap_or_else(Signal::hold)
    }
}

fn momentum_signals(closes: &[f64], params: &MomentumParams) -> Vec<Signal> {
    calculate_momentum(closes, params.lookback)
        .into_iter()
        .map(|m| match m {
            Some(m) if m > params.buy_threshold => Signal {
                action: SignalAction::Buy,
                strength: m.abs(),
            },
            Some(m) if m < params.sell_threshold => Signal {
                action: SignalAction::Sell,
                strength: m.abs(),
            },
            Some(m) => Signal {
                action: SignalAction::Hold,
                strength: m.abs(),
            },
            None => Signal::hold(),
        })
        .collect()
}

fn sma_crossover_signals(closes: &[f64], params: &SmaCrossoverParams) -> Vec<Signal> {
    let short = calculate_sma(closes, params.short_window);
    let long = calculate_sma(closes, params.long_window);

    let mut signals = vec![Signal::hold(); closes.len()];
    for i in 1..closes.len() {
        let (Some(s), Some(l)) = (short[i], long[i]) else {
            continue;
        };

        let action = match (short[i - 1], long[i - 1]) {
            (Some(prev_s), Some(prev_l)) if s > l && prev_s <= prev_l => SignalAction::Buy,
            (Some(prev_s), Some(prev_l)) if s < l && prev_s >= prev_l => SignalAction::Sell,
            _ => SignalAction::Hold,
        };

        let strength = if closes[i] != 0.0 {
            (s - l).abs() / closes[i]
        } else {
            0.0
        };
        signals[i] = Signal { action, strength };
    }

    signals
}

fn rsi_signals(closes: &[f64], params: &RsiParams) -> Vec<Signal> {
    calculate_rsi(closes, params.period)
        .into_iter()
        .map(|r| match r {
            Some(rsi) if rsi < params.oversold => Signal {
                action: SignalAction::Buy,
                strength: (params.oversold - rsi) / params.oversold,
            },
            Some(rsi) if rsi > params.overbought => Signal {
                action: SignalAction::Sell,
                strength: (rsi - params.overbought) / (100.0 - params.overbought),
            },
            _ => Signal::hold(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::{flat_series, series_from_closes, step_series, trending_series};
    use approx::assert_relative_eq;
    use common::RsiParams;

    #[test]
    fn test_flat_series_is_all_hold_for_every_strategy() {
        let series = flat_series(60, 100.0).unwrap();
        for strategy in Strategy::all_defaults() {
            let signals = SignalGenerator::new(strategy).generate(&series);
            assert_eq!(signals.len(), 60);
            assert!(
                signals.iter().all(|s| s.action == SignalAction::Hold),
                "{} produced a non-Hold signal on flat prices",
                strategy.name()
            );
            assert!(signals.iter().all(|s| s.strength == 0.0));
        }
    }

    #[test]
    fn test_momentum_uptrend_buys_from_lookback_bar() {
        // 1% per bar; momentum at bar 14 is 1.01^14 - 1 ~ 0.149
        let series = trending_series(40, 100.0, 0.01).unwrap();
        let generator = SignalGenerator::new(Strategy::from_name("momentum").unwrap());
        let signals = generator.generate(&series);

        for signal in &signals[..14] {
            assert_eq!(signal.action, SignalAction::Hold);
        }
        assert_eq!(signals[14].action, SignalAction::Buy);
        assert_relative_eq!(
            signals[14].strength,
            1.01f64.powi(14) - 1.0,
            epsilon = 1e-9
        );
        for signal in &signals[14..] {
            assert_eq!(signal.action, SignalAction::Buy);
        }
    }

    #[test]
    fn test_momentum_downtrend_sells() {
        let series = trending_series(40, 100.0, -0.01).unwrap();
        let generator = SignalGenerator::new(Strategy::from_name("momentum").unwrap());
        let signals = generator.generate(&series);
        assert_eq!(signals[14].action, SignalAction::Sell);
        assert!(signals[14].strength > 0.0);
    }

    #[test]
    fn test_rsi_saturation_sells_with_full_strength() {
        // 20 strictly rising closes, no down days: avg_loss = 0, RSI = 100
        let series = trending_series(20, 100.0, 0.01).unwrap();
        let generator = SignalGenerator::new(Strategy::Rsi(RsiParams::default()));
        let signals = generator.generate(&series);

        let last = signals.last().unwrap();
        assert_eq!(last.action, SignalAction::Sell);
        // (100 - 70) / (100 - 70) = 1.0
        assert_relative_eq!(last.strength, 1.0);
    }

    #[test]
    fn test_rsi_downtrend_buys() {
        let series = trending_series(20, 100.0, -0.01).unwrap();
        let generator = SignalGenerator::new(Strategy::Rsi(RsiParams::default()));
        let signals = generator.generate(&series);

        let last = signals.last().unwrap();
        assert_eq!(last.action, SignalAction::Buy);
        // RSI = 0: (30 - 0) / 30 = 1.0
        assert_relative_eq!(last.strength, 1.0);
    }

    #[test]
    fn test_sma_crossover_single_upward_cross() {
        // 60 bars at 100 then 20 bars at 200. At bar 60 the 20-bar SMA
        // jumps to 105 vs 102 for the 50-bar SMA (previous bar: both 100),
        // so the one and only upward cross is at bar 60.
        let series = step_series(60, 100.0, 20, 200.0).unwrap();
        let generator = SignalGenerator::new(Strategy::from_name("sma_crossover").unwrap());
        let signals = generator.generate(&series);

        let buys: Vec<usize> = signals
            .iter()
            .enumerate()
            .filter(|(_, s)| s.action == SignalAction::Buy)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(buys, vec![60]);
        assert!(signals.iter().all(|s| s.action != SignalAction::Sell));
        assert_relative_eq!(signals[60].strength, (105.0 - 102.0) / 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sma_crossover_downward_cross_sells() {
        let series = step_series(60, 200.0, 20, 100.0).unwrap();
        let generator = SignalGenerator::new(Strategy::from_name("sma_crossover").unwrap());
        let signals = generator.generate(&series);

        let sells: Vec<usize> = signals
            .iter()
            .enumerate()
            .filter(|(_, s)| s.action == SignalAction::Sell)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(sells, vec![60]);
        assert!(signals.iter().all(|s| s.action != SignalAction::Buy));
    }

    #[test]
    fn test_momentum_hold_keeps_indicator_strength() {
        // 14 bars at 100 then 101: momentum 0.01 is inside the thresholds,
        // so the bar holds but still carries the magnitude
        let mut closes = vec![100.0; 14];
        closes.push(101.0);
        let series = series_from_closes(&closes).unwrap();
        let generator = SignalGenerator::new(Strategy::from_name("momentum").unwrap());
        let signals = generator.generate(&series);

        let last = signals.last().unwrap();
        assert_eq!(last.action, SignalAction::Hold);
        assert_relative_eq!(last.strength, 0.01, epsilon = 1e-12);
        // Warmup bars stay at zero strength
        assert!(signals[..14].iter().all(|s| s.strength == 0.0));
    }

    #[test]
    fn test_sma_crossover_hold_keeps_spread_strength() {
        // Bar 61 is one past the cross: SMA20 = 110, SMA50 = 104, no new
        // cross, but the spread over the close is still reported
        let series = step_series(60, 100.0, 20, 200.0).unwrap();
        let generator = SignalGenerator::new(Strategy::from_name("sma_crossover").unwrap());
        let signals = generator.generate(&series);

        assert_eq!(signals[61].action, SignalAction::Hold);
        assert_relative_eq!(
            signals[61].strength,
            (110.0 - 104.0) / 200.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_latest_equals_last_generated() {
        let series = trending_series(80, 50.0, 0.008).unwrap();
        for strategy in Strategy::all_defaults() {
            let generator = SignalGenerator::new(strategy);
            let signals = generator.generate(&series);
            assert_eq!(generator.latest(&series), *signals.last().unwrap());
        }
    }

    #[test]
    fn test_short_series_degrades_to_hold() {
        let series = trending_series(5, 100.0, 0.03).unwrap();
        for strategy in Strategy::all_defaults() {
            let signals = SignalGenerator::new(strategy).generate(&series);
            assert_eq!(signals.len(), 5);
            assert!(signals.iter().all(|s| s.action == SignalAction::Hold));
        }
    }
}
