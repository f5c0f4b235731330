/// Price momentum: fractional change of the close over a trailing lookback.
///
/// `momentum[i] = prices[i] / prices[i - lookback] - 1`, `None` for bars
/// with fewer than `lookback` predecessors or a zero base price.
pub fn calculate_momentum(prices: &[f64], lookback: usize) -> Vec<Option<f64>> {
    let n = prices.len();
    let mut momentum = vec![None; n];

    if lookback == 0 || n <= lookback {
        return momentum;
    }

    for i in lookback..n {
        let base = prices[i - lookback];
        if base != 0.0 {
            momentum[i] = Some(prices[i] / base - 1.0);
        }
    }

    momentum
}
