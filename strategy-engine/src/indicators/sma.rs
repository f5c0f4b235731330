/// Simple moving average over a sliding window.
///
/// Returns a vector aligned with `prices`; `None` until the window is
/// full (first defined value at index `window - 1`).
pub fn calculate_sma(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = prices.len();
    let mut sma = vec![None; n];

    if window == 0 || n < window {
        return sma;
    }

    let mut sum: f64 = prices[..window].iter().sum();
    sma[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum = sum - prices[i - window] + prices[i];
        sma[i] = Some(sum / window as f64);
    }

    sma
}
