/// Relative strength index over a simple rolling mean of gains and losses.
///
/// Deliberately NOT Wilder's exponential smoothing: average gain and
/// average loss are plain window means of the positive and negative daily
/// close changes, `RS = avg_gain / avg_loss`, `RSI = 100 - 100/(1+RS)`.
///
/// Per-bar policy:
/// - fewer than `period` prior changes: `None`
/// - `avg_loss == 0` with `avg_gain > 0`: saturates to `Some(100.0)`
/// - `avg_gain == avg_loss == 0` (flat window): `None`
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = prices.len();
    let mut rsi = vec![None; n];

    if period == 0 || n <= period {
        return rsi;
    }

    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = prices[i] - prices[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    // Rolling window sums over the trailing `period` changes
    let mut gain_sum: f64 = gains[1..=period].iter().sum();
    let mut loss_sum: f64 = losses[1..=period].iter().sum();

    for i in period..n {
        if i > period {
            gain_sum += gains[i] - gains[i - period];
            loss_sum += losses[i] - losses[i - period];
        }

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;

        rsi[i] = if avg_loss == 0.0 {
            if avg_gain > 0.0 {
                Some(100.0)
            } else {
                None
            }
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        };
    }

    rsi
}
