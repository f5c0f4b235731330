use chrono::{Duration, NaiveDate};
use rand::Rng;

use common::{EngineError, PriceBar, PriceSeries, Result};

use crate::broker::{DataRange, MarketData};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn bar_on(day: usize, open: f64, close: f64, volume: u64) -> PriceBar {
    PriceBar::new(
        base_date() + Duration::days(day as i64),
        open,
        open.max(close),
        open.min(close),
        close,
        volume,
    )
}

/// Random-walk daily series for demos and smoke testing
pub fn random_walk(days: usize, initial_price: f64) -> Result<PriceSeries> {
    let mut rng = rand::thread_rng();
    let mut bars = Vec::with_capacity(days);

    let daily_volatility = 0.02;
    let drift = 0.0003;

    let mut price = initial_price;
    for day in 0..days {
        let daily_return = drift + daily_volatility * rng.gen_range(-1.0..1.0);
        let close = price * (1.0 + daily_return);

        let base_volume = 5_000_000.0;
        let volume = (base_volume * (1.0 + daily_return.abs() * 10.0)) as u64;

        bars.push(bar_on(day, price, close, volume));
        price = close;
    }

    PriceSeries::new(bars)
}

/// Constant-close series: every indicator window is flat
pub fn flat_series(days: usize, close: f64) -> Result<PriceSeries> {
    series_from_closes(&vec![close; days])
}

/// Fixed compounding trend: `close[i] = initial * (1 + pct_per_bar)^i`
pub fn trending_series(days: usize, initial: f64, pct_per_bar: f64) -> Result<PriceSeries> {
    let mut closes = Vec::with_capacity(days);
    let mut price = initial;
    for _ in 0..days {
        closes.push(price);
        price *= 1.0 + pct_per_bar;
    }
    series_from_closes(&closes)
}

/// Two price plateaus: `first_days` bars at `first_close`, then
/// `second_days` bars at `second_close`. Useful for pinning crossover
/// bars exactly.
pub fn step_series(
    first_days: usize,
    first_close: f64,
    second_days: usize,
    second_close: f64,
) -> Result<PriceSeries> {
    let mut closes = vec![first_close; first_days];
    closes.extend(std::iter::repeat(second_close).take(second_days));
    series_from_closes(&closes)
}

/// Series with the given closes on consecutive dates
pub fn series_from_closes(closes: &[f64]) -> Result<PriceSeries> {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(day, &close)| bar_on(day, close, close, 1_000_000))
        .collect();
    PriceSeries::new(bars)
}

/// Market-data collaborator backed by the random walk, used by the CLI
/// when no data file is supplied
pub struct SyntheticMarketData {
    pub initial_price: f64,
}

impl MarketData for SyntheticMarketData {
    fn fetch(&self, _ticker: &str, range: &DataRange) -> Result<PriceSeries> {
        let days = match range {
            DataRange::Period(token) => period_days(token)?,
            DataRange::Dates { start, end } => {
                let span = (*end - *start).num_days();
                if span < 0 {
                    return Err(EngineError::InvalidParameter(format!(
                        "end date {end} precedes start date {start}"
                    )));
                }
                span as usize + 1
            }
        };
        random_walk(days, self.initial_price)
    }
}

fn period_days(token: &str) -> Result<usize> {
    let days = match token {
        "5d" => 5,
        "1mo" => 30,
        "3mo" => 91,
        "6mo" => 182,
        "1y" => 365,
        "2y" => 730,
        other => {
            return Err(EngineError::DataLoad(format!(
                "Unsupported period token: {other}"
            )))
        }
    };
    Ok(days)
}
