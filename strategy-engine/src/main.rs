use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use strategy_engine::engine::compare_strategies;
use strategy_engine::{
    load_file, BacktestEngine, BacktestResult, DataRange, LiveSignalResult, MarketData,
    PriceSeries, Strategy,
};

#[derive(Parser, Debug)]
#[command(name = "strategy-engine")]
#[command(version = "0.1.0")]
#[command(about = "Strategy signal generation and backtesting engine", long_about = None)]
struct Args {
    /// Ticker symbol
    #[arg(short, long, default_value = "AAPL")]
    ticker: String,

    /// Strategy: momentum, sma_crossover or rsi
    #[arg(short, long, default_value = "sma_crossover")]
    strategy: String,

    /// History period for synthetic data (5d, 1mo, 3mo, 6mo, 1y, 2y)
    #[arg(short, long, default_value = "1y")]
    period: String,

    /// Data file path (CSV/JSON). If not provided, uses synthetic data.
    #[arg(short = 'f', long)]
    data_file: Option<PathBuf>,

    /// Initial investment for the backtest
    #[arg(short, long, default_value = "10000")]
    investment: f64,

    /// Momentum lookback override
    #[arg(long)]
    lookback: Option<usize>,

    /// SMA crossover short window override
    #[arg(long)]
    short_window: Option<usize>,

    /// SMA crossover long window override
    #[arg(long)]
    long_window: Option<usize>,

    /// RSI period override
    #[arg(long)]
    rsi_period: Option<usize>,

    /// RSI oversold threshold override
    #[arg(long)]
    oversold: Option<f64>,

    /// RSI overbought threshold override
    #[arg(long)]
    overbought: Option<f64>,

    /// Print a live recommendation for the latest bar instead of a backtest
    #[arg(long)]
    live: bool,

    /// Budget for the live recommendation
    #[arg(long, default_value = "1000")]
    amount: f64,

    /// Run all three strategies against the same series and compare
    #[arg(long)]
    compare: bool,

    /// Initial price for synthetic data
    #[arg(long, default_value = "100.0")]
    initial_price: f64,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text")]
    output: String,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let strategy = build_strategy(&args)?;
    let series = load_series(&args)?;
    eprintln!(
        "Loaded {} bars ({} to {})",
        series.len(),
        series.first().date,
        series.last().date
    );

    let engine = BacktestEngine::new(strategy, args.investment);

    if args.live {
        let live = engine.live_signal(&series, &args.ticker, args.amount)?;
        match args.output.as_str() {
            "json" => print_json(&live, args.pretty)?,
            _ => print_live_report(&live),
        }
        return Ok(());
    }

    if args.compare {
        let results = compare_strategies(&series, &Strategy::all_defaults(), args.investment);
        match args.output.as_str() {
            "json" => {
                let mut map = serde_json::Map::new();
                for (name, result) in &results {
                    let value = match result {
                        Ok(r) => serde_json::to_value(r)?,
                        Err(e) => serde_json::Value::String(e.to_string()),
                    };
                    map.insert(name.to_string(), value);
                }
                print_json(&serde_json::Value::Object(map), args.pretty)?;
            }
            _ => print_comparison_report(&args.ticker, &results),
        }
        return Ok(());
    }

    let result = engine.run(&series)?;
    match args.output.as_str() {
        "json" => print_json(&result, args.pretty)?,
        _ => print_backtest_report(&args.ticker, strategy.name(), &result),
    }

    Ok(())
}

fn build_strategy(args: &Args) -> Result<Strategy> {
    let mut strategy = Strategy::from_name(&args.strategy)?;
    match &mut strategy {
        Strategy::Momentum(params) => {
            if let Some(lookback) = args.lookback {
                params.lookback = lookback;
            }
        }
        Strategy::SmaCrossover(params) => {
            if let Some(short) = args.short_window {
                params.short_window = short;
            }
            if let Some(long) = args.long_window {
                params.long_window = long;
            }
        }
        Strategy::Rsi(params) => {
            if let Some(period) = args.rsi_period {
                params.period = period;
            }
            if let Some(oversold) = args.oversold {
                params.oversold = oversold;
            }
            if let Some(overbought) = args.overbought {
                params.overbought = overbought;
            }
        }
    }
    Ok(strategy)
}

fn load_series(args: &Args) -> Result<PriceSeries> {
    if let Some(path) = &args.data_file {
        eprintln!("Loading data from {path:?}...");
        Ok(load_file(path)?)
    } else {
        eprintln!(
            "Generating synthetic {} data (initial price: ${:.2})...",
            args.period, args.initial_price
        );
        let provider = strategy_engine::data::SyntheticMarketData {
            initial_price: args.initial_price,
        };
        Ok(provider.fetch(&args.ticker, &DataRange::Period(args.period.clone()))?)
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Undefined metrics are rendered explicitly, never as zero
fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "n/a (insufficient data)".to_string(),
    }
}

fn print_backtest_report(ticker: &str, strategy: &str, result: &BacktestResult) {
    println!();
    println!("================================================================");
    println!("  BACKTEST REPORT - {strategy} on {ticker}");
    println!("================================================================");
    println!();
    println!("  Period: {} to {}", result.start_date, result.end_date);
    println!();
    println!("  Initial Investment: ${:>12.2}", result.initial_investment);
    println!("  Final Value:        ${:>12.2}", result.final_value);
    println!("  Total Return:       {:>13.2}%", result.total_return_pct);
    println!(
        "  Annualized Return:  {:>13}",
        fmt_opt(result.annualized_return_pct, 2)
    );
    println!(
        "  Sharpe Ratio:       {:>13}",
        fmt_opt(result.sharpe_ratio, 3)
    );
    println!("  Max Drawdown:       {:>13.2}%", result.max_drawdown_pct);
    println!();
    println!("  Buy Signals:        {:>13}", result.buy_count);
    println!("  Sell Signals:       {:>13}", result.sell_count);
    println!();
    println!("  Buy & Hold Return:  {:>13.2}%", result.buy_hold_return_pct);
    println!("  Outperformance:     {:>13.2}%", result.outperformance_pct);
    println!("================================================================");
}

fn print_live_report(live: &LiveSignalResult) {
    println!();
    println!("================================================================");
    println!("  LIVE SIGNAL - {} on {}", live.strategy, live.ticker);
    println!("================================================================");
    println!();
    println!("  Signal:             {:>13?}", live.signal);
    println!("  Signal Strength:    {:>12.2}%", live.signal_strength * 100.0);
    println!("  Latest Price:       ${:>12.2}", live.latest_price);
    println!();
    println!("  Investment Budget:  ${:>12.2}", live.investment_amount);
    println!("  Recommended Shares: {:>13}", live.recommended_shares);
    println!("  Estimated Cost:     ${:>12.2}", live.estimated_cost);
    println!("================================================================");
}

fn print_comparison_report(
    ticker: &str,
    results: &[(&'static str, strategy_engine::Result<BacktestResult>)],
) {
    println!();
    println!("  STRATEGY COMPARISON - {ticker}");
    println!("  --------------------------------------------------------------");
    println!(
        "  {:<16} {:>12} {:>12} {:>14}",
        "strategy", "return %", "drawdown %", "sharpe"
    );
    for (name, result) in results {
        match result {
            Ok(r) => println!(
                "  {:<16} {:>12.2} {:>12.2} {:>14}",
                name,
                r.total_return_pct,
                r.max_drawdown_pct,
                fmt_opt(r.sharpe_ratio, 3)
            ),
            Err(e) => println!("  {name:<16} failed: {e}"),
        }
    }
}
