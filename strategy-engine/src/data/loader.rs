use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use common::{EngineError, PriceBar, PriceSeries, Result};

/// Load daily bars from a CSV file.
///
/// Expected columns: date, open, high, low, close, volume. Rows with
/// fewer columns are skipped.
pub fn load_csv(path: &Path) -> Result<PriceSeries> {
    let file = File::open(path).map_err(|e| EngineError::DataLoad(e.to_string()))?;
    read_csv_bars(BufReader::new(file))
}

fn read_csv_bars<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut bars = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(|e| EngineError::Csv(e.to_string()))?;
        if record.len() < 6 {
            continue;
        }

        let date = parse_date(&record[0])?;
        let open = parse_field(&record[1], "open")?;
        let high = parse_field(&record[2], "high")?;
        let low = parse_field(&record[3], "low")?;
        let close = parse_field(&record[4], "close")?;
        let volume: u64 = record[5]
            .trim()
            .parse()
            .map_err(|_| EngineError::Csv(format!("Invalid volume: {}", &record[5])))?;

        bars.push(PriceBar::new(date, open, high, low, close, volume));
    }

    PriceSeries::new(bars)
}

fn parse_field(raw: &str, name: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| EngineError::Csv(format!("Invalid {name} price: {raw}")))
}

/// Load daily bars from a JSON array of bar objects
pub fn load_json(path: &Path) -> Result<PriceSeries> {
    let file = File::open(path).map_err(|e| EngineError::DataLoad(e.to_string()))?;
    let bars: Vec<PriceBar> = serde_json::from_reader(BufReader::new(file))?;
    PriceSeries::new(bars)
}

/// Parse a calendar date from the formats data vendors commonly emit
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for fmt in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    // Timestamped exports: keep the date part
    if let Some((prefix, _)) = s.split_once(&[' ', 'T'][..]) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    Err(EngineError::Csv(format!("Unable to parse date: {s}")))
}
