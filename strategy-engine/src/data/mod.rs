pub mod loader;
pub mod synthetic;

pub use loader::{load_csv, load_json};
pub use synthetic::SyntheticMarketData;

use std::path::Path;

use common::{EngineError, PriceSeries, Result};

/// Load a price series from file, detecting format from the extension
pub fn load_file(path: &Path) -> Result<PriceSeries> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        _ => Err(EngineError::DataLoad(format!(
            "Unsupported file format: {ext}"
        ))),
    }
}
