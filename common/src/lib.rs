pub mod config;
pub mod error;
pub mod types;

pub use config::{MomentumParams, RsiParams, SmaCrossoverParams, Strategy};
pub use error::{EngineError, Result};
pub use types::*;
