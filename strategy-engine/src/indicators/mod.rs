pub mod momentum;
pub mod rsi;
pub mod sma;

pub use momentum::calculate_momentum;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
