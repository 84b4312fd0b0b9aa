pub mod error;
pub mod time_value;
pub mod types;
mod validation;

#[cfg(feature = "life_goals")]
pub mod life_goals;

#[cfg(feature = "sip")]
pub mod sip;

#[cfg(feature = "withdrawal")]
pub mod withdrawal;

#[cfg(feature = "quick_tools")]
pub mod quick_tools;

pub use error::FinCalcError;
pub use types::*;
pub use validation::{MAX_HORIZON_YEARS, MAX_RATE_PCT};

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
