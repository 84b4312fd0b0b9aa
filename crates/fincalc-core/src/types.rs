use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates as supplied by callers, in percent (12 = 12%).
pub type Percent = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Internal to the engine.
pub type Rate = Decimal;

/// Multiples (e.g., 3.2x growth on invested capital)
pub type Multiple = Decimal;

/// Whole-year horizons
pub type Years = u32;

/// Convert a percentage input into a decimal rate.
pub fn pct_to_rate(pct: Percent) -> Rate {
    pct / dec!(100)
}

/// Convert a decimal rate back into a percentage for output.
pub fn rate_to_pct(rate: Rate) -> Percent {
    rate * dec!(100)
}

/// Monthly rate used for SIP/SWP compounding: annual% / 12 / 100.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / dec!(12) / dec!(100)
}

/// When within a period a recurring contribution is invested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionTiming {
    /// Ordinary annuity: invested at the end of each period.
    #[default]
    End,
    /// Annuity-due: invested at the start of each period.
    Beginning,
}

/// Which side of a lump-sum equation to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMode {
    PresentValue,
    FutureValue,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
