use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{compound, future_value_lumpsum, present_value_lumpsum};
use crate::types::{pct_to_rate, with_metadata, ComputationOutput, Money, Percent, ValuationMode, Years};
use crate::validation;
use crate::FinCalcResult;

/// Input for a single lump-sum PV/FV conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleAmountInput {
    pub mode: ValuationMode,
    /// Today's amount in future_value mode, the future amount in
    /// present_value mode.
    pub amount: Money,
    pub years: Years,
    /// Annual compounding/discount rate, percent.
    pub rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleAmountOutput {
    pub result: Money,
    pub mode: ValuationMode,
    /// (1 + rate)^years
    pub growth_factor: Decimal,
}

/// FV = PV (1+r)^n, or PV = FV / (1+r)^n depending on `mode`.
pub fn calculate_single_amount(
    input: &SingleAmountInput,
) -> FinCalcResult<ComputationOutput<SingleAmountOutput>> {
    let start = Instant::now();

    validation::non_negative("amount", input.amount)?;
    validation::horizon("years", input.years)?;
    validation::rate("rate", input.rate)?;

    let rate = pct_to_rate(input.rate);
    let result = match input.mode {
        ValuationMode::FutureValue => future_value_lumpsum(input.amount, rate, input.years)?,
        ValuationMode::PresentValue => present_value_lumpsum(input.amount, rate, input.years)?,
    };

    let output = SingleAmountOutput {
        result,
        mode: input.mode,
        growth_factor: compound(rate, input.years)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Single amount (annual compounding)",
        &serde_json::json!({
            "mode": input.mode,
            "years": input.years,
            "rate": input.rate.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
