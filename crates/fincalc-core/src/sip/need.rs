use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::sip_future_value;
use crate::time_value::{future_value_lumpsum, quotient, solve_payment, stepped_sip_total};
use crate::types::{
    pct_to_rate, with_metadata, ComputationOutput, ContributionTiming, Money, Multiple, Percent,
    Years,
};
use crate::validation;
use crate::FinCalcResult;

/// Input parameters for solving the SIP that reaches a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipNeedInput {
    /// Target in today's money when `inflation_rate` is set, otherwise the
    /// nominal amount needed at the end of the horizon.
    pub target_amount: Money,
    pub years: Years,
    pub expected_return_rate: Percent,
    #[serde(default)]
    pub inflation_rate: Percent,
    #[serde(default)]
    pub contribution_growth_rate: Percent,
    #[serde(default)]
    pub contribution_timing: ContributionTiming,
}

/// Output of `calculate_sip_need`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipNeedOutput {
    /// Contribution for the first year; later years step up.
    pub required_monthly_contribution: Money,
    pub inflation_adjusted_target: Money,
    pub projected_total_investment: Money,
    /// inflation_adjusted_target / projected_total_investment
    pub growth_multiple: Multiple,
}

/// Solve for the monthly SIP whose future value equals the (inflated) target.
pub fn calculate_sip_need(input: &SipNeedInput) -> FinCalcResult<ComputationOutput<SipNeedOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validation::positive("target_amount", input.target_amount)?;
    validation::horizon("years", input.years)?;
    validation::return_rate("expected_return_rate", input.expected_return_rate)?;
    validation::rate("inflation_rate", input.inflation_rate)?;
    validation::rate("contribution_growth_rate", input.contribution_growth_rate)?;

    tracing::debug!(years = input.years, "solving required SIP");

    let months = input.years * 12;
    let inflation_adjusted_target = future_value_lumpsum(
        input.target_amount,
        pct_to_rate(input.inflation_rate),
        input.years,
    )?;

    // Value of a unit SIP; the payment scales it linearly.
    let unit_value = sip_future_value(
        Decimal::ONE,
        input.expected_return_rate,
        months,
        input.contribution_growth_rate,
        input.contribution_timing,
    )?;
    let required_monthly_contribution =
        solve_payment(inflation_adjusted_target, unit_value, "required SIP")?;

    let projected_total_investment = stepped_sip_total(
        required_monthly_contribution,
        months,
        pct_to_rate(input.contribution_growth_rate),
    )?;
    let growth_multiple = quotient(
        inflation_adjusted_target,
        projected_total_investment,
        "growth multiple",
    )?;

    if input.inflation_rate.is_zero() {
        warnings.push("No inflation applied; target treated as a nominal future amount".into());
    }
    if growth_multiple < dec!(1) {
        warnings.push("Projected investment exceeds the target".into());
    }

    let output = SipNeedOutput {
        required_monthly_contribution,
        inflation_adjusted_target,
        projected_total_investment,
        growth_multiple,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Required SIP (inverse of stepped-SIP future value)",
        &serde_json::json!({
            "years": input.years,
            "expected_return_rate": input.expected_return_rate.to_string(),
            "inflation_rate": input.inflation_rate.to_string(),
            "contribution_growth_rate": input.contribution_growth_rate.to_string(),
            "contribution_timing": input.contribution_timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}
