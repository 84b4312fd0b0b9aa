use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::sip_future_value;
use crate::time_value::{compound, product, quotient, stepped_sip_total};
use crate::types::{
    pct_to_rate, with_metadata, ComputationOutput, ContributionTiming, Money, Multiple, Percent,
    Years,
};
use crate::validation;
use crate::FinCalcResult;

/// Input parameters for projecting a (step-up) SIP forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipGrowthInput {
    pub monthly_contribution: Money,
    pub years: Years,
    pub expected_return_rate: Percent,
    /// Yearly step-up of the monthly contribution, in percent.
    #[serde(default)]
    pub contribution_growth_rate: Percent,
    #[serde(default)]
    pub contribution_timing: ContributionTiming,
}

/// Output of `calculate_sip_growth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipGrowthOutput {
    pub future_value: Money,
    pub total_invested: Money,
    pub wealth_gain: Money,
    /// future_value / total_invested
    pub growth_multiple: Multiple,
    pub yearly_breakdown: Vec<SipYear>,
}

/// Position of the SIP at the end of one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipYear {
    pub year: Years,
    pub monthly_contribution: Money,
    pub invested_to_date: Money,
    pub value_at_year_end: Money,
}

/// Project the future value of a monthly SIP with an optional yearly step-up.
pub fn calculate_sip_growth(
    input: &SipGrowthInput,
) -> FinCalcResult<ComputationOutput<SipGrowthOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validation::positive("monthly_contribution", input.monthly_contribution)?;
    validation::horizon("years", input.years)?;
    validation::return_rate("expected_return_rate", input.expected_return_rate)?;
    validation::rate("contribution_growth_rate", input.contribution_growth_rate)?;

    tracing::debug!(years = input.years, "projecting SIP growth");

    let growth = pct_to_rate(input.contribution_growth_rate);
    let months = input.years * 12;

    let future_value = sip_future_value(
        input.monthly_contribution,
        input.expected_return_rate,
        months,
        input.contribution_growth_rate,
        input.contribution_timing,
    )?;
    let total_invested = stepped_sip_total(input.monthly_contribution, months, growth)?;
    let wealth_gain = future_value - total_invested;
    let growth_multiple = quotient(future_value, total_invested, "growth multiple")?;

    let mut yearly_breakdown = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        yearly_breakdown.push(SipYear {
            year,
            monthly_contribution: product(
                input.monthly_contribution,
                compound(growth, year - 1)?,
                "stepped contribution",
            )?,
            invested_to_date: stepped_sip_total(input.monthly_contribution, year * 12, growth)?,
            value_at_year_end: sip_future_value(
                input.monthly_contribution,
                input.expected_return_rate,
                year * 12,
                input.contribution_growth_rate,
                input.contribution_timing,
            )?,
        });
    }

    if growth_multiple < dec!(1.5) && input.years >= 10 {
        warnings.push(format!(
            "Growth multiple of {:.2}x over {} years is low; check the expected return",
            growth_multiple, input.years
        ));
    }

    let output = SipGrowthOutput {
        future_value,
        total_invested,
        wealth_gain,
        growth_multiple,
        yearly_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP future value (monthly compounding, yearly step-up)",
        &serde_json::json!({
            "years": input.years,
            "expected_return_rate": input.expected_return_rate.to_string(),
            "contribution_growth_rate": input.contribution_growth_rate.to_string(),
            "contribution_timing": input.contribution_timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}
