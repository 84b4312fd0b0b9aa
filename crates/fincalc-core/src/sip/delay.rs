use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::sip_future_value;
use crate::types::{with_metadata, ComputationOutput, ContributionTiming, Money, Percent, Years};
use crate::validation;
use crate::FinCalcResult;

/// Input parameters for the cost of starting a SIP late.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipDelayInput {
    pub monthly_contribution: Money,
    pub years: Years,
    pub expected_return_rate: Percent,
    /// Months by which the first contribution is postponed.
    pub delay_months: u32,
    #[serde(default)]
    pub contribution_timing: ContributionTiming,
}

/// Output of `calculate_sip_delay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipDelayOutput {
    pub future_value_without_delay: Money,
    pub future_value_with_delay: Money,
    /// future_value_without_delay - future_value_with_delay
    pub delay_cost: Money,
    pub contribution_months_without_delay: u32,
    pub contribution_months_with_delay: u32,
}

/// Compare a SIP started today with one started `delay_months` later,
/// both valued on the same date at the end of the horizon.
pub fn calculate_sip_delay(
    input: &SipDelayInput,
) -> FinCalcResult<ComputationOutput<SipDelayOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validation::positive("monthly_contribution", input.monthly_contribution)?;
    validation::horizon("years", input.years)?;
    validation::return_rate("expected_return_rate", input.expected_return_rate)?;

    let full_months = input.years * 12;
    let delayed_months = full_months.saturating_sub(input.delay_months);

    tracing::debug!(full_months, delayed_months, "comparing delayed SIP");

    let future_value_without_delay = sip_future_value(
        input.monthly_contribution,
        input.expected_return_rate,
        full_months,
        Decimal::ZERO,
        input.contribution_timing,
    )?;
    let future_value_with_delay = if delayed_months == 0 {
        warnings.push(format!(
            "Delay of {} months covers the whole {}-year horizon; nothing is invested",
            input.delay_months, input.years
        ));
        Decimal::ZERO
    } else {
        sip_future_value(
            input.monthly_contribution,
            input.expected_return_rate,
            delayed_months,
            Decimal::ZERO,
            input.contribution_timing,
        )?
    };
    if input.delay_months == 0 {
        warnings.push("Delay is zero months; both scenarios are identical".into());
    }

    let output = SipDelayOutput {
        future_value_without_delay,
        future_value_with_delay,
        delay_cost: future_value_without_delay - future_value_with_delay,
        contribution_months_without_delay: full_months,
        contribution_months_with_delay: delayed_months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP delay cost (same valuation date, shortened contribution window)",
        &serde_json::json!({
            "years": input.years,
            "delay_months": input.delay_months,
            "expected_return_rate": input.expected_return_rate.to_string(),
            "contribution_timing": input.contribution_timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}
