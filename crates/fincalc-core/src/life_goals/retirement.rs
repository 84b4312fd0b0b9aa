use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{required_contributions, FundingStatus};
use crate::error::FinCalcError;
use crate::time_value::{future_value_lumpsum, product, pv_growing_annuity};
use crate::types::{
    pct_to_rate, with_metadata, ComputationOutput, ContributionTiming, Money, Percent, Years,
};
use crate::validation;
use crate::FinCalcResult;

/// Years of retirement assumed when no life expectancy is supplied.
pub const DEFAULT_RETIREMENT_YEARS: u32 = 25;

/// Oldest age accepted for any of the age inputs.
pub const MAX_AGE: u32 = 150;

/// Ceiling on the default post-retirement return, in percent.
pub const DEFAULT_POST_RETIREMENT_RETURN_CAP: Percent = dec!(8);

fn default_inflation_rate() -> Percent {
    dec!(6)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for retirement corpus planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub present_age: u32,
    pub retirement_age: u32,
    /// Current monthly living expenses, in today's money.
    pub monthly_expenses: Money,
    /// Pre-retirement inflation, percent.
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: Percent,
    /// Expected annual return while accumulating, percent.
    pub expected_return_rate: Percent,
    #[serde(default)]
    pub contribution_growth_rate: Percent,
    #[serde(default)]
    pub existing_corpus: Money,
    #[serde(default)]
    pub contribution_timing: ContributionTiming,
    /// Age to which withdrawals must last; defaults to retirement_age + 25.
    #[serde(default)]
    pub life_expectancy: Option<u32>,
    /// Return earned on the corpus after retiring; defaults to
    /// min(expected_return_rate, 8).
    #[serde(default)]
    pub post_retirement_return_rate: Option<Percent>,
    /// Yearly growth of withdrawals after retiring; defaults to inflation_rate.
    #[serde(default)]
    pub post_retirement_inflation_rate: Option<Percent>,
}

/// Output of `plan_retirement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub years_to_retirement: Years,
    pub years_in_retirement: Years,
    pub monthly_expenses_at_retirement: Money,
    pub annual_expenses_at_retirement: Money,
    /// Corpus needed on the retirement date to fund every withdrawal.
    pub required_corpus: Money,
    pub required_monthly_contribution: Money,
    pub required_yearly_contribution: Money,
    pub required_one_time_contribution: Money,
    pub future_value_existing: Money,
    /// `required_corpus - future_value_existing`; positive means still
    /// needed, negative means surplus.
    pub shortfall_or_surplus: Money,
    pub funding_status: FundingStatus,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Size the retirement corpus and the contributions needed to build it.
///
/// Expenses are inflated to the retirement date; the corpus is the present
/// value, at the post-retirement return, of annual withdrawals that keep
/// growing with post-retirement inflation until life expectancy.
pub fn plan_retirement(
    input: &RetirementInput,
) -> FinCalcResult<ComputationOutput<RetirementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    for (field, age) in [
        ("present_age", Some(input.present_age)),
        ("retirement_age", Some(input.retirement_age)),
        ("life_expectancy", input.life_expectancy),
    ] {
        if age.is_some_and(|a| a > MAX_AGE) {
            return Err(FinCalcError::InvalidRange {
                field: field.into(),
                reason: format!("age must not exceed {MAX_AGE}"),
            });
        }
    }
    if input.retirement_age <= input.present_age {
        return Err(FinCalcError::InvalidRange {
            field: "retirement_age".into(),
            reason: "retirement_age must be greater than present_age".into(),
        });
    }
    let years_to_retirement = input.retirement_age - input.present_age;
    validation::horizon("retirement_age", years_to_retirement)?;

    let life_expectancy = input
        .life_expectancy
        .unwrap_or(input.retirement_age + DEFAULT_RETIREMENT_YEARS);
    if life_expectancy <= input.retirement_age {
        return Err(FinCalcError::InvalidRange {
            field: "life_expectancy".into(),
            reason: "life_expectancy must be greater than retirement_age".into(),
        });
    }
    let years_in_retirement = life_expectancy - input.retirement_age;
    validation::horizon("life_expectancy", years_in_retirement)?;

    validation::non_negative("monthly_expenses", input.monthly_expenses)?;
    validation::non_negative("existing_corpus", input.existing_corpus)?;
    validation::rate("inflation_rate", input.inflation_rate)?;
    validation::return_rate("expected_return_rate", input.expected_return_rate)?;
    validation::rate("contribution_growth_rate", input.contribution_growth_rate)?;

    let post_return = input
        .post_retirement_return_rate
        .unwrap_or_else(|| input.expected_return_rate.min(DEFAULT_POST_RETIREMENT_RETURN_CAP));
    let post_inflation = input
        .post_retirement_inflation_rate
        .unwrap_or(input.inflation_rate);
    validation::rate("post_retirement_return_rate", post_return)?;
    validation::rate("post_retirement_inflation_rate", post_inflation)?;

    tracing::debug!(
        years_to_retirement,
        years_in_retirement,
        "planning retirement corpus"
    );

    // ===================================================================
    // Corpus sizing
    // ===================================================================
    let monthly_expenses_at_retirement = future_value_lumpsum(
        input.monthly_expenses,
        pct_to_rate(input.inflation_rate),
        years_to_retirement,
    )?;
    let annual_expenses_at_retirement =
        product(monthly_expenses_at_retirement, dec!(12), "annual expenses")?;

    let required_corpus = pv_growing_annuity(
        annual_expenses_at_retirement,
        pct_to_rate(post_return),
        pct_to_rate(post_inflation),
        years_in_retirement,
    )?;

    if post_return <= post_inflation {
        warnings.push(format!(
            "Post-retirement return ({post_return}%) does not beat post-retirement inflation ({post_inflation}%); corpus is not preserved in real terms"
        ));
    }

    // ===================================================================
    // Funding gap
    // ===================================================================
    let future_value_existing = future_value_lumpsum(
        input.existing_corpus,
        pct_to_rate(input.expected_return_rate),
        years_to_retirement,
    )?;
    let shortfall_or_surplus = required_corpus - future_value_existing;
    let funding_status = FundingStatus::from_gap(shortfall_or_surplus);

    let contributions = required_contributions(
        shortfall_or_surplus,
        years_to_retirement,
        input.expected_return_rate,
        input.contribution_growth_rate,
        input.contribution_timing,
    )?;

    if funding_status == FundingStatus::Surplus {
        warnings.push(format!(
            "Existing investments are projected to exceed the required corpus by {}",
            (-shortfall_or_surplus).round_dp(2)
        ));
    }

    let output = RetirementOutput {
        years_to_retirement,
        years_in_retirement,
        monthly_expenses_at_retirement,
        annual_expenses_at_retirement,
        required_corpus,
        required_monthly_contribution: contributions.monthly,
        required_yearly_contribution: contributions.yearly,
        required_one_time_contribution: contributions.one_time,
        future_value_existing,
        shortfall_or_surplus,
        funding_status,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Retirement corpus (growing-annuity PV of withdrawals, stepped-SIP funding solve)",
        &serde_json::json!({
            "present_age": input.present_age,
            "retirement_age": input.retirement_age,
            "life_expectancy": life_expectancy,
            "inflation_rate": input.inflation_rate.to_string(),
            "expected_return_rate": input.expected_return_rate.to_string(),
            "post_retirement_return_rate": post_return.to_string(),
            "post_retirement_inflation_rate": post_inflation.to_string(),
            "contribution_growth_rate": input.contribution_growth_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
