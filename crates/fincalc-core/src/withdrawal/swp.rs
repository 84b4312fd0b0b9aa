use chrono::{Local, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::total;
use crate::types::{monthly_rate, pct_to_rate, with_metadata, ComputationOutput, Money, Percent, Years};
use crate::validation;
use crate::FinCalcResult;

/// Hard bound on the simulation: 100 years of monthly steps.
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

fn default_yearly_increase_rate() -> Percent {
    dec!(10)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a systematic withdrawal plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpInput {
    pub initial_corpus: Money,
    pub monthly_withdrawal: Money,
    /// Expected annual return on the remaining corpus, percent.
    pub expected_return_rate: Percent,
    /// Step the withdrawal up once every 12 instalments.
    #[serde(default)]
    pub increase_withdrawal: bool,
    /// Size of the yearly step-up, percent; ignored unless
    /// `increase_withdrawal` is set.
    #[serde(default = "default_yearly_increase_rate")]
    pub yearly_increase_rate: Percent,
    /// Years the corpus compounds untouched before the first withdrawal.
    #[serde(default)]
    pub start_delay_years: Years,
    /// Plan start; defaults to today's local date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

/// How the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SwpOutcome {
    /// In `month` the corpus could no longer cover the full withdrawal.
    Depleted { month: u32 },
    /// Still paying at the simulation cap.
    SustainedToCap,
}

/// Output of `simulate_swp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpOutput {
    /// Corpus left when the simulation stopped.
    pub period_end_value: Money,
    pub total_withdrawn: Money,
    pub full_instalments: u32,
    pub last_instalment_date: Option<NaiveDate>,
    pub outcome: SwpOutcome,
    pub months_simulated: u32,
    pub yearly_schedule: Vec<SwpYear>,
}

/// One plan year (possibly partial when the corpus runs out).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpYear {
    pub year: u32,
    pub opening_balance: Money,
    pub growth: Money,
    pub withdrawn: Money,
    pub closing_balance: Money,
    pub instalments: u32,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Simulate a withdrawal plan month by month until the corpus can no longer
/// pay a full instalment or the simulation cap is reached.
pub fn simulate_swp(input: &SwpInput) -> FinCalcResult<ComputationOutput<SwpOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    validation::positive("initial_corpus", input.initial_corpus)?;
    validation::positive("monthly_withdrawal", input.monthly_withdrawal)?;
    validation::rate("expected_return_rate", input.expected_return_rate)?;
    validation::rate("yearly_increase_rate", input.yearly_increase_rate)?;
    let deferral_months = input.start_delay_years.saturating_mul(12);
    if deferral_months >= MAX_SIMULATION_MONTHS {
        return Err(FinCalcError::InvalidRange {
            field: "start_delay_years".into(),
            reason: format!(
                "withdrawals must start within {} years",
                MAX_SIMULATION_MONTHS / 12
            ),
        });
    }

    let start_date = input.start_date.unwrap_or_else(|| Local::now().date_naive());
    let growth_factor = Decimal::ONE + monthly_rate(input.expected_return_rate);
    let step_up = Decimal::ONE + pct_to_rate(input.yearly_increase_rate);

    tracing::debug!(deferral_months, "simulating SWP");

    let overflow = || FinCalcError::DegenerateMath {
        context: "SWP corpus growth overflows".into(),
    };

    let mut corpus = input.initial_corpus;
    let mut withdrawal = input.monthly_withdrawal;
    let mut total_withdrawn = Decimal::ZERO;
    let mut full_instalments: u32 = 0;
    let mut last_instalment_month: Option<u32> = None;
    let mut outcome = SwpOutcome::SustainedToCap;
    let mut month: u32 = 0;

    let mut yearly_schedule: Vec<SwpYear> = Vec::new();
    let mut year = SwpYear {
        year: 1,
        opening_balance: corpus,
        growth: Decimal::ZERO,
        withdrawn: Decimal::ZERO,
        closing_balance: corpus,
        instalments: 0,
    };
    let mut months_in_year: u32 = 0;

    while month < MAX_SIMULATION_MONTHS {
        month += 1;
        months_in_year += 1;

        let grown = corpus.checked_mul(growth_factor).ok_or_else(overflow)?;
        year.growth = total([year.growth, grown - corpus], "SWP yearly growth")?;
        corpus = grown;

        if month > deferral_months {
            if corpus < withdrawal {
                outcome = SwpOutcome::Depleted { month };
                break;
            }
            corpus -= withdrawal;
            total_withdrawn = total([total_withdrawn, withdrawal], "SWP total withdrawn")?;
            year.withdrawn = total([year.withdrawn, withdrawal], "SWP yearly withdrawals")?;
            year.instalments += 1;
            full_instalments += 1;
            last_instalment_month = Some(month);

            if input.increase_withdrawal && full_instalments % 12 == 0 {
                withdrawal = withdrawal.checked_mul(step_up).ok_or_else(overflow)?;
            }
        }

        if month % 12 == 0 {
            year.closing_balance = corpus;
            let next = SwpYear {
                year: year.year + 1,
                opening_balance: corpus,
                growth: Decimal::ZERO,
                withdrawn: Decimal::ZERO,
                closing_balance: corpus,
                instalments: 0,
            };
            yearly_schedule.push(std::mem::replace(&mut year, next));
            months_in_year = 0;
        }
    }
    if months_in_year > 0 {
        year.closing_balance = corpus;
        yearly_schedule.push(year);
    }

    match outcome {
        SwpOutcome::Depleted { month } => {
            tracing::debug!(month, full_instalments, "SWP corpus depleted");
            if full_instalments == 0 {
                warnings.push(
                    "Corpus cannot cover the first withdrawal; no instalment is paid".into(),
                );
            }
        }
        SwpOutcome::SustainedToCap => {
            tracing::debug!(full_instalments, "SWP reached simulation cap");
            warnings.push(format!(
                "Corpus not depleted within {} months ({} years); simulation capped",
                MAX_SIMULATION_MONTHS,
                MAX_SIMULATION_MONTHS / 12
            ));
        }
    }

    let last_instalment_date = last_instalment_month
        .and_then(|m| start_date.checked_add_months(Months::new(m)));

    let output = SwpOutput {
        period_end_value: corpus,
        total_withdrawn,
        full_instalments,
        last_instalment_date,
        outcome,
        months_simulated: month,
        yearly_schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Systematic withdrawal plan (monthly depletion simulation)",
        &serde_json::json!({
            "expected_return_rate": input.expected_return_rate.to_string(),
            "increase_withdrawal": input.increase_withdrawal,
            "yearly_increase_rate": input.yearly_increase_rate.to_string(),
            "start_delay_years": input.start_delay_years,
            "start_date": start_date,
            "max_simulation_months": MAX_SIMULATION_MONTHS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn default_input() -> SwpInput {
        SwpInput {
            initial_corpus: dec!(2_500_000),
            monthly_withdrawal: dec!(10_000),
            expected_return_rate: dec!(8),
            increase_withdrawal: false,
            yearly_increase_rate: dec!(10),
            start_delay_years: 0,
            start_date: Some(start_date()),
        }
    }

    #[test]
    fn test_yield_above_withdrawal_reaches_cap() {
        let out = simulate_swp(&default_input()).unwrap();
        let result = &out.result;
        assert_eq!(result.outcome, SwpOutcome::SustainedToCap);
        assert_eq!(result.full_instalments, MAX_SIMULATION_MONTHS);
        assert_eq!(result.months_simulated, MAX_SIMULATION_MONTHS);
        assert_eq!(result.total_withdrawn, dec!(10_000) * dec!(1200));
        assert!(result.period_end_value > dec!(2_500_000));
        assert_eq!(
            result.last_instalment_date,
            NaiveDate::from_ymd_opt(2125, 1, 1)
        );
        assert!(out.warnings.iter().any(|w| w.contains("capped")));
    }

    #[test]
    fn test_zero_return_depletes_exactly() {
        let mut input = default_input();
        input.initial_corpus = dec!(120_000);
        input.expected_return_rate = Decimal::ZERO;
        let out = simulate_swp(&input).unwrap().result;
        assert_eq!(out.full_instalments, 12);
        assert_eq!(out.outcome, SwpOutcome::Depleted { month: 13 });
        assert_eq!(out.period_end_value, Decimal::ZERO);
        assert_eq!(out.last_instalment_date, NaiveDate::from_ymd_opt(2026, 1, 1));
    }

    #[test]
    fn test_withdrawal_above_corpus_stops_first_month() {
        let mut input = default_input();
        input.initial_corpus = dec!(5_000);
        let out = simulate_swp(&input).unwrap();
        assert_eq!(out.result.full_instalments, 0);
        assert_eq!(out.result.outcome, SwpOutcome::Depleted { month: 1 });
        assert_eq!(out.result.last_instalment_date, None);
        assert_eq!(out.result.total_withdrawn, Decimal::ZERO);
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_step_up_applied_after_twelve_instalments() {
        let mut input = default_input();
        input.initial_corpus = dec!(1_000_000);
        input.expected_return_rate = Decimal::ZERO;
        input.increase_withdrawal = true;
        let out = simulate_swp(&input).unwrap().result;
        // Year 1: 12 × 10,000; year 2: 12 × 11,000
        assert_eq!(out.yearly_schedule[0].withdrawn, dec!(120_000));
        assert_eq!(out.yearly_schedule[1].withdrawn, dec!(132_000));
        assert!(out.full_instalments < 100);
    }

    #[test]
    fn test_increase_rate_ignored_without_flag() {
        let mut input = default_input();
        input.initial_corpus = dec!(240_000);
        input.expected_return_rate = Decimal::ZERO;
        input.yearly_increase_rate = dec!(50);
        let out = simulate_swp(&input).unwrap().result;
        assert_eq!(out.full_instalments, 24);
    }

    #[test]
    fn test_start_delay_grows_corpus_first() {
        let mut input = default_input();
        input.initial_corpus = dec!(100_000);
        input.monthly_withdrawal = dec!(5_000);
        let immediate = simulate_swp(&input).unwrap().result;

        input.start_delay_years = 2;
        let deferred = simulate_swp(&input).unwrap().result;

        assert!(deferred.full_instalments > immediate.full_instalments);
        assert_eq!(deferred.yearly_schedule[0].withdrawn, Decimal::ZERO);
        assert_eq!(deferred.yearly_schedule[1].withdrawn, Decimal::ZERO);
        assert!(deferred.yearly_schedule[2].withdrawn > Decimal::ZERO);
    }

    #[test]
    fn test_schedule_balances_reconcile() {
        let mut input = default_input();
        input.initial_corpus = dec!(500_000);
        input.increase_withdrawal = true;
        let out = simulate_swp(&input).unwrap().result;
        let tol = dec!(0.000001);
        for y in &out.yearly_schedule {
            let expected = y.opening_balance + y.growth - y.withdrawn;
            assert!(
                (y.closing_balance - expected).abs() < tol,
                "year {} closing {} expected {}",
                y.year,
                y.closing_balance,
                expected
            );
        }
        let withdrawn: Decimal = out.yearly_schedule.iter().map(|y| y.withdrawn).sum();
        assert!((withdrawn - out.total_withdrawn).abs() < tol);
        assert_eq!(
            out.yearly_schedule.last().unwrap().closing_balance,
            out.period_end_value
        );
    }

    #[test]
    fn test_higher_withdrawal_never_lasts_longer() {
        let mut input = default_input();
        input.initial_corpus = dec!(1_000_000);
        let mut previous = u32::MAX;
        for w in [5_000, 8_000, 12_000, 20_000, 50_000] {
            input.monthly_withdrawal = Decimal::from(w);
            let n = simulate_swp(&input).unwrap().result.full_instalments;
            assert!(n <= previous, "withdrawal {w} gave {n} > {previous}");
            previous = n;
        }
    }

    #[test]
    fn test_delay_beyond_cap_rejected() {
        let mut input = default_input();
        input.start_delay_years = 100;
        assert!(simulate_swp(&input).is_err());
    }
}
