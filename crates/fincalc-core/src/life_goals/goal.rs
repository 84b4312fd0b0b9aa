use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{required_contributions, FundingStatus};
use crate::time_value::future_value_lumpsum;
use crate::types::{
    pct_to_rate, with_metadata, ComputationOutput, ContributionTiming, Money, Percent, Years,
};
use crate::validation;
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The life event a lump-sum goal is saving towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Education,
    Marriage,
    #[default]
    Other,
}

impl GoalKind {
    /// Inflation assumed when the caller leaves `inflation_rate` unset.
    pub fn default_inflation_rate(self) -> Percent {
        match self {
            GoalKind::Education => dec!(10),
            GoalKind::Marriage | GoalKind::Other => dec!(8),
        }
    }

    fn label(self) -> &'static str {
        match self {
            GoalKind::Education => "Education",
            GoalKind::Marriage => "Marriage",
            GoalKind::Other => "Other goal",
        }
    }
}

/// Input parameters for an education, marriage or other lump-sum goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    #[serde(default)]
    pub goal_kind: GoalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_name: Option<String>,
    /// Years until the money is needed.
    pub years: Years,
    /// What the goal would cost if paid today.
    pub cost_today: Money,
    /// Annual inflation in percent; defaults per `goal_kind`.
    #[serde(default)]
    pub inflation_rate: Option<Percent>,
    /// Expected annual return on savings, in percent.
    pub expected_return_rate: Percent,
    /// Yearly step-up of the contribution, in percent.
    #[serde(default)]
    pub contribution_growth_rate: Percent,
    #[serde(default)]
    pub existing_corpus: Money,
    #[serde(default)]
    pub contribution_timing: ContributionTiming,
}

/// Output of `plan_goal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalOutput {
    /// Inflation-adjusted cost at the end of the horizon.
    pub target_amount: Money,
    pub required_monthly_contribution: Money,
    pub required_yearly_contribution: Money,
    pub required_one_time_contribution: Money,
    pub future_value_existing: Money,
    /// `target_amount - future_value_existing`; positive means still needed,
    /// negative means surplus.
    pub shortfall_or_surplus: Money,
    pub funding_status: FundingStatus,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Size a lump-sum goal and the contributions needed to fund it.
pub fn plan_goal(input: &GoalInput) -> FinCalcResult<ComputationOutput<GoalOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let inflation_rate = input
        .inflation_rate
        .unwrap_or_else(|| input.goal_kind.default_inflation_rate());

    validation::horizon("years", input.years)?;
    validation::non_negative("cost_today", input.cost_today)?;
    validation::non_negative("existing_corpus", input.existing_corpus)?;
    validation::rate("inflation_rate", inflation_rate)?;
    validation::return_rate("expected_return_rate", input.expected_return_rate)?;
    validation::rate("contribution_growth_rate", input.contribution_growth_rate)?;

    tracing::debug!(kind = ?input.goal_kind, years = input.years, "planning goal");

    let target_amount =
        future_value_lumpsum(input.cost_today, pct_to_rate(inflation_rate), input.years)?;
    let future_value_existing = future_value_lumpsum(
        input.existing_corpus,
        pct_to_rate(input.expected_return_rate),
        input.years,
    )?;
    let shortfall_or_surplus = target_amount - future_value_existing;
    let funding_status = FundingStatus::from_gap(shortfall_or_surplus);

    let contributions = required_contributions(
        shortfall_or_surplus,
        input.years,
        input.expected_return_rate,
        input.contribution_growth_rate,
        input.contribution_timing,
    )?;

    if funding_status == FundingStatus::Surplus {
        warnings.push(format!(
            "Existing corpus is projected to exceed the target by {}; no further contributions needed",
            (-shortfall_or_surplus).round_dp(2)
        ));
    }
    if input.expected_return_rate < inflation_rate {
        warnings.push("Expected return is below goal inflation; real returns are negative".into());
    }

    let output = GoalOutput {
        target_amount,
        required_monthly_contribution: contributions.monthly,
        required_yearly_contribution: contributions.yearly,
        required_one_time_contribution: contributions.one_time,
        future_value_existing,
        shortfall_or_surplus,
        funding_status,
    };

    let methodology = format!(
        "{} goal: inflation-adjusted target, stepped-SIP annuity solve",
        input.goal_kind.label()
    );
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &methodology,
        &serde_json::json!({
            "goal_kind": input.goal_kind,
            "goal_name": input.goal_name,
            "years": input.years,
            "inflation_rate": inflation_rate.to_string(),
            "expected_return_rate": input.expected_return_rate.to_string(),
            "contribution_growth_rate": input.contribution_growth_rate.to_string(),
            "contribution_timing": input.contribution_timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
