use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::life_goals::goal::{self, GoalInput, GoalKind};
use fincalc_core::life_goals::retirement::{self, RetirementInput};

use super::timing;
use crate::input::{self, required};

/// Arguments for retirement planning
#[derive(Args)]
pub struct RetirementArgs {
    /// Current age in years
    #[arg(long)]
    pub present_age: Option<u32>,

    /// Age at which withdrawals start
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Current monthly expenses, today's money
    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Pre-retirement inflation, percent
    #[arg(long, default_value = "6")]
    pub inflation_rate: Decimal,

    /// Expected annual return while accumulating, percent
    #[arg(long)]
    pub expected_return_rate: Option<Decimal>,

    /// Yearly step-up of contributions, percent
    #[arg(long, default_value = "0")]
    pub contribution_growth_rate: Decimal,

    /// Savings already set aside
    #[arg(long, default_value = "0")]
    pub existing_corpus: Decimal,

    /// Age to which the corpus must last (default: retirement age + 25)
    #[arg(long)]
    pub life_expectancy: Option<u32>,

    /// Return earned after retiring, percent (default: min(expected, 8))
    #[arg(long)]
    pub post_retirement_return_rate: Option<Decimal>,

    /// Growth of withdrawals after retiring, percent (default: inflation)
    #[arg(long)]
    pub post_retirement_inflation_rate: Option<Decimal>,

    /// Contribute at the start of each period instead of the end
    #[arg(long)]
    pub beginning: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GoalKindArg {
    Education,
    Marriage,
    Other,
}

impl From<GoalKindArg> for GoalKind {
    fn from(kind: GoalKindArg) -> Self {
        match kind {
            GoalKindArg::Education => GoalKind::Education,
            GoalKindArg::Marriage => GoalKind::Marriage,
            GoalKindArg::Other => GoalKind::Other,
        }
    }
}

/// Arguments for a lump-sum goal
#[derive(Args)]
pub struct GoalArgs {
    /// Kind of goal; sets the default inflation
    #[arg(long, value_enum, default_value = "other")]
    pub kind: GoalKindArg,

    /// Free-form goal name, echoed in the assumptions
    #[arg(long)]
    pub name: Option<String>,

    /// Years until the money is needed
    #[arg(long)]
    pub years: Option<u32>,

    /// Cost of the goal in today's money
    #[arg(long)]
    pub cost_today: Option<Decimal>,

    /// Goal inflation, percent (default: 10 education, 8 otherwise)
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,

    /// Expected annual return, percent
    #[arg(long)]
    pub expected_return_rate: Option<Decimal>,

    /// Yearly step-up of contributions, percent
    #[arg(long, default_value = "0")]
    pub contribution_growth_rate: Decimal,

    /// Savings already set aside
    #[arg(long, default_value = "0")]
    pub existing_corpus: Decimal,

    /// Contribute at the start of each period instead of the end
    #[arg(long)]
    pub beginning: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ret_input: RetirementInput = input::load(args.input.as_deref(), || {
        Ok(RetirementInput {
            present_age: required(args.present_age, "present-age")?,
            retirement_age: required(args.retirement_age, "retirement-age")?,
            monthly_expenses: required(args.monthly_expenses, "monthly-expenses")?,
            inflation_rate: args.inflation_rate,
            expected_return_rate: required(args.expected_return_rate, "expected-return-rate")?,
            contribution_growth_rate: args.contribution_growth_rate,
            existing_corpus: args.existing_corpus,
            contribution_timing: timing(args.beginning),
            life_expectancy: args.life_expectancy,
            post_retirement_return_rate: args.post_retirement_return_rate,
            post_retirement_inflation_rate: args.post_retirement_inflation_rate,
        })
    })?;
    let result = retirement::plan_retirement(&ret_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_goal(args: GoalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goal_input: GoalInput = input::load(args.input.as_deref(), || {
        Ok(GoalInput {
            goal_kind: args.kind.into(),
            goal_name: args.name.clone(),
            years: required(args.years, "years")?,
            cost_today: required(args.cost_today, "cost-today")?,
            inflation_rate: args.inflation_rate,
            expected_return_rate: required(args.expected_return_rate, "expected-return-rate")?,
            contribution_growth_rate: args.contribution_growth_rate,
            existing_corpus: args.existing_corpus,
            contribution_timing: timing(args.beginning),
        })
    })?;
    let result = goal::plan_goal(&goal_input)?;
    Ok(serde_json::to_value(result)?)
}
