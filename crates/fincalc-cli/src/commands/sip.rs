use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::sip::delay::{self, SipDelayInput};
use fincalc_core::sip::growth::{self, SipGrowthInput};
use fincalc_core::sip::need::{self, SipNeedInput};

use super::timing;
use crate::input::{self, required};

/// Arguments for SIP growth projection
#[derive(Args)]
pub struct SipGrowthArgs {
    /// Monthly contribution in the first year
    #[arg(long)]
    pub monthly_contribution: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return, percent
    #[arg(long)]
    pub expected_return_rate: Option<Decimal>,

    /// Yearly step-up of the contribution, percent
    #[arg(long, default_value = "0")]
    pub contribution_growth_rate: Decimal,

    /// Contribute at the start of each month instead of the end
    #[arg(long)]
    pub beginning: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for solving the SIP that reaches a target
#[derive(Args)]
pub struct SipNeedArgs {
    /// Target amount (today's money when --inflation-rate is set)
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return, percent
    #[arg(long)]
    pub expected_return_rate: Option<Decimal>,

    /// Inflation applied to the target, percent
    #[arg(long, default_value = "0")]
    pub inflation_rate: Decimal,

    /// Yearly step-up of the contribution, percent
    #[arg(long, default_value = "0")]
    pub contribution_growth_rate: Decimal,

    /// Contribute at the start of each month instead of the end
    #[arg(long)]
    pub beginning: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the cost of delaying a SIP
#[derive(Args)]
pub struct SipDelayArgs {
    /// Monthly contribution
    #[arg(long)]
    pub monthly_contribution: Option<Decimal>,

    /// Investment horizon in years, measured from today
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return, percent
    #[arg(long)]
    pub expected_return_rate: Option<Decimal>,

    /// Months by which the first contribution is postponed
    #[arg(long)]
    pub delay_months: Option<u32>,

    /// Contribute at the start of each month instead of the end
    #[arg(long)]
    pub beginning: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip_growth(args: SipGrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipGrowthInput = input::load(args.input.as_deref(), || {
        Ok(SipGrowthInput {
            monthly_contribution: required(args.monthly_contribution, "monthly-contribution")?,
            years: required(args.years, "years")?,
            expected_return_rate: required(args.expected_return_rate, "expected-return-rate")?,
            contribution_growth_rate: args.contribution_growth_rate,
            contribution_timing: timing(args.beginning),
        })
    })?;
    let result = growth::calculate_sip_growth(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sip_need(args: SipNeedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipNeedInput = input::load(args.input.as_deref(), || {
        Ok(SipNeedInput {
            target_amount: required(args.target_amount, "target-amount")?,
            years: required(args.years, "years")?,
            expected_return_rate: required(args.expected_return_rate, "expected-return-rate")?,
            inflation_rate: args.inflation_rate,
            contribution_growth_rate: args.contribution_growth_rate,
            contribution_timing: timing(args.beginning),
        })
    })?;
    let result = need::calculate_sip_need(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sip_delay(args: SipDelayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipDelayInput = input::load(args.input.as_deref(), || {
        Ok(SipDelayInput {
            monthly_contribution: required(args.monthly_contribution, "monthly-contribution")?,
            years: required(args.years, "years")?,
            expected_return_rate: required(args.expected_return_rate, "expected-return-rate")?,
            delay_months: required(args.delay_months, "delay-months")?,
            contribution_timing: timing(args.beginning),
        })
    })?;
    let result = delay::calculate_sip_delay(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}
