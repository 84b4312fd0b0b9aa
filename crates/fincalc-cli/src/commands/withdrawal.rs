use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::withdrawal::swp::{self, SwpInput};

use crate::input::{self, required};

/// Arguments for a systematic withdrawal plan
#[derive(Args)]
pub struct SwpArgs {
    /// Corpus at the start of the plan
    #[arg(long)]
    pub initial_corpus: Option<Decimal>,

    /// First monthly withdrawal
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Expected annual return on the remaining corpus, percent
    #[arg(long)]
    pub expected_return_rate: Option<Decimal>,

    /// Step the withdrawal up once a year
    #[arg(long)]
    pub increase_withdrawal: bool,

    /// Size of the yearly step-up, percent
    #[arg(long, default_value = "10")]
    pub yearly_increase_rate: Decimal,

    /// Years the corpus compounds before the first withdrawal
    #[arg(long, default_value = "0")]
    pub start_delay_years: u32,

    /// Plan start date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_swp(args: SwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let swp_input: SwpInput = input::load(args.input.as_deref(), || {
        Ok(SwpInput {
            initial_corpus: required(args.initial_corpus, "initial-corpus")?,
            monthly_withdrawal: required(args.monthly_withdrawal, "monthly-withdrawal")?,
            expected_return_rate: required(args.expected_return_rate, "expected-return-rate")?,
            increase_withdrawal: args.increase_withdrawal,
            yearly_increase_rate: args.yearly_increase_rate,
            start_delay_years: args.start_delay_years,
            start_date: args.start_date,
        })
    })?;
    let result = swp::simulate_swp(&swp_input)?;
    Ok(serde_json::to_value(result)?)
}
