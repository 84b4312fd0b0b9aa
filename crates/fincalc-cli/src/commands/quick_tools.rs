use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::quick_tools::cash_flows::{self, CashFlowEntry, IrregularCashFlowInput};
use fincalc_core::quick_tools::single_amount::{self, SingleAmountInput};
use fincalc_core::quick_tools::weighted_returns::{self, AssetInput, WeightedReturnsInput};
use fincalc_core::ValuationMode;

use crate::input::{self, required};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Discount to today
    Pv,
    /// Compound forward
    Fv,
}

impl From<ModeArg> for ValuationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pv => ValuationMode::PresentValue,
            ModeArg::Fv => ValuationMode::FutureValue,
        }
    }
}

/// Arguments for a single-amount PV/FV conversion
#[derive(Args)]
pub struct SingleAmountArgs {
    /// Direction of the conversion
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Amount to convert
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Years between today and the future date
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual rate, percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for irregular cash-flow valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CashFlowsArgs {
    /// Valuation direction
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Cash flow as AMOUNT@YEARS, repeatable (negative amounts are outflows)
    #[arg(long = "flow", value_parser = parse_flow)]
    pub flows: Vec<CashFlowEntry>,

    /// Annual discount/compounding rate, percent
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for portfolio weighted returns
#[derive(Args)]
pub struct WeightedReturnsArgs {
    /// Holding period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Asset as AMOUNT@RATE or LABEL=AMOUNT@RATE, repeatable
    #[arg(long = "asset", value_parser = parse_asset)]
    pub assets: Vec<AssetInput>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn split_pair(raw: &str, what: &str) -> Result<(Decimal, String), String> {
    let (left, right) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected {what}, got '{raw}'"))?;
    let value = left
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{left}': {e}"))?;
    Ok((value, right.trim().to_string()))
}

fn parse_flow(raw: &str) -> Result<CashFlowEntry, String> {
    let (amount, years) = split_pair(raw, "AMOUNT@YEARS")?;
    let years = years
        .parse::<u32>()
        .map_err(|e| format!("invalid years '{years}': {e}"))?;
    Ok(CashFlowEntry { amount, years })
}

fn parse_asset(raw: &str) -> Result<AssetInput, String> {
    let (label, rest) = match raw.split_once('=') {
        Some((label, rest)) => (Some(label.trim().to_string()), rest),
        None => (None, raw),
    };
    let (investment_amount, rate) = split_pair(rest, "AMOUNT@RATE")?;
    let expected_return_rate = rate
        .parse::<Decimal>()
        .map_err(|e| format!("invalid rate '{rate}': {e}"))?;
    Ok(AssetInput {
        label,
        investment_amount,
        expected_return_rate,
    })
}

pub fn run_single_amount(args: SingleAmountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sa_input: SingleAmountInput = input::load(args.input.as_deref(), || {
        Ok(SingleAmountInput {
            mode: required(args.mode, "mode")?.into(),
            amount: required(args.amount, "amount")?,
            years: required(args.years, "years")?,
            rate: required(args.rate, "rate")?,
        })
    })?;
    let result = single_amount::calculate_single_amount(&sa_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_flows(args: CashFlowsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cf_input: IrregularCashFlowInput = input::load(args.input.as_deref(), || {
        if args.flows.is_empty() {
            return Err("at least one --flow AMOUNT@YEARS is required (or provide --input)".into());
        }
        Ok(IrregularCashFlowInput {
            mode: required(args.mode, "mode")?.into(),
            cash_flows: args.flows.clone(),
            discount_rate: required(args.discount_rate, "discount-rate")?,
        })
    })?;
    let result = cash_flows::value_cash_flows(&cf_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_weighted_returns(args: WeightedReturnsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let wr_input: WeightedReturnsInput = input::load(args.input.as_deref(), || {
        if args.assets.is_empty() {
            return Err("at least one --asset AMOUNT@RATE is required (or provide --input)".into());
        }
        Ok(WeightedReturnsInput {
            years: required(args.years, "years")?,
            assets: args.assets.clone(),
        })
    })?;
    let result = weighted_returns::calculate_weighted_returns(&wr_input)?;
    Ok(serde_json::to_value(result)?)
}
