use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::{future_value_lumpsum, present_value_lumpsum, total};
use crate::types::{pct_to_rate, with_metadata, ComputationOutput, Money, Percent, ValuationMode, Years};
use crate::validation::{self, MAX_HORIZON_YEARS};
use crate::FinCalcResult;

/// A single amount received (positive) or paid (negative) `years` from now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub amount: Money,
    pub years: Years,
}

/// Input for valuing a list of irregular cash flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrregularCashFlowInput {
    pub mode: ValuationMode,
    pub cash_flows: Vec<CashFlowEntry>,
    /// Annual discount/compounding rate, percent.
    pub discount_rate: Percent,
}

/// One entry's contribution to the total, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowValue {
    pub index: usize,
    pub amount: Money,
    pub years: Years,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrregularCashFlowOutput {
    pub total_value: Money,
    pub mode: ValuationMode,
    /// Year all flows are valued at: 0 for present value, the latest offset
    /// for future value.
    pub valuation_year: Years,
    pub flow_values: Vec<FlowValue>,
}

/// Value every flow independently at the shared rate and sum.
///
/// Present value discounts each flow from its own offset to today; future
/// value compounds each flow from its offset to the latest offset.
pub fn value_cash_flows(
    input: &IrregularCashFlowInput,
) -> FinCalcResult<ComputationOutput<IrregularCashFlowOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.cash_flows.is_empty() {
        return Err(FinCalcError::InsufficientData(
            "at least one cash flow is required".into(),
        ));
    }
    validation::rate("discount_rate", input.discount_rate)?;
    for (i, cf) in input.cash_flows.iter().enumerate() {
        if cf.years > MAX_HORIZON_YEARS {
            return Err(FinCalcError::InvalidRange {
                field: format!("cash_flows[{i}].years"),
                reason: format!("offset must not exceed {MAX_HORIZON_YEARS} years"),
            });
        }
    }

    let rate = pct_to_rate(input.discount_rate);
    let valuation_year = match input.mode {
        ValuationMode::PresentValue => 0,
        ValuationMode::FutureValue => input
            .cash_flows
            .iter()
            .map(|cf| cf.years)
            .max()
            .unwrap_or(0),
    };

    let mut flow_values = Vec::with_capacity(input.cash_flows.len());
    for (index, cf) in input.cash_flows.iter().enumerate() {
        let value = match input.mode {
            ValuationMode::PresentValue => present_value_lumpsum(cf.amount, rate, cf.years)?,
            ValuationMode::FutureValue => {
                future_value_lumpsum(cf.amount, rate, valuation_year - cf.years)?
            }
        };
        flow_values.push(FlowValue {
            index,
            amount: cf.amount,
            years: cf.years,
            value,
        });
    }
    let total_value = total(flow_values.iter().map(|f| f.value), "cash flow total")?;

    if total_value < Decimal::ZERO {
        warnings.push("Outflows outweigh inflows; aggregate value is negative".into());
    }

    let output = IrregularCashFlowOutput {
        total_value,
        mode: input.mode,
        valuation_year,
        flow_values,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Irregular cash flows (per-flow annual compounding)",
        &serde_json::json!({
            "mode": input.mode,
            "discount_rate": input.discount_rate.to_string(),
            "flows": input.cash_flows.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flows() -> Vec<CashFlowEntry> {
        vec![
            CashFlowEntry { amount: dec!(110), years: 1 },
            CashFlowEntry { amount: dec!(121), years: 2 },
            CashFlowEntry { amount: dec!(-50), years: 0 },
        ]
    }

    #[test]
    fn test_present_value_discounts_each_flow() {
        let out = value_cash_flows(&IrregularCashFlowInput {
            mode: ValuationMode::PresentValue,
            cash_flows: flows(),
            discount_rate: dec!(10),
        })
        .unwrap()
        .result;
        assert_eq!(out.valuation_year, 0);
        assert_eq!(out.flow_values[0].value, dec!(100));
        assert_eq!(out.flow_values[1].value, dec!(100));
        assert_eq!(out.flow_values[2].value, dec!(-50));
        assert_eq!(out.total_value, dec!(150));
    }

    #[test]
    fn test_future_value_compounds_to_latest_offset() {
        let out = value_cash_flows(&IrregularCashFlowInput {
            mode: ValuationMode::FutureValue,
            cash_flows: flows(),
            discount_rate: dec!(10),
        })
        .unwrap()
        .result;
        assert_eq!(out.valuation_year, 2);
        // 110 × 1.1 + 121 − 50 × 1.21
        assert_eq!(out.total_value, dec!(121) + dec!(121) - dec!(60.5));
    }

    #[test]
    fn test_order_does_not_change_total() {
        let mut reversed = flows();
        reversed.reverse();
        let a = value_cash_flows(&IrregularCashFlowInput {
            mode: ValuationMode::PresentValue,
            cash_flows: flows(),
            discount_rate: dec!(7),
        })
        .unwrap()
        .result;
        let b = value_cash_flows(&IrregularCashFlowInput {
            mode: ValuationMode::PresentValue,
            cash_flows: reversed,
            discount_rate: dec!(7),
        })
        .unwrap()
        .result;
        assert!((a.total_value - b.total_value).abs() < dec!(0.0000001));
        assert_eq!(b.flow_values[0].amount, dec!(-50));
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = value_cash_flows(&IrregularCashFlowInput {
            mode: ValuationMode::PresentValue,
            cash_flows: vec![],
            discount_rate: dec!(7),
        })
        .unwrap_err();
        assert!(matches!(err, FinCalcError::InsufficientData(_)));
    }
}
