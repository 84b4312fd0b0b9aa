use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::{future_value_lumpsum, quotient, total};
use crate::types::{
    pct_to_rate, rate_to_pct, with_metadata, ComputationOutput, Money, Percent, Rate, Years,
};
use crate::validation;
use crate::FinCalcResult;

/// One holding in the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub investment_amount: Money,
    /// Expected annual return, percent.
    pub expected_return_rate: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedReturnsInput {
    pub years: Years,
    pub assets: Vec<AssetInput>,
}

/// Per-asset projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub investment_amount: Money,
    /// Share of total invested (0..1).
    pub weight: Rate,
    pub expected_return_rate: Percent,
    pub future_value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedReturnsOutput {
    /// Σ of each asset compounded at its own rate.
    pub future_value: Money,
    /// Single annual rate, percent, that grows total_invested into
    /// future_value over the horizon.
    pub weighted_return_rate: Percent,
    pub total_invested: Money,
    /// Σ weight × rate, percent. Informational; understates the blended
    /// rate whenever asset rates differ.
    pub simple_weighted_average_rate: Percent,
    pub assets: Vec<AssetProjection>,
}

/// Blend a portfolio by compounding every asset separately, then back out
/// the one rate that reproduces the blended terminal value:
/// r_w = (FV / invested)^(1/years) - 1.
pub fn calculate_weighted_returns(
    input: &WeightedReturnsInput,
) -> FinCalcResult<ComputationOutput<WeightedReturnsOutput>> {
    let start = Instant::now();

    if input.assets.is_empty() {
        return Err(FinCalcError::InsufficientData(
            "at least one asset is required".into(),
        ));
    }
    validation::horizon("years", input.years)?;
    for (i, asset) in input.assets.iter().enumerate() {
        validation::positive(&format!("assets[{i}].investment_amount"), asset.investment_amount)?;
        validation::rate(&format!("assets[{i}].expected_return_rate"), asset.expected_return_rate)?;
    }

    let total_invested = total(
        input.assets.iter().map(|a| a.investment_amount),
        "total invested",
    )?;

    let mut assets = Vec::with_capacity(input.assets.len());
    let mut future_value = Decimal::ZERO;
    let mut simple_weighted_average_rate = Decimal::ZERO;
    for asset in &input.assets {
        let fv = future_value_lumpsum(
            asset.investment_amount,
            pct_to_rate(asset.expected_return_rate),
            input.years,
        )?;
        let weight = asset.investment_amount / total_invested;
        future_value = total([future_value, fv], "portfolio future value")?;
        simple_weighted_average_rate += weight * asset.expected_return_rate;
        assets.push(AssetProjection {
            label: asset.label.clone(),
            investment_amount: asset.investment_amount,
            weight,
            expected_return_rate: asset.expected_return_rate,
            future_value: fv,
        });
    }

    let growth = quotient(future_value, total_invested, "portfolio growth")?;
    let exponent = Decimal::ONE / Decimal::from(input.years);
    let blended_rate = growth
        .checked_powd(exponent)
        .ok_or_else(|| FinCalcError::DegenerateMath {
            context: format!("{growth}^(1/{}) for the implied rate", input.years),
        })?
        - Decimal::ONE;

    let output = WeightedReturnsOutput {
        future_value,
        weighted_return_rate: rate_to_pct(blended_rate),
        total_invested,
        simple_weighted_average_rate,
        assets,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted returns (per-asset compounding, implied blended rate)",
        &serde_json::json!({
            "years": input.years,
            "assets": input.assets.len(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::compound;
    use rust_decimal_macros::dec;

    fn asset(amount: Decimal, rate: Decimal) -> AssetInput {
        AssetInput {
            label: None,
            investment_amount: amount,
            expected_return_rate: rate,
        }
    }

    #[test]
    fn test_single_asset_rate_is_its_own_rate() {
        let out = calculate_weighted_returns(&WeightedReturnsInput {
            years: 10,
            assets: vec![asset(dec!(100_000), dec!(8))],
        })
        .unwrap()
        .result;
        assert!((out.weighted_return_rate - dec!(8)).abs() < dec!(0.000001));
        assert_eq!(out.assets[0].weight, Decimal::ONE);
    }

    #[test]
    fn test_blended_rate_exceeds_simple_average() {
        let out = calculate_weighted_returns(&WeightedReturnsInput {
            years: 20,
            assets: vec![asset(dec!(50_000), dec!(4)), asset(dec!(50_000), dec!(14))],
        })
        .unwrap()
        .result;
        assert_eq!(out.simple_weighted_average_rate, dec!(9));
        assert!(out.weighted_return_rate > dec!(9));
        assert_eq!(out.total_invested, dec!(100_000));
    }

    #[test]
    fn test_implied_rate_reproduces_future_value() {
        let out = calculate_weighted_returns(&WeightedReturnsInput {
            years: 15,
            assets: vec![
                asset(dec!(200_000), dec!(12)),
                asset(dec!(300_000), dec!(7)),
                asset(dec!(100_000), dec!(3.5)),
            ],
        })
        .unwrap()
        .result;
        let rebuilt = out.total_invested
            * compound(pct_to_rate(out.weighted_return_rate), 15).unwrap();
        let rel = ((rebuilt - out.future_value) / out.future_value).abs();
        assert!(rel < dec!(0.000001), "rebuilt={rebuilt} fv={}", out.future_value);
    }

    #[test]
    fn test_empty_assets_rejected() {
        let err = calculate_weighted_returns(&WeightedReturnsInput {
            years: 5,
            assets: vec![],
        })
        .unwrap_err();
        assert!(matches!(err, FinCalcError::InsufficientData(_)));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = calculate_weighted_returns(&WeightedReturnsInput {
            years: 5,
            assets: vec![asset(Decimal::ZERO, dec!(5))],
        })
        .unwrap_err();
        assert!(err.to_string().contains("assets[0].investment_amount"));
    }
}
