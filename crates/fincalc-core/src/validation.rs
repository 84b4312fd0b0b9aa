use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinCalcError;
use crate::types::Percent;
use crate::FinCalcResult;

/// Longest horizon any calculator accepts, in years.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Largest annual percentage accepted for any rate input.
pub const MAX_RATE_PCT: Decimal = dec!(100);

fn invalid(field: &str, reason: impl Into<String>) -> FinCalcError {
    FinCalcError::InvalidRange {
        field: field.into(),
        reason: reason.into(),
    }
}

pub(crate) fn horizon(field: &str, years: u32) -> FinCalcResult<()> {
    if years == 0 {
        return Err(invalid(field, "horizon must be at least 1 year"));
    }
    if years > MAX_HORIZON_YEARS {
        return Err(invalid(
            field,
            format!("horizon must not exceed {MAX_HORIZON_YEARS} years"),
        ));
    }
    Ok(())
}

pub(crate) fn non_negative(field: &str, value: Decimal) -> FinCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn positive(field: &str, value: Decimal) -> FinCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, "must be > 0"));
    }
    Ok(())
}

/// Rate that the annuity formulas divide by: must be strictly positive.
pub(crate) fn return_rate(field: &str, pct: Percent) -> FinCalcResult<()> {
    positive(field, pct)?;
    rate_ceiling(field, pct)
}

/// Rate that may be zero (inflation, growth, discounting).
pub(crate) fn rate(field: &str, pct: Percent) -> FinCalcResult<()> {
    non_negative(field, pct)?;
    rate_ceiling(field, pct)
}

fn rate_ceiling(field: &str, pct: Percent) -> FinCalcResult<()> {
    if pct > MAX_RATE_PCT {
        return Err(invalid(field, format!("must not exceed {MAX_RATE_PCT}%")));
    }
    Ok(())
}
