use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinCalcError;
use crate::types::{ContributionTiming, Money, Rate};
use crate::FinCalcResult;

/// Two growth bases closer than this are treated as equal and the
/// L'Hôpital limit of the growing-annuity sum is used instead.
const DEGENERATE_EPSILON: Decimal = dec!(0.000000000000000001);

fn out_of_range(context: &str) -> FinCalcError {
    FinCalcError::DegenerateMath {
        context: format!("{context} exceeds the decimal range"),
    }
}

/// `a × b`, reporting overflow instead of panicking.
pub fn product(a: Decimal, b: Decimal, context: &str) -> FinCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| out_of_range(context))
}

/// `a / b`; a zero divisor or an overflowing quotient is an error.
pub fn quotient(a: Decimal, b: Decimal, context: &str) -> FinCalcResult<Decimal> {
    a.checked_div(b).ok_or_else(|| FinCalcError::DegenerateMath {
        context: format!("{context}: cannot divide {a} by {b}"),
    })
}

/// Overflow-checked sum of a sequence of amounts.
pub fn total<I>(values: I, context: &str) -> FinCalcResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| out_of_range(context))
    })
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> FinCalcResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| FinCalcError::DegenerateMath {
                context: format!("compounding (1 + {rate})^{n} overflows"),
            })?;
    }
    Ok(result)
}

/// Future value of a lump sum: FV = PV * (1 + r)^n
pub fn future_value_lumpsum(present_value: Money, rate: Rate, years: u32) -> FinCalcResult<Money> {
    product(present_value, compound(rate, years)?, "lump-sum future value")
}

/// Present value of a future amount: PV = FV / (1 + r)^n
pub fn present_value_lumpsum(future_value: Money, rate: Rate, years: u32) -> FinCalcResult<Money> {
    quotient(future_value, compound(rate, years)?, "present value discount factor")
}

/// Level annuity accumulation factor: ((1+r)^n - 1) / r, or n when r = 0.
pub fn level_annuity_factor(rate: Rate, n: u32) -> FinCalcResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::from(n));
    }
    quotient(compound(rate, n)? - Decimal::ONE, rate, "level annuity factor")
}

/// Sum of a growing geometric series Σ_{k=0}^{n-1} g^k · b^(n-1-k) where
/// `b` is the per-period accumulation base and `g` the per-period growth base.
///
/// Closed form (b^n - g^n) / (b - g); when b == g the limit n · b^(n-1).
fn growing_series(accumulation_base: Decimal, growth_base: Decimal, n: u32) -> FinCalcResult<Decimal> {
    if n == 0 {
        return Ok(Decimal::ZERO);
    }
    let diff = accumulation_base - growth_base;
    if diff.abs() < DEGENERATE_EPSILON {
        let limit = compound(accumulation_base - Decimal::ONE, n - 1)?;
        return product(Decimal::from(n), limit, "growing annuity limit");
    }
    let b_n = compound(accumulation_base - Decimal::ONE, n)?;
    let g_n = compound(growth_base - Decimal::ONE, n)?;
    quotient(b_n - g_n, diff, "growing annuity series")
}

/// Future value factor of a growing annuity with one payment per period:
/// FV = pmt · [((1+r)^n - (1+g)^n) / (r - g)], falling back to
/// pmt · n · (1+r)^(n-1) when r == g.
pub fn growing_annuity_factor(rate: Rate, growth: Rate, n: u32) -> FinCalcResult<Decimal> {
    growing_series(Decimal::ONE + rate, Decimal::ONE + growth, n)
}

/// Future value factor of a monthly contribution that steps up by
/// `annual_growth` once every 12 months.
///
/// Full years are accumulated as a growing annuity with yearly periods
/// (accumulation base (1+r)^12, each year worth an ordinary 12-month
/// annuity); any trailing partial year is added at the last step-up level.
pub fn stepped_sip_factor(
    monthly_rate: Rate,
    months: u32,
    annual_growth: Rate,
    timing: ContributionTiming,
) -> FinCalcResult<Decimal> {
    let full_years = months / 12;
    let remainder = months % 12;

    let year_block = level_annuity_factor(monthly_rate, 12)?;
    let year_base = compound(monthly_rate, 12)?;
    let growth_base = Decimal::ONE + annual_growth;

    let context = "stepped SIP factor";
    let full = product(year_block, growing_series(year_base, growth_base, full_years)?, context)?;
    let tail_level = compound(annual_growth, full_years)?;
    let mut factor = total(
        [
            product(full, compound(monthly_rate, remainder)?, context)?,
            product(tail_level, level_annuity_factor(monthly_rate, remainder)?, context)?,
        ],
        context,
    )?;

    if timing == ContributionTiming::Beginning {
        factor = product(factor, Decimal::ONE + monthly_rate, context)?;
    }
    Ok(factor)
}

/// Nominal total paid into a monthly contribution stepping up yearly.
pub fn stepped_sip_total(payment: Money, months: u32, annual_growth: Rate) -> FinCalcResult<Money> {
    let full_years = months / 12;
    let remainder = months % 12;
    let context = "total invested";
    let yearly_levels = level_annuity_factor(annual_growth, full_years)?;
    let tail_level = compound(annual_growth, full_years)?;
    let months_paid = total(
        [
            product(dec!(12), yearly_levels, context)?,
            product(Decimal::from(remainder), tail_level, context)?,
        ],
        context,
    )?;
    product(payment, months_paid, context)
}

/// Present value of an annual withdrawal stream growing at `growth`, first
/// payment one period from now:
/// PV = pmt · (1 - ((1+g)/(1+r))^n) / (r - g), or pmt · n / (1+r) when r == g.
pub fn pv_growing_annuity(payment: Money, rate: Rate, growth: Rate, n: u32) -> FinCalcResult<Money> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r <= Decimal::ZERO {
        return Err(FinCalcError::DegenerateMath {
            context: "growing annuity discount base".into(),
        });
    }
    let context = "growing annuity present value";
    if (rate - growth).abs() < DEGENERATE_EPSILON {
        let undiscounted = product(payment, Decimal::from(n), context)?;
        return quotient(undiscounted, one_plus_r, context);
    }
    let g_n = compound(growth, n)?;
    let r_n = compound(rate, n)?;
    let factor = quotient(
        Decimal::ONE - quotient(g_n, r_n, context)?,
        rate - growth,
        context,
    )?;
    product(payment, factor, context)
}

/// Solve `target = payment × factor` for the payment.
pub fn solve_payment(target: Money, factor: Decimal, context: &str) -> FinCalcResult<Money> {
    if factor <= Decimal::ZERO {
        return Err(FinCalcError::DegenerateMath {
            context: format!("{context}: annuity factor is {factor}"),
        });
    }
    quotient(target, factor, context)
}
