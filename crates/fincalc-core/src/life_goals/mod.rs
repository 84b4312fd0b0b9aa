pub mod goal;
pub mod retirement;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{
    growing_annuity_factor, present_value_lumpsum, product, solve_payment, stepped_sip_factor,
};
use crate::types::{monthly_rate, pct_to_rate, ContributionTiming, Money, Percent, Years};
use crate::FinCalcResult;

/// Whether the existing corpus covers the target.
///
/// Derived from `shortfall_or_surplus = target - future_value_existing`:
/// positive is a shortfall, negative a surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStatus {
    Shortfall,
    Funded,
    Surplus,
}

impl FundingStatus {
    pub fn from_gap(shortfall_or_surplus: Money) -> Self {
        if shortfall_or_surplus > Decimal::ZERO {
            FundingStatus::Shortfall
        } else if shortfall_or_surplus < Decimal::ZERO {
            FundingStatus::Surplus
        } else {
            FundingStatus::Funded
        }
    }
}

/// Contributions that close a funding gap, each on its own schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredContributions {
    pub monthly: Money,
    pub yearly: Money,
    pub one_time: Money,
}

impl RequiredContributions {
    fn none() -> Self {
        RequiredContributions {
            monthly: Decimal::ZERO,
            yearly: Decimal::ZERO,
            one_time: Decimal::ZERO,
        }
    }
}

/// Solve for the monthly, yearly and one-time contributions whose future
/// value after `years` equals `gap`. A non-positive gap needs nothing.
pub(crate) fn required_contributions(
    gap: Money,
    years: Years,
    expected_return_rate: Percent,
    contribution_growth_rate: Percent,
    timing: ContributionTiming,
) -> FinCalcResult<RequiredContributions> {
    if gap <= Decimal::ZERO {
        return Ok(RequiredContributions::none());
    }

    let growth = pct_to_rate(contribution_growth_rate);
    let annual = pct_to_rate(expected_return_rate);

    let monthly_factor =
        stepped_sip_factor(monthly_rate(expected_return_rate), years * 12, growth, timing)?;
    let monthly = solve_payment(gap, monthly_factor, "monthly contribution")?;

    let mut yearly_factor = growing_annuity_factor(annual, growth, years)?;
    if timing == ContributionTiming::Beginning {
        yearly_factor = product(yearly_factor, Decimal::ONE + annual, "yearly contribution")?;
    }
    let yearly = solve_payment(gap, yearly_factor, "yearly contribution")?;

    let one_time = present_value_lumpsum(gap, annual, years)?;

    Ok(RequiredContributions {
        monthly,
        yearly,
        one_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_funding_status_sign_convention() {
        assert_eq!(FundingStatus::from_gap(dec!(10)), FundingStatus::Shortfall);
        assert_eq!(FundingStatus::from_gap(dec!(-10)), FundingStatus::Surplus);
        assert_eq!(FundingStatus::from_gap(Decimal::ZERO), FundingStatus::Funded);
    }

    #[test]
    fn test_no_contributions_for_surplus() {
        let c = required_contributions(dec!(-5), 10, dec!(12), Decimal::ZERO, ContributionTiming::End)
            .unwrap();
        assert_eq!(c, RequiredContributions::none());
    }

    #[test]
    fn test_yearly_contribution_level_annuity() {
        // 1000 target, 1 year at 10%: one payment at year end of 1000
        let c = required_contributions(dec!(1000), 1, dec!(10), Decimal::ZERO, ContributionTiming::End)
            .unwrap();
        assert_eq!(c.yearly, dec!(1000));
        assert!((c.one_time - dec!(909.0909)).abs() < dec!(0.001));
    }
}
