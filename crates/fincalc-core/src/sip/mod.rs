pub mod delay;
pub mod growth;
pub mod need;

use crate::time_value::{product, stepped_sip_factor};
use crate::types::{monthly_rate, pct_to_rate, ContributionTiming, Money, Percent};
use crate::FinCalcResult;

/// Future value after `months` of a monthly SIP of `payment` that steps up
/// by `contribution_growth_rate` percent every 12 months.
pub(crate) fn sip_future_value(
    payment: Money,
    expected_return_rate: Percent,
    months: u32,
    contribution_growth_rate: Percent,
    timing: ContributionTiming,
) -> FinCalcResult<Money> {
    let factor = stepped_sip_factor(
        monthly_rate(expected_return_rate),
        months,
        pct_to_rate(contribution_growth_rate),
        timing,
    )?;
    product(payment, factor, "SIP future value")
}
