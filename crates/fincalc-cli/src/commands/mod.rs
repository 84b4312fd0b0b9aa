pub mod life_goals;
pub mod quick_tools;
pub mod sip;
pub mod withdrawal;

use fincalc_core::ContributionTiming;

/// Map the `--beginning` switch onto contribution timing.
pub(crate) fn timing(beginning: bool) -> ContributionTiming {
    if beginning {
        ContributionTiming::Beginning
    } else {
        ContributionTiming::End
    }
}
