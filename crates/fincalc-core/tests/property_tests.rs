use chrono::NaiveDate;
use fincalc_core::life_goals::goal::{self, GoalInput, GoalKind};
use fincalc_core::life_goals::retirement::{self, RetirementInput};
use fincalc_core::quick_tools::cash_flows::{self, CashFlowEntry, IrregularCashFlowInput};
use fincalc_core::quick_tools::single_amount::{self, SingleAmountInput};
use fincalc_core::quick_tools::weighted_returns::{self, AssetInput, WeightedReturnsInput};
use fincalc_core::sip::delay::{self, SipDelayInput};
use fincalc_core::sip::growth::{self, SipGrowthInput};
use fincalc_core::sip::need::{self, SipNeedInput};
use fincalc_core::time_value::compound;
use fincalc_core::withdrawal::swp::{self, SwpInput};
use fincalc_core::{ComputationOutput, ContributionTiming, FinCalcResult, ValuationMode};
use pretty_assertions::assert_eq;
use proptest::collection::vec;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use serde::Serialize;
use std::fmt::Debug;
use rust_decimal::Decimal;

/// Basis points to a percent, e.g. 1250 -> 12.50.
fn bp(value: u32) -> Decimal {
    Decimal::new(i64::from(value), 2)
}

fn mode(future: bool) -> ValuationMode {
    if future {
        ValuationMode::FutureValue
    } else {
        ValuationMode::PresentValue
    }
}

/// Run a calculator twice on the same input; result and warnings must match.
fn assert_repeatable<T, F>(run: F)
where
    T: Serialize + Debug + PartialEq,
    F: Fn() -> FinCalcResult<ComputationOutput<T>>,
{
    let first = run().unwrap();
    let second = run().unwrap();
    assert_eq!(first.result, second.result);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.assumptions, second.assumptions);
}

fn timing(beginning: bool) -> ContributionTiming {
    if beginning {
        ContributionTiming::Beginning
    } else {
        ContributionTiming::End
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_goal_is_deterministic(
        years in 1u32..41,
        cost in 1_000u32..10_000_000,
        inflation in 0u32..1500,
        expected in 100u32..2000,
        step_up in 0u32..1500,
        existing in 0u32..5_000_000,
        beginning in proptest::bool::ANY,
    ) {
        let input = GoalInput {
            goal_kind: GoalKind::Other,
            goal_name: None,
            years,
            cost_today: Decimal::from(cost),
            inflation_rate: Some(bp(inflation)),
            expected_return_rate: bp(expected),
            contribution_growth_rate: bp(step_up),
            existing_corpus: Decimal::from(existing),
            contribution_timing: timing(beginning),
        };
        let first = goal::plan_goal(&input).unwrap();
        let second = goal::plan_goal(&input).unwrap();
        assert_eq!(first.result, second.result);
        assert_eq!(first.warnings, second.warnings);

        // Target is exactly the inflated cost
        let expected_target = Decimal::from(cost) * compound(bp(inflation) / Decimal::ONE_HUNDRED, years).unwrap();
        prop_assert_eq!(first.result.target_amount, expected_target);
        prop_assert_eq!(
            first.result.shortfall_or_surplus,
            first.result.target_amount - first.result.future_value_existing
        );
    }

    #[test]
    fn prop_sip_need_inverts_growth(
        years in 1u32..41,
        target in 10_000u32..100_000_000,
        expected in 100u32..2000,
        step_up in 0u32..1500,
        beginning in proptest::bool::ANY,
    ) {
        let solved = need::calculate_sip_need(&SipNeedInput {
            target_amount: Decimal::from(target),
            years,
            expected_return_rate: bp(expected),
            inflation_rate: Decimal::ZERO,
            contribution_growth_rate: bp(step_up),
            contribution_timing: timing(beginning),
        })
        .unwrap()
        .result;

        let projected = growth::calculate_sip_growth(&SipGrowthInput {
            monthly_contribution: solved.required_monthly_contribution,
            years,
            expected_return_rate: bp(expected),
            contribution_growth_rate: bp(step_up),
            contribution_timing: timing(beginning),
        })
        .unwrap()
        .result;

        let tolerance = Decimal::from(target) * Decimal::new(1, 10);
        prop_assert!(
            (projected.future_value - Decimal::from(target)).abs() <= tolerance,
            "target {} projected {}", target, projected.future_value
        );
    }

    #[test]
    fn prop_larger_withdrawal_never_lasts_longer(
        corpus in 100_000u32..10_000_000,
        smaller in 1_000u32..100_000,
        extra in 1u32..50_000,
        rate in 0u32..1500,
        increase in proptest::bool::ANY,
    ) {
        let base = SwpInput {
            initial_corpus: Decimal::from(corpus),
            monthly_withdrawal: Decimal::from(smaller),
            expected_return_rate: bp(rate),
            increase_withdrawal: increase,
            yearly_increase_rate: Decimal::TEN,
            start_delay_years: 0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        };
        let mut heavier = base.clone();
        heavier.monthly_withdrawal = Decimal::from(smaller + extra);

        let light = swp::simulate_swp(&base).unwrap().result;
        let heavy = swp::simulate_swp(&heavier).unwrap().result;
        prop_assert!(heavy.full_instalments <= light.full_instalments);
        prop_assert!(light.period_end_value >= Decimal::ZERO);
        prop_assert!(heavy.period_end_value >= Decimal::ZERO);
    }

    #[test]
    fn prop_weighted_rate_reproduces_portfolio_value(
        years in 1u32..41,
        first_amount in 1_000u32..5_000_000,
        second_amount in 1_000u32..5_000_000,
        first_rate in 0u32..1800,
        second_rate in 0u32..1800,
    ) {
        let out = weighted_returns::calculate_weighted_returns(&WeightedReturnsInput {
            years,
            assets: vec![
                AssetInput {
                    label: None,
                    investment_amount: Decimal::from(first_amount),
                    expected_return_rate: bp(first_rate),
                },
                AssetInput {
                    label: None,
                    investment_amount: Decimal::from(second_amount),
                    expected_return_rate: bp(second_rate),
                },
            ],
        })
        .unwrap()
        .result;

        let low = bp(first_rate.min(second_rate));
        let high = bp(first_rate.max(second_rate));
        let slack = Decimal::new(1, 4);
        prop_assert!(out.weighted_return_rate >= low - slack);
        prop_assert!(out.weighted_return_rate <= high + slack);

        let rebuilt = out.total_invested
            * compound(out.weighted_return_rate / Decimal::ONE_HUNDRED, years).unwrap();
        let tolerance = out.future_value * Decimal::new(1, 5);
        prop_assert!(
            (rebuilt - out.future_value).abs() <= tolerance,
            "rebuilt {} future value {}", rebuilt, out.future_value
        );
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(24))]

    #[test]
    fn prop_retirement_is_deterministic(
        present_age in 20u32..60,
        years_to_retirement in 1u32..40,
        monthly_expenses in 1_000u32..200_000,
        inflation in 0u32..1200,
        expected in 100u32..1800,
        existing in 0u32..10_000_000,
        beginning in proptest::bool::ANY,
    ) {
        let input = RetirementInput {
            present_age,
            retirement_age: present_age + years_to_retirement,
            monthly_expenses: Decimal::from(monthly_expenses),
            inflation_rate: bp(inflation),
            expected_return_rate: bp(expected),
            contribution_growth_rate: Decimal::ZERO,
            existing_corpus: Decimal::from(existing),
            contribution_timing: timing(beginning),
            life_expectancy: None,
            post_retirement_return_rate: None,
            post_retirement_inflation_rate: None,
        };
        assert_repeatable(|| retirement::plan_retirement(&input));
    }

    #[test]
    fn prop_sip_calculators_are_deterministic(
        monthly in 500u32..100_000,
        years in 1u32..41,
        expected in 100u32..2000,
        inflation in 0u32..1200,
        step_up in 0u32..1500,
        delay_months in 0u32..600,
        beginning in proptest::bool::ANY,
    ) {
        let growth_input = SipGrowthInput {
            monthly_contribution: Decimal::from(monthly),
            years,
            expected_return_rate: bp(expected),
            contribution_growth_rate: bp(step_up),
            contribution_timing: timing(beginning),
        };
        assert_repeatable(|| growth::calculate_sip_growth(&growth_input));

        let need_input = SipNeedInput {
            target_amount: Decimal::from(monthly) * Decimal::from(1_000),
            years,
            expected_return_rate: bp(expected),
            inflation_rate: bp(inflation),
            contribution_growth_rate: bp(step_up),
            contribution_timing: timing(beginning),
        };
        assert_repeatable(|| need::calculate_sip_need(&need_input));

        let delay_input = SipDelayInput {
            monthly_contribution: Decimal::from(monthly),
            years,
            expected_return_rate: bp(expected),
            delay_months,
            contribution_timing: timing(beginning),
        };
        assert_repeatable(|| delay::calculate_sip_delay(&delay_input));
    }

    #[test]
    fn prop_swp_is_deterministic(
        corpus in 100_000u32..10_000_000,
        withdrawal in 1_000u32..100_000,
        rate in 0u32..1500,
        increase in proptest::bool::ANY,
        start_delay_years in 0u32..10,
    ) {
        let input = SwpInput {
            initial_corpus: Decimal::from(corpus),
            monthly_withdrawal: Decimal::from(withdrawal),
            expected_return_rate: bp(rate),
            increase_withdrawal: increase,
            yearly_increase_rate: Decimal::TEN,
            start_delay_years,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        };
        assert_repeatable(|| swp::simulate_swp(&input));
    }

    #[test]
    fn prop_quick_tools_are_deterministic(
        future in proptest::bool::ANY,
        amount in 0u32..10_000_000,
        years in 1u32..101,
        rate in 0u32..1500,
        flows in vec((-1_000_000i64..1_000_000, 0u32..101), 1..8),
        assets in vec((1_000u32..5_000_000, 0u32..1800), 1..6),
    ) {
        let single_input = SingleAmountInput {
            mode: mode(future),
            amount: Decimal::from(amount),
            years,
            rate: bp(rate),
        };
        assert_repeatable(|| single_amount::calculate_single_amount(&single_input));

        let flow_input = IrregularCashFlowInput {
            mode: mode(future),
            cash_flows: flows
                .iter()
                .map(|&(amount, years)| CashFlowEntry { amount: Decimal::from(amount), years })
                .collect(),
            discount_rate: bp(rate),
        };
        assert_repeatable(|| cash_flows::value_cash_flows(&flow_input));

        let weighted_input = WeightedReturnsInput {
            years: years.min(40),
            assets: assets
                .iter()
                .map(|&(amount, rate)| AssetInput {
                    label: None,
                    investment_amount: Decimal::from(amount),
                    expected_return_rate: bp(rate),
                })
                .collect(),
        };
        assert_repeatable(|| weighted_returns::calculate_weighted_returns(&weighted_input));
    }
}
