use chrono::NaiveDate;
use fincalc_core::withdrawal::swp::{self, SwpInput, SwpOutcome, MAX_SIMULATION_MONTHS};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario() -> SwpInput {
    SwpInput {
        initial_corpus: dec!(2_500_000),
        monthly_withdrawal: dec!(10_000),
        expected_return_rate: dec!(8),
        increase_withdrawal: false,
        yearly_increase_rate: dec!(10),
        start_delay_years: 0,
        start_date: NaiveDate::from_ymd_opt(2024, 6, 15),
    }
}

#[test]
fn test_swp_sustainable_scenario_runs_to_cap() {
    // Monthly yield ≈ 16,667 > 10,000 withdrawal: never depletes
    let out = swp::simulate_swp(&scenario()).unwrap().result;
    assert_eq!(out.outcome, SwpOutcome::SustainedToCap);
    assert_eq!(out.full_instalments, MAX_SIMULATION_MONTHS);
    assert_eq!(out.yearly_schedule.len(), 100);
}

#[test]
fn test_swp_step_up_eventually_depletes() {
    let mut input = scenario();
    input.increase_withdrawal = true;
    let out = swp::simulate_swp(&input).unwrap().result;
    match out.outcome {
        SwpOutcome::Depleted { month } => {
            assert_eq!(out.months_simulated, month);
            assert_eq!(out.full_instalments, month - 1);
        }
        SwpOutcome::SustainedToCap => panic!("10% yearly step-up should exhaust the corpus"),
    }
    assert!(out.period_end_value >= Decimal::ZERO);
    assert!(out.total_withdrawn > dec!(2_500_000));
    assert!(out.last_instalment_date.unwrap() > NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
}

#[test]
fn test_swp_last_date_counts_months_from_start() {
    let mut input = scenario();
    input.initial_corpus = dec!(30_000);
    input.expected_return_rate = Decimal::ZERO;
    let out = swp::simulate_swp(&input).unwrap().result;
    assert_eq!(out.full_instalments, 3);
    assert_eq!(out.last_instalment_date, NaiveDate::from_ymd_opt(2024, 9, 15));
}

#[test]
fn test_swp_outcome_serialization() {
    let out = swp::simulate_swp(&scenario()).unwrap();
    let json = serde_json::to_value(&out.result).unwrap();
    assert_eq!(json["outcome"]["status"], "sustained_to_cap");

    let mut input = scenario();
    input.initial_corpus = dec!(1_000);
    let json = serde_json::to_value(&swp::simulate_swp(&input).unwrap().result).unwrap();
    assert_eq!(json["outcome"]["status"], "depleted");
    assert_eq!(json["outcome"]["month"], 1);
    assert!(json["last_instalment_date"].is_null());
}

#[test]
fn test_swp_json_defaults() {
    let input: SwpInput = serde_json::from_str(
        r#"{"initial_corpus": 1000000, "monthly_withdrawal": 8000, "expected_return_rate": 9}"#,
    )
    .unwrap();
    assert!(!input.increase_withdrawal);
    assert_eq!(input.yearly_increase_rate, dec!(10));
    assert_eq!(input.start_delay_years, 0);
    assert!(input.start_date.is_none());
    // Falls back to today's date without failing
    assert!(swp::simulate_swp(&input).is_ok());
}

#[test]
fn test_swp_rejects_non_positive_withdrawal() {
    let mut input = scenario();
    input.monthly_withdrawal = Decimal::ZERO;
    assert!(swp::simulate_swp(&input).is_err());
}
