use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use loaner_core::schedule::{
    analyze_loan, LoanAnalysisInput, LoanAnalysisOutput, Schedule, MAX_SCHEDULE_PERIODS,
};
use loaner_core::{LoanError, LoanTerms};

const TOL: Decimal = dec!(0.01);

fn assert_close(actual: Decimal, expected: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= TOL,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

fn terms(principal: Decimal, rate: Decimal, payment: Decimal) -> LoanTerms {
    LoanTerms::new(
        principal,
        rate,
        payment,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    )
    .unwrap()
}

// ===========================================================================
// Validation tests
// ===========================================================================

#[test]
fn test_principal_must_be_positive() {
    for bad in [dec!(-1), dec!(0)] {
        let result = LoanTerms::new(
            bad,
            dec!(0.06),
            dec!(200),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(
            matches!(result, Err(LoanError::InvalidPrincipal(p)) if p == bad),
            "principal {bad} should be rejected"
        );
    }
}

#[test]
fn test_rate_must_be_strictly_between_zero_and_one() {
    for bad in [dec!(-0.01), dec!(0), dec!(1), dec!(1.01)] {
        let result = LoanTerms::new(
            dec!(10_000),
            bad,
            dec!(200),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(
            matches!(result, Err(LoanError::InvalidInterestRate(r)) if r == bad),
            "rate {bad} should be rejected"
        );
    }

    // Boundary-adjacent values are fine.
    assert!(LoanTerms::new(
        dec!(10_000),
        dec!(0.01),
        dec!(200),
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    )
    .is_ok());
}

#[test]
fn test_payment_must_be_positive() {
    for bad in [dec!(-0.01), dec!(0)] {
        let result = LoanTerms::new(
            dec!(10_000),
            dec!(0.06),
            bad,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(
            matches!(result, Err(LoanError::InvalidPayment(p)) if p == bad),
            "payment {bad} should be rejected"
        );
    }
}

#[test]
fn test_start_date_parsing_rejects_out_of_range_fields() {
    for bad in ["2020-13-01", "2020-01-32", "2020-02-30", "not-a-date", "2020-01"] {
        assert!(
            matches!(
                loaner_core::parse_start_date(bad),
                Err(LoanError::InvalidStartDate(_))
            ),
            "'{bad}' should be rejected"
        );
    }
    assert!(loaner_core::parse_start_date("2020-02-29").is_ok());
}

// ===========================================================================
// Termination and conversion guards
// ===========================================================================

#[test]
fn test_iteration_cap_backstops_non_shrinking_balance() {
    // A payment of 50.0000000001 clears the non-amortizing guard (first-month
    // interest rounds to exactly 50.00) yet shrinks the balance so slowly
    // that the loan cannot finish within the period cap.
    let result = Schedule::generate(&terms(dec!(10_000), dec!(0.06), dec!(50.0000000001)));
    assert!(matches!(
        result,
        Err(LoanError::ScheduleOverflow(n)) if n == MAX_SCHEDULE_PERIODS
    ));
}

#[test]
fn test_calendar_overflow_surfaces_date_error() {
    // Two-period loan starting at the last representable date: period 0
    // leaves a balance, and the calendar cannot advance another month.
    let terms = LoanTerms::new(dec!(10_000), dec!(0.06), dec!(5_000), NaiveDate::MAX).unwrap();
    assert!(matches!(
        Schedule::generate(&terms),
        Err(LoanError::DateError(_))
    ));
}

#[test]
fn test_json_errors_convert_to_serialization_error() {
    let bad = serde_json::from_str::<LoanTerms>("{not json").unwrap_err();
    assert!(matches!(
        LoanError::from(bad),
        LoanError::SerializationError(_)
    ));
}

// ===========================================================================
// Reference scenarios (values cross-checked against a loan calculator)
// ===========================================================================

#[test]
fn test_scenario_five_year_loan() {
    let schedule = Schedule::generate(&terms(dec!(10_000), dec!(0.06), dec!(193.33))).unwrap();
    assert_eq!(schedule.len(), 60);
    assert_close(schedule.total_interest, dec!(1_599.68), "total interest");
    assert_close(schedule.total_paid, dec!(11_599.68), "total paid");
}

#[test]
fn test_scenario_two_year_loan() {
    let schedule = Schedule::generate(&terms(dec!(25_000), dec!(0.06), dec!(1_108.02))).unwrap();
    assert_eq!(schedule.len(), 24);
    assert_close(schedule.total_interest, dec!(1_592.37), "total interest");
    assert_close(schedule.total_paid, dec!(26_592.37), "total paid");
}

#[test]
fn test_scenario_single_period_payoff() {
    let schedule = Schedule::generate(&terms(dec!(10_000), dec!(0.06), dec!(10_050))).unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule.total_interest, dec!(50));
    assert_eq!(schedule.periods[0].closing_balance, Decimal::ZERO);
}

// ===========================================================================
// Invariants
// ===========================================================================

#[test]
fn test_every_record_satisfies_closing_identity() {
    let schedule = Schedule::generate(&terms(dec!(10_000), dec!(0.06), dec!(193.33))).unwrap();
    assert!(!schedule.is_empty());

    for record in schedule.iter() {
        assert_close(
            record.closing_balance,
            record.opening_balance + record.accrued_interest - record.contribution,
            "closing identity",
        );
        assert!(
            record.contribution <= record.opening_balance + record.accrued_interest,
            "period {} overpays",
            record.period
        );
    }
}

#[test]
fn test_openings_chain_from_closings() {
    let schedule = Schedule::generate(&terms(dec!(25_000), dec!(0.06), dec!(1_108.02))).unwrap();

    for pair in schedule.periods.windows(2) {
        assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
        assert_eq!(pair[1].period, pair[0].period + 1);
    }
    assert_eq!(
        schedule.periods.last().unwrap().closing_balance,
        Decimal::ZERO
    );
}

#[test]
fn test_generation_is_deterministic() {
    let input = terms(dec!(10_000), dec!(0.06), dec!(193.33));
    let first = Schedule::generate(&input).unwrap();
    let second = Schedule::generate(&input).unwrap();
    assert_eq!(first, second);
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_analyze_schedule_serializes_with_envelope() {
    let input = LoanAnalysisInput::Schedule(terms(dec!(10_000), dec!(0.06), dec!(193.33)));
    let output = analyze_loan(&input).unwrap();

    match &output.result {
        LoanAnalysisOutput::Schedule(schedule) => assert_eq!(schedule.len(), 60),
        _ => panic!("Expected Schedule output"),
    }

    let json = serde_json::to_value(&output).unwrap();
    assert!(json.get("methodology").is_some());
    assert!(json.get("metadata").is_some());
    assert_eq!(
        json["result"]["Schedule"]["periods"]
            .as_array()
            .map(|a| a.len()),
        Some(60)
    );
}

#[test]
fn test_analyze_propagates_non_amortizing_error() {
    let input = LoanAnalysisInput::Summary(terms(dec!(10_000), dec!(0.06), dec!(50)));
    assert!(matches!(
        analyze_loan(&input),
        Err(LoanError::NonAmortizing { .. })
    ));
}
