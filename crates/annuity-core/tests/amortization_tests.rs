use annuity_core::amortization::{
    build_schedule, calculate_loan, remaining_balance, AmortizationRow, LoanParams,
    PaymentFrequency, SimulationResult,
};
use annuity_core::time_value::npv;
use annuity_core::{format_currency, AnnuityError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOL: Decimal = dec!(0.000001);

fn sample_loans() -> Vec<LoanParams> {
    let mut loans = vec![
        LoanParams::new(dec!(10_000), dec!(5), 5),
        LoanParams::new(dec!(1000), dec!(0), 4),
        LoanParams::new(dec!(250_000), dec!(3.85), 25),
        LoanParams::new(dec!(0.01), dec!(12), 7),
        LoanParams::new(dec!(75_000), dec!(0.1), 1),
        LoanParams::new(dec!(1_000_000), dec!(18), 40),
    ];
    loans.push(LoanParams {
        frequency: PaymentFrequency::Monthly,
        ..LoanParams::new(dec!(180_000), dec!(4.2), 240)
    });
    loans.push(LoanParams {
        frequency: PaymentFrequency::Quarterly,
        ..LoanParams::new(dec!(33_333.33), dec!(7), 13)
    });
    loans
}

fn simulate(params: &LoanParams) -> SimulationResult {
    build_schedule(params).unwrap_or_else(|e| panic!("{params:?} rejected: {e}"))
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_schedule_length_equals_duration() {
    for params in sample_loans() {
        let result = simulate(&params);
        assert_eq!(result.schedule.len(), params.duration as usize);
        let periods: Vec<u32> = result.schedule.iter().map(|r| r.period).collect();
        let expected: Vec<u32> = (1..=params.duration).collect();
        assert_eq!(periods, expected);
    }
}

#[test]
fn test_annuity_is_constant() {
    for params in sample_loans() {
        let result = simulate(&params);
        let annuity = result.annuity().unwrap();
        assert!(result.schedule.iter().all(|r| r.annuity == annuity));
    }
}

#[test]
fn test_amortization_sums_to_capital() {
    for params in sample_loans() {
        let result = simulate(&params);
        let sum: Decimal = result.schedule.iter().map(|r| r.amortization).sum();
        assert!(
            (sum - params.capital).abs() <= params.capital * TOL,
            "{params:?}: amortised {sum}"
        );
        assert_eq!(sum, result.total_amortization);
    }
}

#[test]
fn test_total_paid_is_interest_plus_amortization() {
    for params in sample_loans() {
        let result = simulate(&params);
        assert_eq!(result.total_paid, result.total_interest + result.total_amortization);

        let annuities: Decimal = result.schedule.iter().map(|r| r.annuity).sum();
        assert!((annuities - result.total_paid).abs() <= TOL);
    }
}

#[test]
fn test_final_balance_is_zero() {
    for params in sample_loans() {
        let result = simulate(&params);
        let last = result.schedule.last().unwrap();
        assert!(last.capital_end.abs() <= TOL);
    }
}

#[test]
fn test_balances_chain_between_periods() {
    for params in sample_loans() {
        let result = simulate(&params);
        for pair in result.schedule.windows(2) {
            assert_eq!(pair[1].capital_start, pair[0].capital_end);
        }
        for row in &result.schedule {
            assert_eq!(row.capital_end, row.capital_start - row.amortization);
            assert!((row.interest + row.amortization - row.annuity).abs() <= TOL);
        }
    }
}

#[test]
fn test_payments_discount_back_to_capital() {
    for params in sample_loans() {
        let result = simulate(&params);
        let mut flows = vec![-params.capital];
        flows.extend(result.schedule.iter().map(|r| r.annuity));
        let value = npv(params.periodic_rate(), &flows).unwrap();
        assert!(value.abs() <= dec!(0.0001), "{params:?}: NPV {value}");
    }
}

#[test]
fn test_closed_form_balance_tracks_schedule() {
    for params in sample_loans() {
        let result = simulate(&params);
        for row in &result.schedule {
            let closed = remaining_balance(&params, row.period).unwrap();
            assert!(
                (closed - row.capital_end).abs() <= dec!(0.0001),
                "{params:?} period {}: {closed} vs {}",
                row.period,
                row.capital_end
            );
        }
    }
}

// ===========================================================================
// Known answers
// ===========================================================================

#[test]
fn test_reference_scenario() {
    let out = calculate_loan(&LoanParams::new(dec!(10_000), dec!(5), 5)).unwrap();
    let r = &out.result;
    assert_eq!(r.annuity().unwrap().round_dp(2), dec!(2309.75));
    assert_eq!(r.total_interest.round_dp(2), dec!(1548.74));
    assert_eq!(r.total_amortization.round_dp(2), dec!(10_000));
    assert_eq!(r.schedule[4].capital_end, Decimal::ZERO);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_zero_rate_scenario_full_table() {
    let result = simulate(&LoanParams::new(dec!(1000), dec!(0), 4));
    let expected: Vec<AmortizationRow> = (1..=4u32)
        .map(|period| {
            let start = dec!(1000) - dec!(250) * Decimal::from(period - 1);
            AmortizationRow {
                period,
                capital_start: start,
                interest: Decimal::ZERO,
                amortization: dec!(250),
                annuity: dec!(250),
                capital_end: start - dec!(250),
            }
        })
        .collect();
    assert_eq!(result.schedule, expected);
    assert_eq!(result.total_paid, dec!(1000));
}

#[test]
fn test_single_period_repays_capital_with_one_period_of_interest() {
    for rate in [dec!(0), dec!(2.5), dec!(9)] {
        let params = LoanParams::new(dec!(8000), rate, 1);
        let result = simulate(&params);
        let row = &result.schedule[0];
        assert_eq!(row.amortization, dec!(8000));
        let expected = dec!(8000) * (Decimal::ONE + params.periodic_rate());
        assert!((row.annuity - expected).abs() <= TOL);
    }
}

#[test]
fn test_monthly_mortgage() {
    let params = LoanParams {
        frequency: PaymentFrequency::Monthly,
        ..LoanParams::new(dec!(120_000), dec!(6), 360)
    };
    let result = simulate(&params);
    assert_eq!(result.annuity().unwrap().round_dp(2), dec!(719.46));
}

#[test]
fn test_summary_display() {
    let result = simulate(&LoanParams::default());
    let summary = result.summary();
    assert_eq!(format_currency(summary.annuity), "2\u{202f}309,75\u{a0}€");
    assert_eq!(format_currency(summary.total_interest), "1\u{202f}548,74\u{a0}€");
}

// ===========================================================================
// Rejections
// ===========================================================================

#[test]
fn test_invalid_parameters_name_the_field() {
    let cases = [
        (LoanParams::new(dec!(0), dec!(5), 5), "capital"),
        (LoanParams::new(dec!(-100), dec!(5), 5), "capital"),
        (LoanParams::new(dec!(100), dec!(-0.5), 5), "rate"),
        (LoanParams::new(dec!(100), dec!(5), 0), "duration"),
        (LoanParams::new(dec!(100), dec!(0), u32::MAX), "duration"),
    ];
    for (params, expected_field) in cases {
        match calculate_loan(&params).unwrap_err() {
            AnnuityError::InvalidParameter { field, .. } => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }
}

#[test]
fn test_extreme_inputs_do_not_panic() {
    let params = LoanParams::new(dec!(1_000_000_000), dec!(5000), 500);
    match calculate_loan(&params) {
        Err(AnnuityError::NumericOverflow { .. }) => {}
        other => panic!("Expected NumericOverflow, got {other:?}"),
    }
}

#[test]
fn test_json_input_round_trip_of_params() {
    let params: LoanParams = serde_json::from_str(
        r#"{"capital": 180000, "rate": "4.2", "duration": 240, "frequency": "monthly"}"#,
    )
    .unwrap();
    assert_eq!(params.frequency, PaymentFrequency::Monthly);
    assert_eq!(params.capital, dec!(180000));
    assert_eq!(params.periodic_rate(), dec!(0.0035));
}
