use nocost_emi_core::bank_presets::presets::{BankPresets, BankRequestInput};
use nocost_emi_core::no_cost_emi::report::{
    analyze_no_cost_emi, calculate_no_cost_emi, CalculationMode, LoanReport, LoanRequest,
};
use nocost_emi_core::no_cost_emi::reverse::solve_implied_principal;
use nocost_emi_core::no_cost_emi::schedule::{build_schedule, ScheduleInput};
use nocost_emi_core::time_value::calculate_emi;
use nocost_emi_core::{EmiError, Money, Months, Percent};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn request(
    price: Money,
    rate: Percent,
    tenure_months: Months,
    discount: Option<Money>,
    fee: Money,
) -> LoanRequest {
    LoanRequest {
        product_price: price,
        annual_interest_rate: rate,
        tenure_months,
        discount,
        processing_fee: fee,
    }
}

fn assert_report_invariants(report: &LoanReport) {
    let principal_sum: Decimal = report.schedule.iter().map(|l| l.principal_component).sum();
    assert!(
        (principal_sum - report.effective_principal).abs() < dec!(0.000001),
        "principal sum {principal_sum} vs {}",
        report.effective_principal
    );

    let last = report.schedule.last().expect("schedule is non-empty");
    assert!(last.remaining_balance >= Decimal::ZERO);
    assert!(last.remaining_balance < dec!(0.000001));

    assert!(report.total_hidden_cost >= Decimal::ZERO);
    assert_eq!(
        report.total_hidden_cost,
        report.tax_on_interest + report.processing_fee + report.tax_on_processing_fee
    );
    assert_eq!(report.effective_price, report.original_price + report.total_hidden_cost);
    assert!(
        (report.effective_principal - (report.original_price - report.discount_applied)).abs()
            < dec!(0.000001)
    );

    for line in &report.schedule {
        assert!(
            (line.principal_component + line.interest_component - line.installment).abs()
                < dec!(0.000001)
        );
        assert_eq!(line.installment, report.monthly_installment);
        assert_eq!(
            line.total_outflow,
            line.installment + line.tax_on_interest + line.fee_charged + line.fee_tax
        );
    }
}

// ===========================================================================
// Worked scenarios
// ===========================================================================

#[test]
fn test_derived_discount_24000_at_15pct_over_6_months() {
    let report = calculate_no_cost_emi(&request(dec!(24000), dec!(15), 6, None, Decimal::ZERO));

    assert_eq!(report.mode, CalculationMode::DerivedDiscount);
    assert_eq!(report.monthly_installment, dec!(4000));
    assert_eq!(report.schedule.len(), 6);

    // PV of 6 × 4000 at 1.25% per month ≈ 22984.04
    assert!((report.effective_principal - dec!(22984.04)).abs() < dec!(0.01));
    assert!((report.discount_applied - dec!(1015.96)).abs() < dec!(0.01));
    assert_eq!(report.total_interest, report.discount_applied);

    // GST on ~1015.96 of interest is the entire hidden cost
    assert!((report.total_hidden_cost - dec!(182.87)).abs() < dec!(0.01));
    assert!((report.effective_price - dec!(24182.87)).abs() < dec!(0.01));

    assert_report_invariants(&report);
}

#[test]
fn test_zero_rate_only_fees_are_hidden() {
    let report = calculate_no_cost_emi(&request(
        dec!(100000),
        Decimal::ZERO,
        10,
        Some(Decimal::ZERO),
        dec!(500),
    ));

    assert_eq!(report.monthly_installment, dec!(10000));
    assert_eq!(report.total_interest, Decimal::ZERO);
    assert_eq!(report.tax_on_interest, Decimal::ZERO);
    assert_eq!(report.tax_on_processing_fee, dec!(90));
    assert_eq!(report.total_hidden_cost, dec!(590));
    assert_eq!(report.effective_price, dec!(100590));
    assert_eq!(report.total_payment, dec!(100590));

    assert_report_invariants(&report);
}

#[test]
fn test_explicit_discount_20000_at_12pct_over_12_months() {
    let report = calculate_no_cost_emi(&request(
        dec!(20000),
        dec!(12),
        12,
        Some(dec!(2000)),
        Decimal::ZERO,
    ));

    assert_eq!(report.mode, CalculationMode::ExplicitDiscount);
    assert_eq!(report.effective_principal, dec!(18000));
    assert_eq!(
        report.monthly_installment * dec!(12) - dec!(18000),
        report.total_interest
    );

    assert_report_invariants(&report);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_emi_positive_and_exact_at_zero_rate() {
    for principal in [dec!(1), dec!(999.99), dec!(24000), dec!(1500000)] {
        for n in [1u32, 3, 9, 24, 60] {
            for rate in [dec!(0.01), dec!(11.88), dec!(16), dec!(42)] {
                assert!(calculate_emi(principal, rate, n) > Decimal::ZERO);
            }
            assert_eq!(
                calculate_emi(principal, Decimal::ZERO, n),
                principal / Decimal::from(n)
            );
        }
    }
}

#[test]
fn test_explicit_discount_schedule_amortises_fully() {
    for (price, discount, rate, n) in [
        (dec!(20000), dec!(2000), dec!(12), 12u32),
        (dec!(64999), dec!(4100), dec!(15.99), 18),
        (dec!(3500), dec!(150), dec!(18), 3),
        (dec!(250000), dec!(30000), dec!(16), 36),
    ] {
        let report = calculate_no_cost_emi(&request(price, rate, n, Some(discount), dec!(299)));
        let last = report.schedule.last().unwrap();
        assert!(
            last.remaining_balance <= report.effective_principal * dec!(0.000001),
            "balance {} left on {price}",
            last.remaining_balance
        );
        assert_report_invariants(&report);
    }
}

#[test]
fn test_reverse_solver_and_emi_are_inverses() {
    for (price, rate, n) in [
        (dec!(24000), dec!(15), 6u32),
        (dec!(12999), dec!(14.99), 9),
        (dec!(89900), dec!(17), 24),
    ] {
        let solved = solve_implied_principal(price, rate, n);
        let emi = calculate_emi(solved.principal, rate, n);
        assert!((emi - price / Decimal::from(n)).abs() < dec!(0.000001));
    }
}

#[test]
fn test_total_interest_increases_with_rate() {
    let mut previous: Option<Money> = None;
    for rate in [dec!(0), dec!(6), dec!(11.88), dec!(14), dec!(15.99), dec!(18), dec!(24)] {
        let report = calculate_no_cost_emi(&request(
            dec!(50000),
            rate,
            12,
            Some(dec!(5000)),
            Decimal::ZERO,
        ));
        if let Some(prev) = previous {
            assert!(report.total_interest > prev, "rate {rate}");
        }
        previous = Some(report.total_interest);
    }
}

#[test]
fn test_processing_fee_billed_once() {
    let report = calculate_no_cost_emi(&request(dec!(45000), dec!(16), 9, None, dec!(1460)));
    let fees: Decimal = report.schedule.iter().map(|l| l.fee_charged).sum();
    assert_eq!(fees, dec!(1460));
    for line in &report.schedule {
        if line.month == 1 {
            assert_eq!(line.fee_charged, dec!(1460));
            assert_eq!(line.fee_tax, dec!(262.8));
        } else {
            assert!(line.fee_charged.is_zero());
            assert!(line.fee_tax.is_zero());
        }
    }
}

#[test]
fn test_schedule_tax_sums_to_report_tax() {
    let report = calculate_no_cost_emi(&request(dec!(36000), dec!(15), 12, None, Decimal::ZERO));
    let monthly_tax: Decimal = report.schedule.iter().map(|l| l.tax_on_interest).sum();
    assert!((monthly_tax - report.tax_on_interest).abs() < dec!(0.000001));
}

#[test]
fn test_scheduler_standalone_matches_report() {
    let req = request(dec!(24000), dec!(15), 6, None, dec!(199));
    let report = calculate_no_cost_emi(&req);
    let schedule = build_schedule(&ScheduleInput {
        principal: report.effective_principal,
        annual_rate: dec!(15),
        tenure_months: 6,
        installment: report.monthly_installment,
        processing_fee: dec!(199),
        processing_fee_tax: report.tax_on_processing_fee,
    });
    assert_eq!(schedule, report.schedule);
}

// ===========================================================================
// Boundary: validation, presets, serialisation
// ===========================================================================

#[test]
fn test_analyze_rejects_discount_above_price() {
    let err = analyze_no_cost_emi(&request(
        dec!(1000),
        dec!(15),
        6,
        Some(dec!(1500)),
        Decimal::ZERO,
    ))
    .unwrap_err();
    assert!(matches!(err, EmiError::InvalidInput { ref field, .. } if field == "discount"));
}

#[test]
fn test_analyze_rejects_rate_beyond_ceiling_without_overflow() {
    for rate in [dec!(2000), dec!(5000), dec!(10000)] {
        let err = analyze_no_cost_emi(&request(
            dec!(200000),
            rate,
            60,
            Some(dec!(1000)),
            Decimal::ZERO,
        ))
        .unwrap_err();
        assert!(
            matches!(err, EmiError::InvalidInput { ref field, .. } if field == "annual_interest_rate")
        );
    }
}

#[test]
fn test_bank_preset_drives_full_report() {
    let presets = BankPresets::embedded().unwrap();
    let req = presets
        .resolve(&BankRequestInput {
            bank: "RBL Bank Credit Card".into(),
            product_price: dec!(24000),
            tenure_months: 3,
            discount: None,
            annual_interest_rate: None,
            processing_fee: None,
        })
        .unwrap();
    let out = analyze_no_cost_emi(&req).unwrap();
    assert_eq!(out.result.interest_rate_used, dec!(13));
    assert_eq!(out.result.processing_fee, dec!(150));
    assert_eq!(out.result.tax_on_processing_fee, dec!(27));
    assert_eq!(out.result.monthly_installment, dec!(8000));
}

#[test]
fn test_request_json_defaults() {
    let req: LoanRequest = serde_json::from_str(
        r#"{"product_price": "24000", "annual_interest_rate": "15", "tenure_months": 6}"#,
    )
    .unwrap();
    assert_eq!(req.discount, None);
    assert_eq!(req.processing_fee, Decimal::ZERO);
    assert_eq!(req.mode(), CalculationMode::DerivedDiscount);
}

#[test]
fn test_report_json_shape() {
    let report = calculate_no_cost_emi(&request(dec!(100000), Decimal::ZERO, 10, None, dec!(500)));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["mode"], "derived_discount");
    assert_eq!(value["schedule"].as_array().unwrap().len(), 10);
    assert_eq!(value["schedule"][0]["month"], 1);
    let hidden: Decimal = value["total_hidden_cost"].as_str().unwrap().parse().unwrap();
    assert_eq!(hidden, dec!(590));
}
