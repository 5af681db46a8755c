use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::no_cost_emi::reverse::solve_implied_principal;
use crate::no_cost_emi::schedule::{build_schedule, MonthlyLine, ScheduleInput};
use crate::no_cost_emi::tax::{gst_on_interest, gst_on_processing_fee, GST_RATE};
use crate::no_cost_emi::validation::validate_request;
use crate::time_value::{calculate_emi, total_interest};
use crate::types::*;
use crate::EmiResult;

/// Discount gaps below this are treated as the seller passing on exactly the interest.
const DISCOUNT_TOLERANCE: Money = dec!(0.5);

/// One user-initiated calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub product_price: Money,
    /// Annual rate as a percentage (15 = 15% p.a.)
    pub annual_interest_rate: Percent,
    pub tenure_months: Months,
    /// Seller's "No Cost" discount. Absent or non-positive means derive it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
    #[serde(default)]
    pub processing_fee: Money,
}

/// How the financed principal was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Seller's discount taken as given
    ExplicitDiscount,
    /// Discount solved from price, rate and tenure
    DerivedDiscount,
}

/// Cost-transparency report for a No Cost EMI offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub original_price: Money,
    pub discount_applied: Money,
    pub effective_principal: Money,
    pub interest_rate_used: Percent,
    pub tenure_months: Months,
    pub processing_fee: Money,
    pub monthly_installment: Money,
    pub total_interest: Money,
    pub tax_on_interest: Money,
    pub tax_on_processing_fee: Money,
    /// GST on interest + processing fee + GST on processing fee
    pub total_hidden_cost: Money,
    pub total_payment: Money,
    /// Sticker price plus every hidden cost
    pub effective_price: Money,
    pub mode: CalculationMode,
    pub schedule: Vec<MonthlyLine>,
}

impl LoanRequest {
    /// The calculation mode this request selects.
    pub fn mode(&self) -> CalculationMode {
        match self.discount {
            Some(d) if d > Decimal::ZERO => CalculationMode::ExplicitDiscount,
            _ => CalculationMode::DerivedDiscount,
        }
    }
}

/// Run the full hidden-cost calculation. Performs no validation; see
/// [`analyze_no_cost_emi`] for the checked entry point.
pub fn calculate_no_cost_emi(request: &LoanRequest) -> LoanReport {
    let price = request.product_price;
    let rate = request.annual_interest_rate;
    let n = request.tenure_months;
    let mode = request.mode();

    let (discount, principal, installment, interest) = match mode {
        CalculationMode::ExplicitDiscount => {
            let discount = request.discount.unwrap_or(Decimal::ZERO);
            let principal = price - discount;
            let installment = calculate_emi(principal, rate, n);
            let interest = total_interest(installment, n, principal);
            (discount, principal, installment, interest)
        }
        CalculationMode::DerivedDiscount => {
            let solved = solve_implied_principal(price, rate, n);
            (
                solved.discount,
                solved.principal,
                solved.target_installment,
                solved.discount,
            )
        }
    };

    let tax_on_interest = gst_on_interest(interest);
    let tax_on_processing_fee = gst_on_processing_fee(request.processing_fee);

    let schedule = build_schedule(&ScheduleInput {
        principal,
        annual_rate: rate,
        tenure_months: n,
        installment,
        processing_fee: request.processing_fee,
        processing_fee_tax: tax_on_processing_fee,
    });

    let total_hidden_cost = tax_on_interest + request.processing_fee + tax_on_processing_fee;

    LoanReport {
        original_price: price,
        discount_applied: discount,
        effective_principal: principal,
        interest_rate_used: rate,
        tenure_months: n,
        processing_fee: request.processing_fee,
        monthly_installment: installment,
        total_interest: interest,
        tax_on_interest,
        tax_on_processing_fee,
        total_hidden_cost,
        total_payment: installment * Decimal::from(n) + total_hidden_cost,
        effective_price: price + total_hidden_cost,
        mode,
        schedule,
    }
}

/// Validate the request, run the calculation and wrap it with warnings and metadata.
pub fn analyze_no_cost_emi(request: &LoanRequest) -> EmiResult<ComputationOutput<LoanReport>> {
    let start = Instant::now();
    validate_request(request)?;

    let mut warnings: Vec<String> = Vec::new();
    let report = calculate_no_cost_emi(request);

    if request.annual_interest_rate.is_zero() {
        warnings.push(
            "Zero interest rate: no interest is embedded, hidden cost is limited to fees".into(),
        );
    }

    if report.mode == CalculationMode::ExplicitDiscount && !report.interest_rate_used.is_zero() {
        // Compare the seller's discount with the interest a true No Cost offer would absorb
        let implied = solve_implied_principal(
            request.product_price,
            request.annual_interest_rate,
            request.tenure_months,
        );
        let gap = implied.discount - report.discount_applied;
        if gap > DISCOUNT_TOLERANCE {
            warnings.push(format!(
                "Discount {} is {} short of the interest a No Cost offer would absorb ({}); \
                 installments exceed price / tenure",
                report.discount_applied.round_dp(2),
                gap.round_dp(2),
                implied.discount.round_dp(2),
            ));
        } else if gap < -DISCOUNT_TOLERANCE {
            warnings.push(format!(
                "Discount {} exceeds the embedded interest ({}) by {}",
                report.discount_applied.round_dp(2),
                implied.discount.round_dp(2),
                (-gap).round_dp(2),
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "No Cost EMI hidden cost analysis (reducing-balance amortisation)",
        &serde_json::json!({
            "mode": report.mode,
            "gst_rate": GST_RATE.to_string(),
            "compounding": "monthly",
            "annual_rate_pct": request.annual_interest_rate.to_string(),
            "tenure_months": request.tenure_months,
        }),
        warnings,
        elapsed,
        report,
    ))
}
