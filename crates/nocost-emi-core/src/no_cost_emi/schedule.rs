use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::no_cost_emi::tax::gst_on_interest;
use crate::time_value::monthly_rate;
use crate::types::*;

/// Input for the month-by-month amortisation walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub annual_rate: Percent,
    pub tenure_months: Months,
    pub installment: Money,
    pub processing_fee: Money,
    pub processing_fee_tax: Money,
}

/// A single month in the repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLine {
    pub month: Months,
    pub installment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub tax_on_interest: Money,
    /// Processing fee, billed with the first installment only
    pub fee_charged: Money,
    pub fee_tax: Money,
    pub total_outflow: Money,
    pub remaining_balance: Money,
}

/// Reducing-balance amortisation schedule, one line per month.
pub fn build_schedule(input: &ScheduleInput) -> Vec<MonthlyLine> {
    let r = monthly_rate(input.annual_rate);
    let mut lines = Vec::with_capacity(input.tenure_months as usize);
    let mut balance = input.principal;

    for month in 1..=input.tenure_months {
        let interest_component = balance * r;
        let principal_component = input.installment - interest_component;
        let tax_on_interest = gst_on_interest(interest_component);

        // Clamp the final-month overshoot
        balance = (balance - principal_component).max(Decimal::ZERO);

        let (fee_charged, fee_tax) = if month == 1 {
            (input.processing_fee, input.processing_fee_tax)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        lines.push(MonthlyLine {
            month,
            installment: input.installment,
            principal_component,
            interest_component,
            tax_on_interest,
            fee_charged,
            fee_tax,
            total_outflow: input.installment + tax_on_interest + fee_charged + fee_tax,
            remaining_balance: balance,
        });
    }

    lines
}
