use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Months, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Convert an annual percentage rate (15 = 15% p.a.) into a monthly decimal rate.
pub fn monthly_rate(annual_rate: Percent) -> Rate {
    annual_rate / MONTHS_PER_YEAR / PERCENT
}

/// (1 + r)^n
pub fn compound_factor(monthly_rate: Rate, tenure_months: Months) -> Decimal {
    (Decimal::ONE + monthly_rate).powi(i64::from(tenure_months))
}

/// Equated monthly installment that fully amortises `principal` over
/// `tenure_months` at `annual_rate` compounded monthly.
///
/// Zero rate falls back to straight-line repayment. A non-positive principal
/// or a zero tenure yields zero rather than an error.
pub fn calculate_emi(principal: Money, annual_rate: Percent, tenure_months: Months) -> Money {
    if principal <= Decimal::ZERO || tenure_months == 0 {
        return Decimal::ZERO;
    }
    if annual_rate.is_zero() {
        return principal / Decimal::from(tenure_months);
    }

    let r = monthly_rate(annual_rate);
    let factor = compound_factor(r, tenure_months);
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return principal / Decimal::from(tenure_months);
    }

    principal * r * factor / denominator
}

/// Present value of `tenure_months` equal installments: the exact inverse of
/// [`calculate_emi`].
pub fn present_value_of_annuity(
    installment: Money,
    annual_rate: Percent,
    tenure_months: Months,
) -> Money {
    if tenure_months == 0 {
        return Decimal::ZERO;
    }
    let r = monthly_rate(annual_rate);
    if r.is_zero() {
        return installment * Decimal::from(tenure_months);
    }

    let factor = compound_factor(r, tenure_months);
    if factor.is_zero() {
        return Decimal::ZERO;
    }
    installment * (Decimal::ONE - Decimal::ONE / factor) / r
}

/// Interest paid over the life of the loan.
pub fn total_interest(installment: Money, tenure_months: Months, principal: Money) -> Money {
    installment * Decimal::from(tenure_months) - principal
}
