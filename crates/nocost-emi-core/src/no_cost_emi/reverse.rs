use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{monthly_rate, present_value_of_annuity};
use crate::types::{Money, Months, Percent};

/// Principal implied by an advertised "price ÷ tenure" installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedPrincipal {
    /// The price spread evenly across the tenure, as shown to the customer
    pub target_installment: Money,
    /// Amount actually financed
    pub principal: Money,
    /// Price minus principal: the interest the seller presents as a discount
    pub discount: Money,
}

/// Solve for the principal whose EMI at `annual_rate` equals
/// `product_price / tenure_months`.
///
/// Closed form via the present value of an annuity; no iterative search.
pub fn solve_implied_principal(
    product_price: Money,
    annual_rate: Percent,
    tenure_months: Months,
) -> ImpliedPrincipal {
    if tenure_months == 0 {
        return ImpliedPrincipal {
            target_installment: Decimal::ZERO,
            principal: product_price,
            discount: Decimal::ZERO,
        };
    }

    let target_installment = product_price / Decimal::from(tenure_months);

    // No interest to hide at zero rate
    if monthly_rate(annual_rate).is_zero() {
        return ImpliedPrincipal {
            target_installment,
            principal: product_price,
            discount: Decimal::ZERO,
        };
    }

    let principal = present_value_of_annuity(target_installment, annual_rate, tenure_months);

    ImpliedPrincipal {
        target_installment,
        principal,
        discount: product_price - principal,
    }
}
