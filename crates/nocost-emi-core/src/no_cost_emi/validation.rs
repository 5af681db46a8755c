use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::EmiError;
use crate::no_cost_emi::report::LoanRequest;
use crate::types::{Money, Months, Percent};
use crate::EmiResult;

/// Longest tenure accepted at the input boundary
pub const MAX_TENURE_MONTHS: Months = 60;

/// Highest annual rate accepted. Keeps the compound factor of a 60-month
/// loan far inside `Decimal` range.
pub const MAX_ANNUAL_RATE_PCT: Percent = dec!(100);

/// Largest product price accepted
pub const MAX_PRODUCT_PRICE: Money = dec!(1000000000000);

fn invalid(field: &str, reason: &str) -> EmiError {
    EmiError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Field-level checks the calculation itself never performs.
pub fn validate_request(request: &LoanRequest) -> EmiResult<()> {
    if request.product_price <= Decimal::ZERO {
        return Err(invalid("product_price", "Product price must be positive"));
    }
    if request.product_price > MAX_PRODUCT_PRICE {
        return Err(EmiError::InvalidInput {
            field: "product_price".into(),
            reason: format!("Product price cannot exceed {MAX_PRODUCT_PRICE}"),
        });
    }
    if request.annual_interest_rate < Decimal::ZERO {
        return Err(invalid(
            "annual_interest_rate",
            "Interest rate cannot be negative",
        ));
    }
    if request.annual_interest_rate > MAX_ANNUAL_RATE_PCT {
        return Err(EmiError::InvalidInput {
            field: "annual_interest_rate".into(),
            reason: format!("Interest rate cannot exceed {MAX_ANNUAL_RATE_PCT}% p.a."),
        });
    }
    if request.tenure_months == 0 || request.tenure_months > MAX_TENURE_MONTHS {
        return Err(EmiError::InvalidInput {
            field: "tenure_months".into(),
            reason: format!("Tenure must be between 1 and {MAX_TENURE_MONTHS} months"),
        });
    }
    if let Some(discount) = request.discount {
        if discount < Decimal::ZERO {
            return Err(invalid("discount", "Discount cannot be negative"));
        }
        if discount >= request.product_price {
            return Err(invalid(
                "discount",
                "Discount must be smaller than the product price",
            ));
        }
    }
    if request.processing_fee < Decimal::ZERO {
        return Err(invalid(
            "processing_fee",
            "Processing fee cannot be negative",
        ));
    }
    Ok(())
}
