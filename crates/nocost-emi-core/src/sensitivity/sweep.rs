use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EmiError;
use crate::no_cost_emi::report::{calculate_no_cost_emi, LoanRequest};
use crate::no_cost_emi::validation::validate_request;
use crate::types::*;
use crate::EmiResult;

/// Guard against runaway sweeps
const MAX_SWEEP_POINTS: usize = 1_000;

/// Which request field a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepTarget {
    AnnualInterestRate,
    TenureMonths,
}

impl SweepTarget {
    fn parse(name: &str) -> EmiResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "annual_interest_rate" | "rate" => Ok(SweepTarget::AnnualInterestRate),
            "tenure_months" | "tenure" => Ok(SweepTarget::TenureMonths),
            other => Err(EmiError::InvalidInput {
                field: "variable".into(),
                reason: format!(
                    "Unknown sweep variable '{other}'. Use: annual_interest_rate, tenure_months"
                ),
            }),
        }
    }
}

/// Input for a one-way sensitivity sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Base case; the swept field is overwritten per row
    pub base: LoanRequest,
    pub variable: SensitivityVariable,
}

/// One point of the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub annual_interest_rate: Percent,
    pub tenure_months: Months,
    pub monthly_installment: Money,
    pub discount_applied: Money,
    pub total_interest: Money,
    pub total_hidden_cost: Money,
    pub effective_price: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable: SweepTarget,
    pub results: Vec<SensitivityRow>,
}

fn generate_sweep_values(var: &SensitivityVariable) -> EmiResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(EmiError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        if values.len() >= MAX_SWEEP_POINTS {
            return Err(EmiError::InvalidInput {
                field: format!("variable:{}", var.name),
                reason: format!("Sweep exceeds {MAX_SWEEP_POINTS} points"),
            });
        }
        values.push(current);
        current += var.step;
    }
    Ok(values)
}

fn apply(base: &LoanRequest, target: SweepTarget, value: Decimal) -> EmiResult<LoanRequest> {
    let mut request = base.clone();
    match target {
        SweepTarget::AnnualInterestRate => request.annual_interest_rate = value,
        SweepTarget::TenureMonths => {
            if !value.fract().is_zero() {
                return Err(EmiError::InvalidInput {
                    field: "variable:tenure_months".into(),
                    reason: format!("Tenure must be a whole number of months, got {value}"),
                });
            }
            request.tenure_months = value.to_u32().ok_or_else(|| EmiError::InvalidInput {
                field: "variable:tenure_months".into(),
                reason: format!("Tenure out of range: {value}"),
            })?;
        }
    }
    Ok(request)
}

/// Recompute the report for each value of one swept variable.
pub fn analyze_sensitivity(
    input: &SensitivityInput,
) -> EmiResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let target = SweepTarget::parse(&input.variable.name)?;
    let values = generate_sweep_values(&input.variable)?;

    let mut results = Vec::with_capacity(values.len());
    for value in values {
        let request = apply(&input.base, target, value)?;
        validate_request(&request)?;
        let report = calculate_no_cost_emi(&request);
        results.push(SensitivityRow {
            annual_interest_rate: report.interest_rate_used,
            tenure_months: report.tenure_months,
            monthly_installment: report.monthly_installment,
            discount_applied: report.discount_applied,
            total_interest: report.total_interest,
            total_hidden_cost: report.total_hidden_cost,
            effective_price: report.effective_price,
        });
    }

    let mut warnings = Vec::new();
    if results.len() == 1 {
        warnings.push("Sweep produced a single point; widen min/max for a comparison".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "No Cost EMI one-way sensitivity",
        &serde_json::json!({
            "variable": target,
            "min": input.variable.min.to_string(),
            "max": input.variable.max.to_string(),
            "step": input.variable.step.to_string(),
            "mode": input.base.mode(),
        }),
        warnings,
        elapsed,
        SensitivityOutput {
            variable: target,
            results,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base() -> LoanRequest {
        LoanRequest {
            product_price: dec!(30000),
            annual_interest_rate: dec!(15),
            tenure_months: 6,
            discount: None,
            processing_fee: dec!(199),
        }
    }

    fn variable(name: &str, min: Decimal, max: Decimal, step: Decimal) -> SensitivityVariable {
        SensitivityVariable {
            name: name.into(),
            min,
            max,
            step,
        }
    }

    #[test]
    fn test_rate_sweep_is_monotonic() {
        let out = analyze_sensitivity(&SensitivityInput {
            base: base(),
            variable: variable("annual_interest_rate", dec!(0), dec!(24), dec!(3)),
        })
        .unwrap();
        let rows = &out.result.results;
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].total_interest, Decimal::ZERO);
        for pair in rows.windows(2) {
            assert!(pair[1].total_interest > pair[0].total_interest);
            assert!(pair[1].effective_price > pair[0].effective_price);
        }
    }

    #[test]
    fn test_tenure_sweep() {
        let out = analyze_sensitivity(&SensitivityInput {
            base: base(),
            variable: variable("tenure", dec!(3), dec!(12), dec!(3)),
        })
        .unwrap();
        let tenures: Vec<Months> = out.result.results.iter().map(|r| r.tenure_months).collect();
        assert_eq!(tenures, vec![3, 6, 9, 12]);
        assert_eq!(out.result.variable, SweepTarget::TenureMonths);
    }

    #[test]
    fn test_fractional_tenure_rejected() {
        let result = analyze_sensitivity(&SensitivityInput {
            base: base(),
            variable: variable("tenure_months", dec!(3), dec!(6), dec!(1.5)),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_step_and_variable() {
        assert!(analyze_sensitivity(&SensitivityInput {
            base: base(),
            variable: variable("annual_interest_rate", dec!(1), dec!(5), Decimal::ZERO),
        })
        .is_err());
        assert!(analyze_sensitivity(&SensitivityInput {
            base: base(),
            variable: variable("discount", dec!(1), dec!(5), dec!(1)),
        })
        .is_err());
    }

    #[test]
    fn test_extreme_rate_sweep_rejected() {
        let mut base = base();
        base.product_price = dec!(200000);
        base.discount = Some(dec!(1000));
        base.tenure_months = 60;
        let result = analyze_sensitivity(&SensitivityInput {
            base,
            variable: variable("annual_interest_rate", dec!(1000), dec!(10000), dec!(1000)),
        });
        match result {
            Err(EmiError::InvalidInput { field, .. }) => assert_eq!(field, "annual_interest_rate"),
            other => panic!("Expected rate rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_single_point_warns() {
        let out = analyze_sensitivity(&SensitivityInput {
            base: base(),
            variable: variable("rate", dec!(15), dec!(15), dec!(1)),
        })
        .unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
