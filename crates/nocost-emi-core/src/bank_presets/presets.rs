use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EmiError;
use crate::no_cost_emi::report::LoanRequest;
use crate::types::*;
use crate::EmiResult;

const EMBEDDED_PRESETS: &str = include_str!("../../data/bank_presets.json");

/// Card issuer EMI terms: one processing fee, one annual rate per tenure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankPreset {
    pub name: String,
    pub processing_fee: Money,
    pub rates: BTreeMap<Months, Percent>,
}

/// All known issuers, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankPresets(Vec<BankPreset>);

/// A request expressed against a bank preset.
///
/// Explicit rate or fee values win over the preset, the same way editing
/// either field by hand detaches a form from the selected bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRequestInput {
    pub bank: String,
    pub product_price: Money,
    pub tenure_months: Months,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_interest_rate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_fee: Option<Money>,
}

impl BankPreset {
    /// Tenures this issuer offers, ascending
    pub fn tenures(&self) -> Vec<Months> {
        self.rates.keys().copied().collect()
    }

    pub fn rate_for(&self, tenure_months: Months) -> EmiResult<Percent> {
        self.rates
            .get(&tenure_months)
            .copied()
            .ok_or_else(|| EmiError::UnsupportedTenure {
                bank: self.name.clone(),
                tenure_months,
                available: self.tenures(),
            })
    }

    /// Pre-populate a request with this issuer's rate and fee.
    pub fn apply(
        &self,
        product_price: Money,
        tenure_months: Months,
        discount: Option<Money>,
    ) -> EmiResult<LoanRequest> {
        Ok(LoanRequest {
            product_price,
            annual_interest_rate: self.rate_for(tenure_months)?,
            tenure_months,
            discount,
            processing_fee: self.processing_fee,
        })
    }

    fn validate(&self) -> EmiResult<()> {
        let field = format!("bank:{}", self.name);
        if self.name.trim().is_empty() {
            return Err(EmiError::InvalidInput {
                field: "bank".into(),
                reason: "Bank name cannot be empty".into(),
            });
        }
        if self.processing_fee < Decimal::ZERO {
            return Err(EmiError::InvalidInput {
                field,
                reason: "Processing fee cannot be negative".into(),
            });
        }
        if self.rates.is_empty() {
            return Err(EmiError::InvalidInput {
                field,
                reason: "At least one tenure rate is required".into(),
            });
        }
        if self.rates.contains_key(&0) || self.rates.values().any(|r| *r < Decimal::ZERO) {
            return Err(EmiError::InvalidInput {
                field,
                reason: "Tenures must be positive and rates non-negative".into(),
            });
        }
        Ok(())
    }
}

impl BankPresets {
    /// Issuer table shipped with the crate.
    pub fn embedded() -> EmiResult<Self> {
        Self::from_json(EMBEDDED_PRESETS)
    }

    pub fn from_json(json: &str) -> EmiResult<Self> {
        let presets: BankPresets = serde_json::from_str(json)?;
        presets.validate()?;
        Ok(presets)
    }

    /// Build from already-deserialised presets (e.g. a YAML override file).
    pub fn new(presets: Vec<BankPreset>) -> EmiResult<Self> {
        let presets = BankPresets(presets);
        presets.validate()?;
        Ok(presets)
    }

    fn validate(&self) -> EmiResult<()> {
        for preset in &self.0 {
            preset.validate()?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BankPreset> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive lookup by issuer name
    pub fn find(&self, name: &str) -> EmiResult<&BankPreset> {
        let wanted = name.trim();
        self.0
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EmiError::UnknownBank(wanted.to_string()))
    }

    /// Resolve a bank-relative request into a plain [`LoanRequest`].
    pub fn resolve(&self, input: &BankRequestInput) -> EmiResult<LoanRequest> {
        let preset = self.find(&input.bank)?;
        // An explicit rate lifts the tenure restriction of the preset table
        let mut request = match input.annual_interest_rate {
            Some(annual_interest_rate) => LoanRequest {
                product_price: input.product_price,
                annual_interest_rate,
                tenure_months: input.tenure_months,
                discount: input.discount,
                processing_fee: preset.processing_fee,
            },
            None => preset.apply(input.product_price, input.tenure_months, input.discount)?,
        };
        if let Some(fee) = input.processing_fee {
            request.processing_fee = fee;
        }
        Ok(request)
    }
}
