use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nocost_emi_core::bank_presets::presets::BankPreset;

use crate::input;

/// Arguments for listing card issuer presets
#[derive(Args)]
pub struct BanksArgs {
    /// Show a single issuer (case-insensitive)
    #[arg(long)]
    pub bank: Option<String>,

    /// Only list issuers offering this tenure
    #[arg(long)]
    pub tenure: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BankRow {
    name: String,
    processing_fee: Decimal,
    tenures: Vec<u32>,
    rates_pct: Vec<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate_for_tenure: Option<Decimal>,
}

fn to_row(preset: &BankPreset, tenure: Option<u32>) -> BankRow {
    BankRow {
        name: preset.name.clone(),
        processing_fee: preset.processing_fee,
        tenures: preset.tenures(),
        rates_pct: preset.rates.values().copied().collect(),
        rate_for_tenure: tenure.and_then(|t| preset.rates.get(&t).copied()),
    }
}

pub fn run_banks(args: BanksArgs, bank_data: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let presets = input::file::read_bank_presets(bank_data)?;

    if let Some(ref name) = args.bank {
        let preset = presets.find(name)?;
        if let Some(tenure) = args.tenure {
            preset.rate_for(tenure)?;
        }
        return Ok(serde_json::to_value(vec![to_row(preset, args.tenure)])?);
    }

    let rows: Vec<BankRow> = presets
        .iter()
        .filter(|p| args.tenure.map_or(true, |t| p.rates.contains_key(&t)))
        .map(|p| to_row(p, args.tenure))
        .collect();

    if rows.is_empty() {
        return Err(format!(
            "No issuer offers a {}-month plan",
            args.tenure.unwrap_or_default()
        )
        .into());
    }
    Ok(serde_json::to_value(rows)?)
}
