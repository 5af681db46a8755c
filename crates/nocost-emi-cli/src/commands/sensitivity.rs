use clap::Args;
use serde_json::Value;

use nocost_emi_core::sensitivity::sweep::{self, SensitivityInput};
use nocost_emi_core::SensitivityVariable;

use crate::commands::emi::{build_request, LoanArgs};

/// Arguments for a one-way sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Variable to sweep in format name:min:max:step
    /// (e.g. "annual_interest_rate:12:18:1" or "tenure_months:3:24:3")
    #[arg(long)]
    pub var: String,

    #[command(flatten)]
    pub loan: LoanArgs,
}

fn parse_sens_var(raw: &str) -> Result<SensitivityVariable, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Sensitivity variable must be name:min:max:step, got '{}'",
            raw
        )
        .into());
    }
    Ok(SensitivityVariable {
        name: parts[0].to_string(),
        min: parts[1].parse()?,
        max: parts[2].parse()?,
        step: parts[3].parse()?,
    })
}

pub fn run_sensitivity(
    args: SensitivityArgs,
    bank_data: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input = SensitivityInput {
        base: build_request(&args.loan, bank_data)?,
        variable: parse_sens_var(&args.var)?,
    };
    let result = sweep::analyze_sensitivity(&input)?;
    Ok(serde_json::to_value(result)?)
}
