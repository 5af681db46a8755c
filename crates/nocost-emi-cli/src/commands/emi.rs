use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use nocost_emi_core::bank_presets::presets::BankRequestInput;
use nocost_emi_core::no_cost_emi::report::{self, LoanRequest};

use crate::input;

/// Rate assumed when neither --rate nor --bank is given
const DEFAULT_RATE_PCT: Decimal = dec!(15);

/// Loan inputs shared by every EMI command
#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Path to a JSON LoanRequest (overrides the flags below)
    #[arg(long)]
    pub input: Option<String>,

    /// Product price as listed by the seller
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 15.99). Defaults to the bank
    /// preset for the tenure, or 15 without --bank
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, default_value_t = 6)]
    pub tenure: u32,

    /// "No Cost" discount shown by the seller; derived when omitted
    #[arg(long)]
    pub discount: Option<Decimal>,

    /// One-time processing fee. Defaults to the bank preset, or 0 without --bank
    #[arg(long)]
    pub processing_fee: Option<Decimal>,

    /// Card issuer whose preset fills rate and processing fee
    #[arg(long)]
    pub bank: Option<String>,
}

/// Arguments for the full hidden-cost report
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the month-by-month schedule export
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Turn CLI input into a request: --input file, then flags, then piped stdin.
pub fn build_request(
    args: &LoanArgs,
    bank_data: Option<&str>,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(price) = args.price {
        return request_from_flags(args, price, bank_data);
    }
    if let Some(request) = input::stdin::read_stdin::<LoanRequest>()? {
        return Ok(request);
    }
    Err("--price <amount>, --input <file.json> or stdin required".into())
}

fn request_from_flags(
    args: &LoanArgs,
    price: Decimal,
    bank_data: Option<&str>,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    match args.bank {
        Some(ref bank) => {
            let presets = input::file::read_bank_presets(bank_data)?;
            let request = presets.resolve(&BankRequestInput {
                bank: bank.clone(),
                product_price: price,
                tenure_months: args.tenure,
                discount: args.discount,
                annual_interest_rate: args.rate,
                processing_fee: args.processing_fee,
            })?;
            Ok(request)
        }
        None => Ok(LoanRequest {
            product_price: price,
            annual_interest_rate: args.rate.unwrap_or(DEFAULT_RATE_PCT),
            tenure_months: args.tenure,
            discount: args.discount,
            processing_fee: args.processing_fee.unwrap_or(Decimal::ZERO),
        }),
    }
}

pub fn run_calculate(
    args: CalculateArgs,
    bank_data: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(&args.loan, bank_data)?;
    let result = report::analyze_no_cost_emi(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: ScheduleArgs,
    bank_data: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(&args.loan, bank_data)?;
    let result = report::analyze_no_cost_emi(&request)?;
    Ok(serde_json::to_value(result.result.schedule)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(price: Decimal) -> LoanArgs {
        LoanArgs {
            input: None,
            price: Some(price),
            rate: None,
            tenure: 6,
            discount: None,
            processing_fee: None,
            bank: None,
        }
    }

    #[test]
    fn test_flags_without_bank_use_defaults() {
        let request = build_request(&flags(dec!(24000)), None).unwrap();
        assert_eq!(request.annual_interest_rate, dec!(15));
        assert_eq!(request.tenure_months, 6);
        assert_eq!(request.processing_fee, Decimal::ZERO);
        assert_eq!(request.discount, None);
    }

    #[test]
    fn test_flags_with_bank_use_preset() {
        let mut args = flags(dec!(24000));
        args.bank = Some("Axis Bank Credit Card".into());
        args.tenure = 9;
        let request = build_request(&args, None).unwrap();
        assert_eq!(request.annual_interest_rate, dec!(16));
        assert_eq!(request.processing_fee, dec!(299));
    }

    #[test]
    fn test_explicit_fee_detaches_from_bank() {
        let mut args = flags(dec!(24000));
        args.bank = Some("Axis Bank Credit Card".into());
        args.processing_fee = Some(dec!(49));
        let request = build_request(&args, None).unwrap();
        assert_eq!(request.processing_fee, dec!(49));
        assert_eq!(request.annual_interest_rate, dec!(16));
    }

    #[test]
    fn test_calculate_returns_envelope() {
        let value = run_calculate(
            CalculateArgs {
                loan: flags(dec!(24000)),
            },
            None,
        )
        .unwrap();
        assert_eq!(value["result"]["mode"], "derived_discount");
        assert_eq!(value["result"]["schedule"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_calculate_rejects_invalid_price() {
        let result = run_calculate(
            CalculateArgs {
                loan: flags(dec!(-10)),
            },
            None,
        );
        assert!(result.is_err());
    }
}
