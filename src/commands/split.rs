//! Split command: equal split or custom-amount airdrop via the splitter.
//!
//! A recipient CSV with an amount column selects the airdrop; otherwise
//! `--amount` is divided equally.

use super::models::SplitArgs;
use super::submit::{build_intent, deliver, load_recipients};
use crate::recipients::{parse_sui_amount, row_amounts, valid_addresses};
use crate::transaction::TransactionIntent;
use crate::utils::config::Settings;
use crate::utils::error::InputError;
use anyhow::Result;
use log::info;

/// Build the split intent without delivering it
pub fn plan_split(settings: &Settings, args: &SplitArgs) -> Result<TransactionIntent> {
    let rows = load_recipients(&args.recipients)?;
    let addresses = valid_addresses(&rows)?;
    let amounts = row_amounts(&rows)?;
    let total = args.amount.as_deref().map(parse_sui_amount).transpose()?;

    match amounts {
        Some(amounts) => {
            info!("Airdrop to {} recipients", addresses.len());
            build_intent(settings, &args.signer, |b| {
                b.airdrop_funds(&addresses, &amounts, total)
            })
        }
        None => {
            let amount = total.ok_or_else(|| InputError::InvalidAmount(String::new()))?;
            info!("Equal split to {} recipients", addresses.len());
            build_intent(settings, &args.signer, |b| {
                b.split_funds_equal(&addresses, amount)
            })
        }
    }
}

pub fn execute_split(settings: &Settings, args: SplitArgs) -> Result<Option<String>> {
    let intent = plan_split(settings, &args)?;
    deliver(settings, &args.signer, &intent)
}
