//! Shared plumbing for commands that build transactions.

use super::models::{RecipientSource, SignerArgs};
use crate::output::write_intent;
use crate::recipients::{parse_recipient_csv, parse_recipient_list, RecipientRow};
use crate::transaction::{IntentBuilder, TransactionIntent};
use crate::utils::config::Settings;
use crate::utils::error::{InputError, WalletError};
use crate::wallet::{require_account, submit_intent};
use anyhow::{Context, Result};
use colored::*;
use log::info;

/// Read recipients from the inline list or the CSV file
pub fn load_recipients(source: &RecipientSource) -> Result<Vec<RecipientRow>> {
    match (&source.inline, &source.csv) {
        (Some(_), Some(_)) => anyhow::bail!("Use either --to or --csv, not both"),
        (Some(text), None) => Ok(parse_recipient_list(text)),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(parse_recipient_csv(&text)?)
        }
        (None, None) => Err(InputError::EmptyRecipients.into()),
    }
}

/// Resolve the sender and build an intent with it
pub fn build_intent<F>(settings: &Settings, signer: &SignerArgs, build: F) -> Result<TransactionIntent>
where
    F: FnOnce(&IntentBuilder) -> Result<TransactionIntent, InputError>,
{
    let wallet = signer.wallet()?;
    let sender = require_account(wallet.as_ref())?;
    let builder = IntentBuilder::new(settings, sender);
    Ok(build(&builder)?)
}

/// Execute, write, or print an intent depending on the signer arguments
///
/// Returns the transaction digest when the intent was executed.
pub fn deliver(
    settings: &Settings,
    signer: &SignerArgs,
    intent: &TransactionIntent,
) -> Result<Option<String>> {
    info!("Built intent: {}", intent.call_targets().join(", "));

    if let Some(path) = &signer.out {
        write_intent(intent, path).context("Failed to write transaction intent")?;
        println!("Intent written to {}", path.display().to_string().cyan());
    }

    if signer.signer_cmd.is_none() {
        if signer.out.is_none() {
            println!("{}", serde_json::to_string_pretty(intent)?);
        }
        return Ok(None);
    }

    let wallet = signer.wallet()?;
    let receipt = match submit_intent(wallet.as_ref(), intent) {
        Ok(receipt) => receipt,
        Err(e @ WalletError::Rejected(_)) => {
            println!("{}", "Transaction was not executed".yellow());
            return Err(e).context("Signer rejected the transaction");
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", "✓ Transaction executed".green().bold());
    println!("  Digest:   {}", receipt.digest);
    println!(
        "  Explorer: {}",
        settings.explorer_link(&receipt.digest).cyan()
    );

    Ok(Some(receipt.digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_recipients_requires_one_source() {
        assert!(load_recipients(&RecipientSource::default()).is_err());
        assert!(load_recipients(&RecipientSource {
            inline: Some("0x1".to_string()),
            csv: Some("a.csv".into()),
        })
        .is_err());
    }

    #[test]
    fn test_load_recipients_from_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.csv");
        std::fs::write(&path, crate::recipients::csv_template()).unwrap();

        let rows = load_recipients(&RecipientSource {
            inline: None,
            csv: Some(path),
        })
        .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_build_intent_needs_sender() {
        let settings = Settings::default();
        let result = build_intent(&settings, &SignerArgs::default(), |b| {
            b.distribute_funds("0x1")
        });
        assert!(result.is_err());
    }
}
