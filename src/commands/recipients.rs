//! Recipients command: check a list before submitting, or write a template.

use super::models::RecipientSource;
use super::submit::load_recipients;
use crate::output::render_recipient_check;
use crate::recipients::{csv_template, row_amounts, valid_addresses, RecipientRow};
use crate::parser::schema::format_sui;
use anyhow::{Context, Result};
use std::path::Path;

/// Print every entry with its validity; errors if any entry is unusable
pub fn execute_check(source: &RecipientSource) -> Result<Vec<RecipientRow>> {
    let rows = load_recipients(source)?;
    print!("{}", render_recipient_check(&rows));

    valid_addresses(&rows)?;
    if let Some(amounts) = row_amounts(&rows)? {
        let total = amounts.iter().fold(0u64, |sum, a| sum.saturating_add(*a));
        println!("Airdrop total: {} SUI", format_sui(total, 4));
    }

    Ok(rows)
}

/// Write the CSV template, or print it when no path is given
pub fn execute_template(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, csv_template())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Template written to {}", path.display());
        }
        None => print!("{}", csv_template()),
    }
    Ok(())
}
