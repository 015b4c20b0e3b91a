//! Event command: staged distribution events on the fund distributor.

use super::models::{EventAction, EventArgs, RecipientSource};
use super::submit::{build_intent, deliver, load_recipients};
use crate::aggregator::{get_event_details, get_user_events};
use crate::output::render_event_details;
use crate::recipients::{parse_sui_amount, require_sui_address, valid_addresses};
use crate::rpc::ChainReader;
use crate::transaction::TransactionIntent;
use crate::utils::config::Settings;
use anyhow::{Context, Result};
use colored::*;
use log::info;

fn addresses(source: &RecipientSource) -> Result<Vec<String>> {
    let rows = load_recipients(source)?;
    Ok(valid_addresses(&rows)?)
}

/// Build the intent for a write action; `None` for read-only actions
pub fn plan_event(settings: &Settings, args: &EventArgs) -> Result<Option<TransactionIntent>> {
    let signer = &args.signer;
    let intent = match &args.action {
        EventAction::Create { name } => {
            build_intent(settings, signer, |b| b.create_distribution_event(name))?
        }
        EventAction::Fund { event_id, amount } => {
            let amount = parse_sui_amount(amount)?;
            build_intent(settings, signer, |b| b.add_funds(event_id, amount))?
        }
        EventAction::AddRecipients {
            event_id,
            recipients,
        } => {
            let recipients = addresses(recipients)?;
            build_intent(settings, signer, |b| b.add_recipients(event_id, &recipients))?
        }
        EventAction::Distribute { event_id } => {
            build_intent(settings, signer, |b| b.distribute_funds(event_id))?
        }
        EventAction::Withdraw { event_id } => {
            build_intent(settings, signer, |b| b.emergency_withdraw(event_id))?
        }
        EventAction::CreateAndDistribute {
            name,
            recipients,
            amount,
        } => {
            let recipients = addresses(recipients)?;
            let amount = parse_sui_amount(amount)?;
            build_intent(settings, signer, |b| {
                b.create_and_distribute(name, &recipients, amount)
            })?
        }
        EventAction::Launch {
            name,
            recipients,
            amount,
        } => {
            let recipients = addresses(recipients)?;
            let amount = parse_sui_amount(amount)?;
            build_intent(settings, signer, |b| {
                b.create_event_with_funds_and_recipients(name, &recipients, amount)
            })?
        }
        EventAction::Show { .. } | EventAction::List { .. } => return Ok(None),
    };
    Ok(Some(intent))
}

/// Execute the event command
///
/// Write actions build and deliver an intent; `show` and `list` read
/// distribution objects from the chain.
pub fn execute_event(
    reader: &dyn ChainReader,
    settings: &Settings,
    args: EventArgs,
) -> Result<()> {
    if let Some(intent) = plan_event(settings, &args)? {
        deliver(settings, &args.signer, &intent)?;
        return Ok(());
    }

    match &args.action {
        EventAction::Show { event_id } => {
            let id = require_sui_address(event_id)?;
            let details = get_event_details(reader, &id)
                .with_context(|| format!("Failed to fetch event {}", id))?;
            match details {
                Some(details) => print!("{}", render_event_details(&details)),
                None => println!("{}", "Object is not a distribution event".yellow()),
            }
        }
        EventAction::List { owner } => {
            let owner = require_sui_address(owner)?;
            let events = get_user_events(reader, &owner, &settings.distribution_object_type())
                .context("Failed to fetch owned distribution events")?;
            info!("{} distribution event(s) owned by {}", events.len(), owner);
            if events.is_empty() {
                println!("{}", "No distribution events found".dimmed());
            }
            for details in &events {
                println!("{}", render_event_details(details));
            }
        }
        _ => {}
    }

    Ok(())
}
