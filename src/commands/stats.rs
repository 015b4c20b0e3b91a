//! Stats command: one fetch of the history window, rendered once.

use super::models::StatsArgs;
use crate::aggregator::fetch_history;
use crate::output::{render_dashboard, write_snapshot};
use crate::poller::DashboardSnapshot;
use crate::rpc::ChainReader;
use crate::utils::config::Settings;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the stats command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * "mine" without a viewer
/// * RPC or decoding failures
/// * Snapshot write errors
pub fn execute_stats(
    reader: &dyn ChainReader,
    settings: &Settings,
    args: StatsArgs,
) -> Result<DashboardSnapshot> {
    let start_time = Instant::now();
    let view = args.view.view().context("Invalid --viewer address")?;

    if !view.is_fetchable() {
        anyhow::bail!("--mode mine needs an account (--viewer or SUI_ADDRESS)");
    }

    info!(
        "Fetching last {} distributions from {}",
        settings.history_limit, settings.rpc_url
    );
    let events = fetch_history(
        reader,
        &settings.distribution_event_type(),
        view.filter_address(),
        settings.history_limit,
    )
    .context("Error fetching stats")?;

    let snapshot = DashboardSnapshot::build(view, &events);
    info!("{}", snapshot.stats.summary());

    if let Some(path) = &args.output {
        write_snapshot(&snapshot, path).context("Failed to write snapshot JSON")?;
        info!("✓ Snapshot written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_dashboard(&snapshot, settings));
    }

    info!(
        "Stats completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(snapshot)
}
