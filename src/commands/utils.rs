use crate::output::{read_snapshot, Headline};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a snapshot JSON file
pub fn validate_snapshot_file(file_path: PathBuf) -> Result<()> {
    println!("Validating snapshot: {}", file_path.display());

    let snapshot = read_snapshot(&file_path)?;
    let headline = Headline::of(&snapshot);

    println!("✓ Valid snapshot JSON");
    println!("  Version: {}", snapshot.version);
    println!("  Fetched: {}", snapshot.fetched_at);
    println!("  Distributions: {}", headline.distributions);
    println!("  Recipients: {}", headline.recipients);
    if let Some(user) = &snapshot.user_stats {
        println!("  Viewer: {}", user.viewer);
    }

    if snapshot.version != SCHEMA_VERSION {
        println!(
            "  Note: written with schema v{}, current is v{}",
            snapshot.version, SCHEMA_VERSION
        );
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Sui Split Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Snapshot Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Distribution stats and contract calls for the Sui fund distributor.");
}
