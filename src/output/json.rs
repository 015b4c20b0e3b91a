//! JSON snapshot and intent writers.
//!
//! Dashboard snapshots and unsigned transaction intents are written as
//! pretty-printed JSON so they can be diffed, validated, or handed to a
//! signer later.

use crate::poller::DashboardSnapshot;
use crate::transaction::TransactionIntent;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a dashboard snapshot to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let snapshot = DashboardSnapshot::build(view, &events);
/// write_snapshot(&snapshot, "stats.json")?;
/// ```
pub fn write_snapshot(
    snapshot: &DashboardSnapshot,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_pretty(snapshot, output_path.as_ref())?;
    debug!(
        "Snapshot holds {} distributions",
        snapshot.stats.total_distribution_count
    );
    Ok(())
}

/// Write an unsigned transaction intent to a JSON file
pub fn write_intent(
    intent: &TransactionIntent,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_pretty(intent, output_path.as_ref())
}

fn write_pretty<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    info!("Writing JSON to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    info!(
        "JSON written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a dashboard snapshot from a JSON file
///
/// **Public** - used by `validate`
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<DashboardSnapshot, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading snapshot from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let snapshot: DashboardSnapshot =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Snapshot loaded: version {}, fetched at {}",
        snapshot.version, snapshot.fetched_at
    );

    Ok(snapshot)
}
