// ABOUTME: Wires token refresh, paginated fetch, and export together
// ABOUTME: Also holds the CLI's state-code-to-label export policy

use crate::{
    api::{ApiClient, MONITOR_LIST_ENDPOINT},
    export::{self, Format},
    Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Maps Site24x7 numeric `state` codes to human labels. Every other field
/// and unknown code passes through unchanged.
pub fn state_label(field: &str, value: &str) -> String {
    if field != "state" {
        return value.to_string();
    }
    match value {
        "0" => "Active".to_string(),
        "3" => "Deleted".to_string(),
        "5" => "Suspended".to_string(),
        other => other.to_string(),
    }
}

/// Fetches every monitor page and writes the export file. Zero monitors is
/// reported and skipped, not an error.
pub fn run_export(client: &mut ApiClient, format: Format, output: &Path) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching monitors...");
    pb.enable_steady_tick(Duration::from_millis(120));

    let monitors = client.fetch_all(MONITOR_LIST_ENDPOINT);
    pb.finish_and_clear();
    let monitors = monitors?;

    if monitors.is_empty() {
        println!("No monitors found.");
        return Ok(());
    }

    export::export(&monitors, format, output, Some(&state_label))?;
    println!("Exported {} monitors to {}", monitors.len(), output.display());
    Ok(())
}
