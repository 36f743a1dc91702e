//! JSON output of the dashboard data.
//!
//! Files are organized by date with edition names:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```
//!
//! A second run in the same edition overwrites the earlier file.

use crate::analytics::Dashboard;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `dashboard` under `json_output_dir`.
pub fn dashboard_path(dashboard: &Dashboard, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(&dashboard.local_date)
        .join(format!("{}.json", dashboard.time_of_day))
}

/// Write a [`Dashboard`] to `{json_output_dir}/{date}/{time_of_day}.json`.
///
/// # Arguments
///
/// * `dashboard` - The aggregated run to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path written, or an error if directory creation or file writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_dashboard(
    dashboard: &Dashboard,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(dashboard)?;
    let path = dashboard_path(dashboard, json_output_dir);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON dashboard");
    Ok(path)
}
