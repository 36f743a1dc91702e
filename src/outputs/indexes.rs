//! Report index maintenance.
//!
//! `reports.md` lists every report, newest date first, with one line per
//! edition:
//!
//! ```text
//! # News Sentiment Reports
//!
//! - **2025-05-06**
//!     - [Evening](./2025-05-06_evening.md): 14 articles, average polarity 0.052
//!     - [Morning](./2025-05-06_morning.md): 12 articles, average polarity -0.013
//! ```
//!
//! Re-running an edition replaces its line instead of appending a duplicate.

use crate::analytics::Dashboard;
use crate::utils::upcase;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const INDEX_FILENAME: &str = "reports.md";
const INDEX_HEADER: &str = "# News Sentiment Reports";

/// Insert (or replace) the entry for `dashboard` in an index document.
pub fn insert_report_entry(content: &str, dashboard: &Dashboard, markdown_filename: &str) -> String {
    let date_heading = format!("- **{}**", dashboard.local_date);
    let edition_link = format!(
        "    - [{}](./{})",
        upcase(&dashboard.time_of_day),
        markdown_filename
    );
    let edition_entry = format!(
        "{}: {} articles, average polarity {:.3}",
        edition_link, dashboard.total_articles, dashboard.average_polarity
    );

    let mut lines: Vec<String> = if content.trim().is_empty() {
        vec![INDEX_HEADER.to_string()]
    } else {
        content.lines().map(|l| l.to_string()).collect()
    };

    match lines.iter().position(|l| l.trim() == date_heading) {
        Some(i) => {
            let mut j = i + 1;
            let mut replaced = false;
            while j < lines.len() && lines[j].starts_with("    - ") {
                if lines[j].starts_with(&edition_link) {
                    lines[j] = edition_entry.clone();
                    replaced = true;
                    break;
                }
                j += 1;
            }
            if !replaced {
                lines.insert(j, edition_entry);
            }
        }
        None => {
            let insert_at = match lines.iter().position(|l| l.starts_with(INDEX_HEADER)) {
                Some(pos) => pos + 1,
                None => 0,
            };
            lines.insert(insert_at, String::new());
            lines.insert(insert_at + 1, date_heading);
            lines.insert(insert_at + 2, edition_entry);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Update `{markdown_output_dir}/reports.md` with this run's report.
///
/// # Arguments
///
/// * `markdown_output_dir` - Directory holding the reports and their index
/// * `dashboard` - The run whose date and edition are indexed
/// * `markdown_filename` - Report file the new entry links to
///
/// # Returns
///
/// `Ok(())` once the index is written, or an error if reading or writing it fails.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir, date = %dashboard.local_date, file = %markdown_filename))]
pub async fn update_report_index(
    markdown_output_dir: &str,
    dashboard: &Dashboard,
    markdown_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let index_path = Path::new(markdown_output_dir).join(INDEX_FILENAME);
    let content = if index_path.exists() {
        fs::read_to_string(&index_path).await?
    } else {
        String::new()
    };

    let updated = insert_report_entry(&content, dashboard, markdown_filename);
    fs::write(&index_path, updated).await?;
    info!(path = %index_path.display(), "Updated report index");
    Ok(())
}
