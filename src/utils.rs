//! Utility functions for edition naming, string handling, and file system checks.

use chrono::{Local, NaiveTime};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Classify a local time into an edition name.
///
/// - **Morning**: 00:00 - 08:00
/// - **Afternoon**: 08:00 - 16:00
/// - **Evening**: 16:00 - 24:00
pub fn classify_time_of_day(tod: NaiveTime) -> &'static str {
    let morning_high = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN);
    let afternoon_high = NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN);

    if tod < morning_high {
        "morning"
    } else if tod < afternoon_high {
        "afternoon"
    } else {
        "evening"
    }
}

/// Edition name for the current local time.
#[instrument]
pub fn time_of_day() -> String {
    let tod = Local::now().time();
    let which = classify_time_of_day(tod);
    tracing::debug!(%tod, %which, "Computed time_of_day");
    which.to_string()
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest character boundary
/// at or below `max` and get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Capitalize the first character of a string.
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch_path = format!("{}/.write_check", path.trim_end_matches('/'));
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
