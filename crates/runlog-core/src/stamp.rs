//! Date and time stamps for log file and run-id naming

use chrono::Local;

/// Today's date as `YYYY-MM-DD`
pub fn datestamp() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The current time as `HHMMSS`
pub fn timestamp() -> String {
    Local::now().format("%H%M%S").to_string()
}

/// Combined date and time stamp: `YYYY-MM-DD_HHMMSS`
///
/// This is the default run identifier for a process.
pub fn datetime_stamp() -> String {
    Local::now().format("%Y-%m-%d_%H%M%S").to_string()
}

/// Run identifier carrying a human-supplied run name:
/// `YYYY-MM-DD_HHMMSS_<run_name>`
pub fn compose_run_id(run_name: &str) -> String {
    format!("{}_{}", datetime_stamp(), run_name)
}
