//! Common utilities for certificate generation.
//!
//! Shared helpers for date/time formatting and for locating the bundled
//! static assets.

use chrono::{DateTime, Local, Timelike};
use std::path::Path;

/// Format a date as `DD/MM/YYYY` with zero-padded day and month, the form
/// printed on the certificate (e.g. "03/04/2020").
pub fn format_date(moment: &DateTime<Local>) -> String {
    moment.format("%d/%m/%Y").to_string()
}

/// Format the hour of signing, zero-padded to two digits.
pub fn format_hour(moment: &DateTime<Local>) -> String {
    moment.format("%H").to_string()
}

/// Round a minute value down to the lower multiple of 5 (23 -> 20,
/// 7 -> 5). A timestamp on a 5-minute grid reads as entered by hand
/// rather than stamped by a machine; this coarsening is deliberate.
pub fn rounded_minute(minute: u32) -> u32 {
    (minute / 5) * 5
}

/// Format the minute of signing: rounded down to the 5-minute grid, then
/// zero-padded to two digits.
pub fn format_minute(moment: &DateTime<Local>) -> String {
    format!("{:02}", rounded_minute(moment.minute()))
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
