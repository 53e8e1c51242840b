//! Rendering of sizes, dates and clock times as the shell prints them.

use chrono::{DateTime, Local, NaiveDateTime};
use terminal_platform::filesystem::DirectoryEntry;

use crate::tables::USER_NAME;

/// Size column used when an entry carries no size
const DEFAULT_SIZE_COLUMN: &str = "     4.0K";
const DEFAULT_DATE: &str = "Jan 15";
const DEFAULT_TIME: &str = "12:00";

/// Human-readable size with a single-letter unit: `1024` -> `1K`, `3423` -> `3.3K`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let units = ["B", "K", "M", "G", "T"];
    let i = ((bytes.ilog2() / 10) as usize).min(units.len() - 1);
    let val = bytes as f64 / 1024f64.powi(i as i32);
    // halves round up (1280 -> 1.3K), not to even
    let rounded = format!("{:.1}", (val * 10.0).round() / 10.0);
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{}{}", trimmed, units[i])
}

/// One line of `ls -l` output
pub fn long_listing_line(entry: &DirectoryEntry) -> String {
    let size = match entry.size {
        Some(bytes) if bytes > 0 => format!("{:>8}", format_file_size(bytes)),
        _ => DEFAULT_SIZE_COLUMN.to_string(),
    };
    let (date, time) = match entry.modified {
        Some(modified) => (listing_date(&modified), listing_time(&modified)),
        None => (DEFAULT_DATE.to_string(), DEFAULT_TIME.to_string()),
    };
    format!(
        "{} 1 {user} {user} {} {} {} {}",
        entry.permissions_or_default(),
        size,
        date,
        time,
        entry.name,
        user = USER_NAME,
    )
}

fn listing_date(modified: &NaiveDateTime) -> String {
    modified.format("%b %d").to_string()
}

fn listing_time(modified: &NaiveDateTime) -> String {
    modified.format("%H:%M").to_string()
}

/// Full timestamp printed by `date`
pub fn full_date(now: &DateTime<Local>) -> String {
    now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

/// Clock time interpolated into `top` and `uptime`
pub fn clock_time(now: &DateTime<Local>) -> String {
    now.format("%-I:%M:%S %p").to_string()
}
