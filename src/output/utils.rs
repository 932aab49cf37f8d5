//! Shared utility functions for output formatting

/// Shown in place of a size or time that is zero or unknown.
pub const PLACEHOLDER: &str = "?";

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary units, rounded to two decimals with
/// trailing zeros dropped: `100 B`, `1 KB`, `1.5 KB`, `2.25 MB`.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Entry size for display; zero renders as [`PLACEHOLDER`].
pub fn display_size(bytes: u64) -> String {
    if bytes == 0 {
        PLACEHOLDER.to_string()
    } else {
        format_bytes(bytes)
    }
}

/// Replace characters that would break a markdown table cell.
pub fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
