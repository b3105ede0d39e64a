use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;

static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    OUTPUT_JSON.store(matches!(format, OutputFormat::Json), Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a message (JSON mode wraps it in a simple object)
pub fn print_message(message: &str) {
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Format a relative time (e.g., "2 days ago")
pub fn format_relative(iso: &str) -> String {
    use chrono::{DateTime, NaiveDateTime, Utc};

    let parsed = iso.parse::<DateTime<Utc>>().ok().or_else(|| {
        // Backends often emit naive UTC timestamps without an offset
        iso.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
    });

    let Some(dt) = parsed else {
        return iso.split('T').next().unwrap_or(iso).to_string();
    };

    let diff = Utc::now().signed_duration_since(dt);
    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        let mins = diff.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff.num_hours() < 24 {
        let hours = diff.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff.num_days() < 30 {
        let days = diff.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Design", 10), "Design");
        assert_eq!(truncate("Infrastructure", 8), "Infra...");
        assert_eq!(truncate("Équipe Étoile", 9), "Équipe...");
    }

    #[test]
    fn relative_dates() {
        let recent = (chrono::Utc::now() - chrono::Duration::hours(3)).to_rfc3339();
        assert_eq!(format_relative(&recent), "3 hours ago");

        assert_eq!(format_relative("2020-01-02T03:04:05"), "2020-01-02");
        assert_eq!(format_relative("garbage"), "garbage");
    }
}
