//! Simple line-based output for the record lists and list states.

use crate::models::Record;
use crate::view_state::ListState;

/// Line width for separators.
pub const LINE_WIDTH: usize = 60;

/// Layout used when printing publish times.
const PUBLISH_TIME_DISPLAY: &str = "%m/%d %H:%M";

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PENDING: &str = "…";
    pub const SEARCH: &str = "?";
}

/// Print the main header.
///
/// ```text
/// SMOGWATCH
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Print a section title with a thin rule under it.
///
/// ```text
/// HIGH PM2.5 (3)
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_section(title: &str, count: usize) {
    println!();
    println!("{} ({})", title, count);
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// Print an indented status line.
///
/// ```text
///   ✓ 84 sites loaded
/// ```
pub fn print_step_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Icon shown next to a state line.
pub fn state_icon(state: &ListState) -> &'static str {
    match state {
        ListState::Refreshing => icons::PENDING,
        ListState::ShowAll | ListState::Found => icons::SUCCESS,
        ListState::Hide | ListState::NotFound(_) => icons::SEARCH,
        ListState::NoNetwork | ListState::Timeout => icons::WARNING,
        ListState::Failed(_) => icons::FAILURE,
    }
}

/// Human-readable message for a state.
pub fn state_message(state: &ListState) -> String {
    match state {
        ListState::Refreshing => "Refreshing readings".to_string(),
        ListState::ShowAll => "Showing all sites".to_string(),
        ListState::Hide => "Type a keyword to search".to_string(),
        ListState::Found => "Matching sites".to_string(),
        ListState::NotFound(keyword) => format!("No sites match '{}'", keyword),
        ListState::NoNetwork => "No network connection. Press r to retry".to_string(),
        ListState::Timeout => "The data service timed out. Press r to retry".to_string(),
        ListState::Failed(message) => format!("{} Press r to retry", message),
    }
}

pub fn print_state(state: &ListState) {
    print_step_line(state_icon(state), &state_message(state));
}

/// One record as a fixed-width line.
///
/// ```text
///   新北市 板橋          PM2.5   16.0  AQI  52  普通  03/01 10:00
/// ```
pub fn format_record(record: &Record) -> String {
    let pm25 = record
        .pm25()
        .map(|v| format!("{:>6.1}", v))
        .unwrap_or_else(|| format!("{:>6}", "-"));
    let aqi = record
        .aqi_value()
        .map(|v| format!("{:>3}", v))
        .unwrap_or_else(|| format!("{:>3}", "-"));
    let published = record
        .published_at()
        .map(|t| t.format(PUBLISH_TIME_DISPLAY).to_string())
        .unwrap_or_else(|| record.publish_time.trim().to_string());

    let mut line = format!("  {:<20} PM2.5 {}  AQI {}", record.label(), pm25, aqi);
    if !record.status.is_empty() {
        line.push_str("  ");
        line.push_str(&record.status);
    }
    if !published.is_empty() {
        line.push_str("  ");
        line.push_str(&published);
    }
    line
}

pub fn print_records<'a, I>(title: &str, records: I)
where
    I: IntoIterator<Item = &'a Record>,
{
    let lines: Vec<String> = records.into_iter().map(format_record).collect();
    print_section(title, lines.len());
    if lines.is_empty() {
        println!("  (none)");
    }
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            site_name: "Banqiao".to_string(),
            county: "New Taipei".to_string(),
            aqi: "52".to_string(),
            status: "Moderate".to_string(),
            pm25: "16".to_string(),
            publish_time: "2024/03/01 10:00:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_record() {
        let line = format_record(&record());
        assert!(line.contains("New Taipei Banqiao"));
        assert!(line.contains("PM2.5   16.0"));
        assert!(line.contains("AQI  52"));
        assert!(line.contains("Moderate"));
        assert!(line.ends_with("03/01 10:00"));
    }

    #[test]
    fn test_format_record_missing_readings() {
        let mut record = record();
        record.pm25 = "ND".to_string();
        record.aqi = String::new();
        record.publish_time = "soon".to_string();

        let line = format_record(&record);
        assert!(line.contains("PM2.5      -"));
        assert!(line.contains("AQI   -"));
        assert!(line.ends_with("soon"));
    }

    #[test]
    fn test_state_messages() {
        assert_eq!(
            state_message(&ListState::NotFound("xyz".to_string())),
            "No sites match 'xyz'"
        );
        assert!(state_message(&ListState::NoNetwork).contains("No network"));
        assert!(state_message(&ListState::Timeout).contains("timed out"));
        assert!(state_message(&ListState::Failed("Bad data.".to_string())).starts_with("Bad data."));
    }

    #[test]
    fn test_error_states_use_warning_or_failure_icons() {
        assert_eq!(state_icon(&ListState::NoNetwork), icons::WARNING);
        assert_eq!(state_icon(&ListState::Timeout), icons::WARNING);
        assert_eq!(state_icon(&ListState::Failed(String::new())), icons::FAILURE);
        assert_eq!(state_icon(&ListState::ShowAll), icons::SUCCESS);
    }
}
