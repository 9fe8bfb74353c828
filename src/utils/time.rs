use chrono::{DateTime, Local, NaiveDate};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Format a timestamp down to minute granularity ("HH:MM")
pub fn minute_of(time: &DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}

/// Capture the current local date and minute in one call, so a single
/// reminder tick compares every event against the same instant
pub fn local_now_minute() -> (NaiveDate, String) {
    let now = Local::now();
    (now.date_naive(), minute_of(&now))
}
