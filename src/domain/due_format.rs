use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Calendar day of an instant in the board's timezone
pub fn local_date(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Human-friendly due label relative to `now`:
/// "09:00 AM" today, "Tomorrow 09:00 AM", else "Tue, Aug 20, 9:00 AM"
pub fn format_due(due: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String {
    let due_local = due.with_timezone(tz);
    let due_day = due_local.date_naive();
    let today = local_date(now, tz);

    if due_day == today {
        due_local.format("%I:%M %p").to_string()
    } else if today.succ_opt() == Some(due_day) {
        format!("Tomorrow {}", due_local.format("%I:%M %p"))
    } else {
        due_local.format("%a, %b %-d, %-I:%M %p").to_string()
    }
}

/// Timestamp written into audit comments ("8/20/2024, 9:00:00 AM")
pub fn audit_timestamp(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Header clock ("09:05 AM")
pub fn clock_label(now: DateTime<Utc>, tz: &Tz) -> String {
    now.with_timezone(tz).format("%I:%M %p").to_string()
}
