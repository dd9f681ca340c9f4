use super::due_format::audit_timestamp;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Comment appended when a chore is completed
pub fn completed(at: DateTime<Utc>, tz: &Tz) -> String {
    format!("✅ Completed on {}", audit_timestamp(at, tz))
}

/// Comment appended when a chore is closed as missed
pub fn missed(at: DateTime<Utc>, tz: &Tz) -> String {
    format!("❌ Missed on {}", audit_timestamp(at, tz))
}

pub fn snoozed(hours: u32, new_due: DateTime<Utc>, tz: &Tz) -> String {
    format!("⏰ Snoozed by {}h → now due {}", hours, audit_timestamp(new_due, tz))
}

pub fn deleted(at: DateTime<Utc>, tz: &Tz) -> String {
    format!("Task deleted at {}", audit_timestamp(at, tz))
}
