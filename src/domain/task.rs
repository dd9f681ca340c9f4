use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A member of the household the board has a row for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Person(String);

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Labels are matched case-insensitively, since labels created through
    /// the service may not keep the roster's capitalisation
    pub fn matches_label(&self, label: &str) -> bool {
        self.0.eq_ignore_ascii_case(label.trim())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The roster of the reference household
pub fn default_roster() -> Vec<Person> {
    ["Sujay", "Joy", "Rohan", "Rhea"]
        .into_iter()
        .map(Person::new)
        .collect()
}

/// Time-of-day part of a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueTime {
    /// An absolute instant (the wire value carried an offset)
    Exact(DateTime<Utc>),
    /// A wall-clock time with no offset, read in the board's timezone
    Floating(NaiveDateTime),
}

/// When a task is due: a date, optionally with a time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDue")]
pub struct Due {
    pub date: NaiveDate,
    pub datetime: Option<DueTime>,
    /// Human-readable schedule as the service reports it ("every monday")
    pub string: Option<String>,
    pub is_recurring: bool,
}

#[derive(Deserialize)]
struct RawDue {
    date: String,
    #[serde(default)]
    datetime: Option<String>,
    #[serde(default)]
    string: Option<String>,
    #[serde(default)]
    is_recurring: bool,
}

impl TryFrom<RawDue> for Due {
    type Error = String;

    fn try_from(raw: RawDue) -> Result<Self, Self::Error> {
        let date_part = raw.date.get(..10).unwrap_or(&raw.date);
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| format!("invalid due date {:?}: {}", raw.date, e))?;

        let datetime = match raw.datetime.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(parse_due_time(value)?),
            _ => None,
        };

        Ok(Self {
            date,
            datetime,
            string: raw.string,
            is_recurring: raw.is_recurring,
        })
    }
}

fn parse_due_time(value: &str) -> Result<DueTime, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(DueTime::Exact(instant.with_timezone(&Utc)));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(DueTime::Floating)
        .ok_or_else(|| format!("invalid due datetime {:?}", value))
}

impl Due {
    /// A date-only due
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            datetime: None,
            string: None,
            is_recurring: false,
        }
    }

    /// A due pinned to an exact instant
    pub fn at(instant: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            date: instant.with_timezone(tz).date_naive(),
            datetime: Some(DueTime::Exact(instant)),
            string: None,
            is_recurring: false,
        }
    }

    /// Resolve to an instant: the time if one is set, else local midnight of the date
    pub fn resolve(&self, tz: &Tz) -> DateTime<Utc> {
        match self.datetime {
            Some(DueTime::Exact(instant)) => instant,
            Some(DueTime::Floating(naive)) => local_to_utc(naive, tz),
            None => local_to_utc(self.date.and_time(NaiveTime::MIN), tz),
        }
    }

    pub fn has_time(&self) -> bool {
        self.datetime.is_some()
    }
}

/// Interpret a wall-clock time in `tz`. Times skipped by a DST jump move
/// forward an hour; ambiguous times take the earlier instant.
fn local_to_utc(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// A task as held in the working set
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub project_id: Option<String>,
}

impl Task {
    pub fn resolved_due(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        self.due.as_ref().map(|due| due.resolve(tz))
    }

    /// Index into `roster` of the person this task is assigned to.
    /// The first label (in label order) naming a roster member wins.
    pub fn assignee_index(&self, roster: &[Person]) -> Option<usize> {
        self.labels
            .iter()
            .find_map(|label| roster.iter().position(|person| person.matches_label(label)))
    }

    pub fn assignee<'r>(&self, roster: &'r [Person]) -> Option<&'r Person> {
        self.assignee_index(roster).map(|idx| &roster[idx])
    }

    pub fn is_overdue(&self, now: DateTime<Utc>, tz: &Tz) -> bool {
        self.resolved_due(tz).is_some_and(|due| due < now)
    }
}

/// Identifiers arrive as strings from the current API and as numbers from older ones
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn deserialize_opt_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(String::from))
}

#[cfg(test)]
impl Task {
    pub fn sample(id: &str, content: &str, label: &str, due: Option<Due>) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            labels: vec![label.to_string()],
            due,
            project_id: Some("chores".to_string()),
        }
    }
}
