use crate::domain::{default_roster, Person, ViewMode};
use crate::remote::todoist::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides the stored API token for one run
pub const TOKEN_ENV: &str = "CHOREBOARD_TOKEN";

/// Shortest poll interval accepted from the settings file
const MIN_POLL_SECS: u64 = 5;

/// Board settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    /// Project whose tasks make up the board
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_roster")]
    pub roster: Vec<Person>,
    /// IANA zone used for "today" and for every displayed time
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_snooze_hours")]
    pub snooze_hours: Vec<u32>,
    #[serde(default)]
    pub default_view: ViewMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_project_name() -> String {
    "Chores".to_string()
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_snooze_hours() -> Vec<u32> {
    vec![1, 3, 24]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_base_url: default_base_url(),
            project_name: default_project_name(),
            roster: default_roster(),
            timezone: default_timezone(),
            poll_interval_secs: default_poll_interval_secs(),
            snooze_hours: default_snooze_hours(),
            default_view: ViewMode::default(),
        }
    }
}

impl Settings {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone in settings {:?}: {}", self.timezone, e))
    }

    /// Token to use: the override if set and non-empty, else the stored one.
    /// None when neither is usable, in which case nothing is fetched.
    pub fn effective_token(&self, env_override: Option<String>) -> Option<String> {
        env_override
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .or_else(|| {
                let stored = self.api_token.trim();
                (!stored.is_empty()).then(|| stored.to_string())
            })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(MIN_POLL_SECS))
    }

    /// Repair values the board can't work with
    fn normalize(mut self) -> Self {
        self.roster.retain(|person| !person.name().trim().is_empty());
        if self.roster.is_empty() {
            self.roster = default_roster();
        }
        self.snooze_hours.retain(|hours| *hours > 0);
        if self.snooze_hours.is_empty() {
            self.snooze_hours = default_snooze_hours();
        }
        self
    }
}

/// Load settings from settings.json
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    Ok(settings.normalize())
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.project_name, "Chores");
        assert_eq!(settings.roster.len(), 4);
        assert_eq!(settings.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.api_token = "abc123".to_string();
        settings.roster = vec![Person::new("Ada"), Person::new("Grace")];
        settings.default_view = ViewMode::All;

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"api_token": "xyz", "roster": [], "snooze_hours": [0], "extra": 1}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.api_token, "xyz");
        assert_eq!(settings.roster, default_roster());
        assert_eq!(settings.snooze_hours, vec![1, 3, 24]);
        assert_eq!(settings.timezone, "America/New_York");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_timezone_parsing() {
        let mut settings = Settings::default();
        assert_eq!(settings.timezone().unwrap(), chrono_tz::America::New_York);

        settings.timezone = "Mars/Olympus".to_string();
        assert!(settings.timezone().is_err());
    }

    #[test]
    fn test_effective_token() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_token(None), None);
        assert_eq!(settings.effective_token(Some("  ".to_string())), None);

        settings.api_token = " stored ".to_string();
        assert_eq!(settings.effective_token(None).as_deref(), Some("stored"));
        assert_eq!(
            settings.effective_token(Some("from-env".to_string())).as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn test_poll_interval_floor() {
        let mut settings = Settings::default();
        settings.poll_interval_secs = 0;
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
    }
}
