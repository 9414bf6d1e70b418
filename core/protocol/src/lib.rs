//! Wire schema for the dinopal `users` collection.
//!
//! This crate is shared by the desktop agent (which reports presence) and the
//! community site (which reads the collection) to prevent schema drift. The
//! remote data source is the authority on storage; both sides reuse these
//! types to stay in agreement about field names and coercion rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Activity window used for the online/offline badge, in minutes.
pub const ONLINE_WINDOW_MINUTES: i64 = 30;

/// Activity state a pet can be in, as stored in the `current_state` column.
///
/// Unrecognized values deserialize to [`PetState::Unknown`] instead of
/// failing the whole row; display code resolves those to its defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetState {
    Idle,
    Working,
    Coding,
    Designing,
    BrowsingProductive,
    BrowsingSocial,
    BrowsingNews,
    BrowsingEntertainment,
    BrowsingShopping,
    Gaming,
    Eating,
    Sick,
    Unknown,
}

impl Serialize for PetState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PetState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(PetState::from_str(&value).unwrap_or(PetState::Unknown))
    }
}

impl Default for PetState {
    fn default() -> Self {
        PetState::Unknown
    }
}

impl PetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetState::Idle => "idle",
            PetState::Working => "working",
            PetState::Coding => "coding",
            PetState::Designing => "designing",
            PetState::BrowsingProductive => "browsing_productive",
            PetState::BrowsingSocial => "browsing_social",
            PetState::BrowsingNews => "browsing_news",
            PetState::BrowsingEntertainment => "browsing_entertainment",
            PetState::BrowsingShopping => "browsing_shopping",
            PetState::Gaming => "gaming",
            PetState::Eating => "eating",
            PetState::Sick => "sick",
            PetState::Unknown => "unknown",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "idle" => Some(PetState::Idle),
            "working" => Some(PetState::Working),
            "coding" => Some(PetState::Coding),
            "designing" => Some(PetState::Designing),
            "browsing_productive" => Some(PetState::BrowsingProductive),
            "browsing_social" => Some(PetState::BrowsingSocial),
            "browsing_news" => Some(PetState::BrowsingNews),
            "browsing_entertainment" => Some(PetState::BrowsingEntertainment),
            "browsing_shopping" => Some(PetState::BrowsingShopping),
            "gaming" => Some(PetState::Gaming),
            "eating" => Some(PetState::Eating),
            "sick" => Some(PetState::Sick),
            _ => None,
        }
    }
}

/// One row of the `users` collection as the site reads it.
///
/// The remote rows carry more columns than we consume; extra fields are
/// ignored on deserialize. Every field the display depends on is optional and
/// coerced through the accessors below, so a sparse or half-provisioned row
/// still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub current_state: PetState,
    #[serde(default)]
    pub health: Option<f64>,
    #[serde(default)]
    pub session_dumplings: Option<f64>,
    #[serde(default)]
    pub total_dumplings_earned: Option<f64>,
    #[serde(default)]
    pub last_activity: Option<String>,
}

impl UserRecord {
    /// Health as displayed: rounded, non-negative, absent rows read as 100.
    pub fn health_display(&self) -> u32 {
        match self.health {
            Some(value) => value.round().max(0.0) as u32,
            None => 100,
        }
    }

    /// Session dumplings as displayed: rounded, non-negative, absent reads 0.
    pub fn session_dumplings_display(&self) -> u32 {
        match self.session_dumplings {
            Some(value) => value.round().max(0.0) as u32,
            None => 0,
        }
    }

    /// Lifetime dumpling total, absent reads 0.
    pub fn total_earned(&self) -> f64 {
        self.total_dumplings_earned.unwrap_or(0.0)
    }

    pub fn last_activity_time(&self) -> Option<DateTime<Utc>> {
        self.last_activity
            .as_deref()
            .and_then(parse_rfc3339)
    }

    /// True when the row saw activity strictly within `window_minutes` of
    /// `now`. Rows with no timestamp are never active.
    pub fn is_active_within(&self, now: DateTime<Utc>, window_minutes: i64) -> bool {
        match self.last_activity_time() {
            Some(seen) => now.signed_duration_since(seen).num_seconds() < window_minutes * 60,
            None => false,
        }
    }
}

/// Upsert payload the agent sends to keep its own row current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceReport {
    pub user_id: String,
    pub username: String,
    pub current_state: PetState,
    pub health: f64,
    pub session_dumplings: f64,
    pub total_dumplings_earned: f64,
    pub last_activity: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("user_id is required")]
    MissingUserId,
    #[error("user_id must be 128 characters or fewer")]
    UserIdTooLong,
    #[error("last_activity must be RFC3339")]
    BadTimestamp,
    #[error("health must be between 0 and 100")]
    HealthOutOfRange,
}

impl PresenceReport {
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.user_id.trim().is_empty() {
            return Err(ReportError::MissingUserId);
        }
        if self.user_id.len() > 128 {
            return Err(ReportError::UserIdTooLong);
        }
        if parse_rfc3339(&self.last_activity).is_none() {
            return Err(ReportError::BadTimestamp);
        }
        if !(0.0..=100.0).contains(&self.health) {
            return Err(ReportError::HealthOutOfRange);
        }
        Ok(())
    }
}

pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(value: &str) -> DateTime<Utc> {
        parse_rfc3339(value).expect("parse")
    }

    fn base_report() -> PresenceReport {
        PresenceReport {
            user_id: "user-1".to_string(),
            username: "Rex".to_string(),
            current_state: PetState::Coding,
            health: 85.0,
            session_dumplings: 3.0,
            total_dumplings_earned: 42.0,
            last_activity: "2026-08-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn unknown_state_string_deserializes_to_unknown() {
        let record: UserRecord =
            serde_json::from_str(r#"{"current_state":"meditating"}"#).expect("parse");
        assert_eq!(record.current_state, PetState::Unknown);
    }

    #[test]
    fn state_round_trips_through_str() {
        for state in [
            PetState::Idle,
            PetState::Working,
            PetState::Coding,
            PetState::BrowsingSocial,
            PetState::Sick,
        ] {
            assert_eq!(PetState::from_str(state.as_str()), Some(state));
        }
        assert_eq!(PetState::from_str("unknown"), None);
    }

    #[test]
    fn record_tolerates_extra_columns() {
        let raw = r#"{
            "user_id": "u1",
            "username": "Rex",
            "current_state": "coding",
            "health": 85,
            "session_dumplings": 3,
            "total_dumplings_earned": 42,
            "last_activity": "2026-08-01T12:00:00Z",
            "happiness": 90,
            "coding_time_today": 120
        }"#;
        let record: UserRecord = serde_json::from_str(raw).expect("parse");
        assert_eq!(record.username.as_deref(), Some("Rex"));
        assert_eq!(record.current_state, PetState::Coding);
    }

    #[test]
    fn health_defaults_to_full_and_clamps_negative() {
        let mut record = UserRecord::default();
        assert_eq!(record.health_display(), 100);

        record.health = Some(-3.0);
        assert_eq!(record.health_display(), 0);

        record.health = Some(84.6);
        assert_eq!(record.health_display(), 85);
    }

    #[test]
    fn dumplings_default_to_zero() {
        let mut record = UserRecord::default();
        assert_eq!(record.session_dumplings_display(), 0);
        assert_eq!(record.total_earned(), 0.0);

        record.session_dumplings = Some(2.4);
        assert_eq!(record.session_dumplings_display(), 2);
    }

    #[test]
    fn activity_window_is_strict() {
        let now = at("2026-08-01T12:00:00Z");
        let mut record = UserRecord::default();
        assert!(!record.is_active_within(now, ONLINE_WINDOW_MINUTES));

        record.last_activity = Some((now - Duration::minutes(10)).to_rfc3339());
        assert!(record.is_active_within(now, ONLINE_WINDOW_MINUTES));

        record.last_activity = Some((now - Duration::minutes(30)).to_rfc3339());
        assert!(!record.is_active_within(now, ONLINE_WINDOW_MINUTES));

        record.last_activity = Some("garbage".to_string());
        assert!(!record.is_active_within(now, ONLINE_WINDOW_MINUTES));
    }

    #[test]
    fn validates_report() {
        assert!(base_report().validate().is_ok());
    }

    #[test]
    fn rejects_blank_user_id() {
        let mut report = base_report();
        report.user_id = "  ".to_string();
        assert_eq!(report.validate(), Err(ReportError::MissingUserId));
    }

    #[test]
    fn rejects_bad_timestamp() {
        let mut report = base_report();
        report.last_activity = "yesterday".to_string();
        assert_eq!(report.validate(), Err(ReportError::BadTimestamp));
    }

    #[test]
    fn rejects_out_of_range_health() {
        let mut report = base_report();
        report.health = 120.0;
        assert_eq!(report.validate(), Err(ReportError::HealthOutOfRange));
    }
}
