//! Community aggregation: user rows in, display cards and totals out.
//!
//! Pure functions over an explicit `now`, recomputed in full on every
//! refresh. The emoji and label tables are fixed match expressions with
//! explicit default arms; a very unhealthy pet forces the sick emoji
//! regardless of its stored state.

use chrono::{DateTime, Utc};
use dinopal_protocol::{PetState, UserRecord, ONLINE_WINDOW_MINUTES};

const SICK_HEALTH_THRESHOLD: u32 = 20;
const SICK_EMOJI: &str = "🦖🤒";
const DEFAULT_EMOJI: &str = "🦕";
const ANONYMOUS_NAME: &str = "Anonymous Dino";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DinoCard {
    pub emoji: String,
    pub name: String,
    pub online: bool,
    pub activity: String,
    pub health: u32,
    pub dumplings: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommunityStats {
    pub total_users: usize,
    pub total_dumplings: f64,
    pub online_count: usize,
}

fn state_emoji(state: PetState) -> &'static str {
    match state {
        PetState::Coding => "🦕💻",
        PetState::Working => "🦖💼",
        PetState::Designing => "🦕🎨",
        PetState::BrowsingProductive => "🦕📖",
        PetState::BrowsingSocial => "🦖📱",
        PetState::BrowsingNews => "🦖📰",
        PetState::BrowsingEntertainment => "🦖🍿",
        PetState::BrowsingShopping => "🦖🛒",
        PetState::Gaming => "🦕🎮",
        PetState::Eating => "🦕🍖",
        PetState::Sick => SICK_EMOJI,
        PetState::Idle => DEFAULT_EMOJI,
        PetState::Unknown => DEFAULT_EMOJI,
    }
}

fn activity_label(state: PetState) -> &'static str {
    match state {
        PetState::Coding => "Coding",
        PetState::Working => "Working",
        PetState::Designing => "Designing",
        PetState::BrowsingProductive => "Learning",
        PetState::BrowsingSocial => "Social Media",
        PetState::BrowsingNews => "Reading News",
        PetState::BrowsingEntertainment => "Entertainment",
        PetState::BrowsingShopping => "Shopping",
        PetState::Gaming => "Gaming",
        PetState::Eating => "Feeding",
        PetState::Idle => "Chilling",
        // The label table never covered sick pets; they read as Unknown
        // while still getting the sick emoji above.
        PetState::Sick | PetState::Unknown => "Unknown",
    }
}

pub fn build_card(record: &UserRecord, now: DateTime<Utc>) -> DinoCard {
    let health = record.health_display();
    let emoji = if health < SICK_HEALTH_THRESHOLD {
        SICK_EMOJI.to_string()
    } else {
        state_emoji(record.current_state).to_string()
    };

    DinoCard {
        emoji,
        name: record
            .username
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
        online: record.is_active_within(now, ONLINE_WINDOW_MINUTES),
        activity: activity_label(record.current_state).to_string(),
        health,
        dumplings: record.session_dumplings_display(),
    }
}

/// Builds cards in the provided order (the source sorts by recency).
pub fn build_cards(records: &[UserRecord], now: DateTime<Utc>) -> Vec<DinoCard> {
    records.iter().map(|record| build_card(record, now)).collect()
}

pub fn build_stats(records: &[UserRecord], now: DateTime<Utc>) -> CommunityStats {
    CommunityStats {
        total_users: records.len(),
        total_dumplings: records.iter().map(|record| record.total_earned()).sum(),
        online_count: records
            .iter()
            .filter(|record| record.is_active_within(now, ONLINE_WINDOW_MINUTES))
            .count(),
    }
}

/// Full aggregation pass: cards plus totals, in one call.
///
/// An empty collection yields the hand-authored fallback set rather than an
/// empty render; the caller never has to special-case "no data".
pub fn aggregate(records: &[UserRecord], now: DateTime<Utc>) -> (Vec<DinoCard>, CommunityStats) {
    if records.is_empty() {
        return (fallback_cards(), fallback_stats());
    }
    (build_cards(records, now), build_stats(records, now))
}

/// Hand-authored placeholder cards shown when the source has no data.
pub fn fallback_cards() -> Vec<DinoCard> {
    vec![
        DinoCard {
            emoji: "🦕💻".to_string(),
            name: "Bobby (Creator)".to_string(),
            online: true,
            activity: "Building the app!".to_string(),
            health: 100,
            dumplings: 156,
        },
        DinoCard {
            emoji: DEFAULT_EMOJI.to_string(),
            name: "Your Dino".to_string(),
            online: false,
            activity: "Join the community!".to_string(),
            health: 100,
            dumplings: 0,
        },
    ]
}

pub fn fallback_stats() -> CommunityStats {
    CommunityStats {
        total_users: 1,
        total_dumplings: 156.0,
        online_count: 1,
    }
}
