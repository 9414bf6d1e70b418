//! Mood classification from the foreground application.
//!
//! The rule table is ordered; the first rule whose needle appears anywhere in
//! the lower-cased bundle identifier wins. Everything else, including a
//! missing foreground application, resolves to the idle default.

use dinopal_protocol::PetState;
use serde::Serialize;
use std::time::Duration;

/// Snapshot of the frontmost application, as reported by the host OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub bundle_id: String,
    pub display_name: String,
}

/// A displayable pet mood: what the status item shows and what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mood {
    pub emoji: &'static str,
    pub status: &'static str,
    pub state: PetState,
}

pub const MOOD_IDLE: Mood = Mood {
    emoji: "🦕",
    status: "Just chilling",
    state: PetState::Idle,
};

const MOOD_WORKING: Mood = Mood {
    emoji: "🦖💼",
    status: "Working hard on Slack!",
    state: PetState::Working,
};

const MOOD_CODING: Mood = Mood {
    emoji: "🦕💻",
    status: "Coding like a pro!",
    state: PetState::Coding,
};

const MOOD_BROWSING: Mood = Mood {
    emoji: "🦖😴",
    status: "Browsing the web...",
    state: PetState::BrowsingSocial,
};

struct MoodRule {
    needles: &'static [&'static str],
    mood: Mood,
}

// Order matters: slack outranks the coding and browsing needles, so an
// identifier matching several rules (e.g. "slack-terminal") is working.
static MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        needles: &["slack"],
        mood: MOOD_WORKING,
    },
    MoodRule {
        needles: &["code", "xcode", "terminal"],
        mood: MOOD_CODING,
    },
    MoodRule {
        needles: &["chrome", "safari"],
        mood: MOOD_BROWSING,
    },
];

/// Classifies the frontmost application into a mood.
///
/// `None` (no active application, or the query failed) and identifiers that
/// match no rule both yield [`MOOD_IDLE`].
pub fn classify(app: Option<&AppIdentity>) -> Mood {
    let Some(app) = app else {
        return MOOD_IDLE;
    };

    let bundle_id = app.bundle_id.to_lowercase();
    for rule in MOOD_RULES {
        if rule
            .needles
            .iter()
            .any(|needle| bundle_id.contains(needle))
        {
            return rule.mood;
        }
    }
    MOOD_IDLE
}

/// How long an interaction override stays on screen before reverting.
pub const REACTION_HOLD: Duration = Duration::from_secs(2);

/// A manual interaction with the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Feed,
    Pet,
}

impl Reaction {
    /// The fixed mood shown while the reaction is held.
    pub fn mood(&self) -> Mood {
        match self {
            Reaction::Feed => Mood {
                emoji: "🦕🍖",
                status: "Nom nom!",
                state: PetState::Eating,
            },
            Reaction::Pet => Mood {
                emoji: "🦖✨",
                status: "Feeling loved!",
                state: PetState::Idle,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(bundle_id: &str) -> AppIdentity {
        AppIdentity {
            bundle_id: bundle_id.to_string(),
            display_name: "whatever".to_string(),
        }
    }

    #[test]
    fn slack_classifies_as_working() {
        let mood = classify(Some(&app("com.tinyspeck.slackmacgap")));
        assert_eq!(mood, super::MOOD_WORKING);
        assert_eq!(mood.emoji, "🦖💼");
    }

    #[test]
    fn slack_outranks_other_rules() {
        // Matches both the slack and terminal needles; slack is checked first.
        assert_eq!(classify(Some(&app("io.slack-terminal"))), super::MOOD_WORKING);
    }

    #[test]
    fn editors_and_terminals_classify_as_coding() {
        for id in [
            "com.microsoft.VSCode",
            "com.apple.dt.Xcode",
            "com.apple.Terminal",
        ] {
            assert_eq!(classify(Some(&app(id))), super::MOOD_CODING, "{id}");
        }
    }

    #[test]
    fn browsers_classify_as_browsing() {
        assert_eq!(classify(Some(&app("com.google.Chrome"))), super::MOOD_BROWSING);
        assert_eq!(classify(Some(&app("com.apple.Safari"))), super::MOOD_BROWSING);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify(Some(&app("COM.GOOGLE.CHROME"))), super::MOOD_BROWSING);
    }

    #[test]
    fn unrecognized_bundle_id_is_idle() {
        assert_eq!(classify(Some(&app("com.spotify.client"))), MOOD_IDLE);
    }

    #[test]
    fn empty_bundle_id_is_idle() {
        assert_eq!(classify(Some(&app(""))), MOOD_IDLE);
    }

    #[test]
    fn no_active_application_is_idle() {
        assert_eq!(classify(None), MOOD_IDLE);
    }

    #[test]
    fn reactions_have_fixed_moods() {
        assert_eq!(Reaction::Feed.mood().emoji, "🦕🍖");
        assert_eq!(Reaction::Pet.mood().emoji, "🦖✨");
    }
}
