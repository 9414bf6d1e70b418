//! Rendering the community view.
//!
//! The display surface is a trait so the refresh loop is testable headless;
//! the production implementation prints a text dashboard.

use crate::aggregate::{CommunityStats, DinoCard};

pub trait CommunityView: Send {
    fn render(&mut self, cards: &[DinoCard], stats: &CommunityStats);
}

#[derive(Debug, Default)]
pub struct ConsoleView;

impl CommunityView for ConsoleView {
    fn render(&mut self, cards: &[DinoCard], stats: &CommunityStats) {
        println!(
            "── dinopal community ── {} dinos · {} dumplings · {} online now",
            stats.total_users,
            stats.total_dumplings.round() as i64,
            stats.online_count
        );
        for card in cards {
            let badge = if card.online { "🟢 Online" } else { "⚫ Offline" };
            println!(
                "{}  {}  {} • {}  ❤️ {}% • 🥟 {} today",
                card.emoji, card.name, badge, card.activity, card.health, card.dumplings
            );
        }
    }
}
