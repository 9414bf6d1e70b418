//! The refresh loop: fetch, aggregate, render, repeat.
//!
//! Any fetch failure or an empty collection renders the fixed fallback set
//! instead of nothing. No retry inside a tick; the next tick fetches fresh.

use chrono::Utc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::aggregate::{aggregate, fallback_cards, fallback_stats};
use crate::fetch::UserDirectory;
use crate::render::CommunityView;

pub fn refresh_once(directory: &dyn UserDirectory, view: &mut dyn CommunityView) {
    let now = Utc::now();
    match directory.fetch_users() {
        Ok(records) => {
            if records.is_empty() {
                debug!("User collection empty; rendering fallback");
            }
            let (cards, stats) = aggregate(&records, now);
            view.render(&cards, &stats);
        }
        Err(err) if err.is_benign() => {
            debug!(error = %err, "No data yet; rendering fallback");
            view.render(&fallback_cards(), &fallback_stats());
        }
        Err(err) => {
            warn!(error = %err, "Fetch failed; rendering fallback");
            view.render(&fallback_cards(), &fallback_stats());
        }
    }
}

pub fn run(
    directory: &dyn UserDirectory,
    view: &mut dyn CommunityView,
    interval: Duration,
) {
    loop {
        refresh_once(directory, view);
        thread::sleep(interval);
    }
}
