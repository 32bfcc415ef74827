//! Derived views: pure projections over store collections.
//!
//! Selectors never mutate the underlying collection and are safe to
//! call at any store status — they project whatever is currently
//! cached, including an empty collection mid-load.

use crate::core::api::character::Character;
use crate::core::api::monster::Monster;
use crate::core::api::session::Session;

/// Entities a free-text search can match: name or description.
pub trait Searchable {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Case-insensitive substring filter over name OR description.
/// An empty term matches everything.
pub fn filter_by_search<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return items.iter().collect();
    }
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.name().to_lowercase().contains(&term)
                || item.description().to_lowercase().contains(&term)
        })
        .collect()
}

/// Monsters whose challenge rating equals `cr` exactly.
///
/// CR values are quantized to multiples of 1/8 — dyadic fractions are
/// exactly representable, so equality comparison is well-defined.
pub fn filter_by_challenge(monsters: &[Monster], cr: f64) -> Vec<&Monster> {
    monsters
        .iter()
        .filter(|m| m.challenge_rating == cr)
        .collect()
}

/// Characters belonging to one campaign.
pub fn characters_in_campaign(characters: &[Character], campaign_id: i64) -> Vec<&Character> {
    characters
        .iter()
        .filter(|c| c.campaign_id == campaign_id)
        .collect()
}

/// Sessions belonging to one campaign, in stored order.
pub fn sessions_in_campaign(sessions: &[Session], campaign_id: i64) -> Vec<&Session> {
    sessions
        .iter()
        .filter(|s| s.campaign_id == campaign_id)
        .collect()
}

/// The `limit` most recent sessions, sorted by date descending.
pub fn recent_sessions(sessions: &[Session], limit: usize) -> Vec<&Session> {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
