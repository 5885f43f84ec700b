//! Cache key and TTL policy
//!
//! Keys are pure functions of the request inputs: identical requests always
//! land on the same entry, and requests that differ in any
//! result-set-shaping parameter never collide.

use std::time::Duration;

/// TTL for cached top-track and top-artist collections
pub(crate) const TOP_ITEMS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Profiles change rarely; entries persist until store-level eviction
pub(crate) const PROFILE_TTL: Option<Duration> = None;

pub(crate) fn profile_key(user_id: &str) -> String {
    format!("profile:{}", user_id)
}

pub(crate) fn top_tracks_key(user_id: &str, hide_explicit: bool, limit: usize) -> String {
    format!("top-tracks:{}:{}:{}", user_id, hide_explicit, limit)
}

pub(crate) fn top_artists_key(user_id: &str, limit: usize) -> String {
    format!("top-artists:{}:{}", user_id, limit)
}
