use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::models::Timestamped;

/// Returns the tag names matching the regex, preserving order.
///
/// The pattern is compiled during flag validation, so this never fails.
pub fn by_regex(tags: Vec<String>, pattern: &Regex) -> Vec<String> {
    debug!(pattern = %pattern, "Filtering tags with regex");

    tags.into_iter()
        .filter(|tag| {
            let matched = pattern.is_match(tag);
            debug!(tag = %tag, matched, "Matching tag");
            matched
        })
        .collect()
}

/// Returns the items whose last-updated timestamp is strictly before
/// `cutoff`.
///
/// An item without a timestamp is treated as infinitely old and always
/// passes.
pub fn by_age<T: Timestamped>(items: Vec<T>, cutoff: DateTime<Utc>) -> Vec<T> {
    debug!(cutoff = %cutoff, "Filtering items older than the cutoff");

    items
        .into_iter()
        .filter(|item| match item.last_updated() {
            Some(updated) => updated < cutoff,
            None => true,
        })
        .collect()
}

/// Returns everything but the `keep` most-recently-updated items, i.e. the
/// part of the list that is up for deletion.
///
/// Items are stable-sorted newest first; ties keep their original relative
/// order so repeated runs against identical input yield identical results.
/// Missing timestamps sort as oldest.
pub fn by_max_count<T: Timestamped>(mut items: Vec<T>, keep: usize) -> Vec<T> {
    debug!(keep, total = items.len(), "Capping items to the newest n");

    if items.len() <= keep {
        return Vec::new();
    }

    // Option<DateTime> orders None below Some, so descending puts
    // timestamp-less items last.
    items.sort_by(|a, b| b.last_updated().cmp(&a.last_updated()));
    items.split_off(keep)
}
