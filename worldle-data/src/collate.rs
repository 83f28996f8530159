//! Locale-style ordering of country names.
//!
//! Names are compared by a collation key first: canonical decomposition with
//! combining marks removed, then lowercased. "Åland Islands" therefore sorts
//! among the A's instead of after "Zimbabwe". Equal keys fall back to the raw
//! string so the ordering stays total.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Build the primary sort key for a display name.
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two display names for presentation order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
