//! Ordering helpers shared by every returned symbol list.

use std::cmp::Ordering;

/// Case-insensitive lexical comparison, the ordering applied to every
/// export/import list this crate returns.
pub(crate) fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort names case-insensitively in place.
pub(crate) fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by(|a, b| cmp_case_insensitive(a, b));
}
