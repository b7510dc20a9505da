use indexmap::IndexMap;
use strsim::jaro_winkler;

use super::label::normalize;

/// Minimum similarity score (Jaro-Winkler) for an existing label to be
/// surfaced as a possible duplicate of a new one.
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 0.82;

/// Maximum number of duplicate suggestions surfaced per lookup.
pub const DEFAULT_MAX_RESULTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub max_results: usize,
    pub similarity_cutoff: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            similarity_cutoff: DEFAULT_SIMILARITY_CUTOFF,
        }
    }
}

/// Rank `existing_labels` by similarity to `candidate` and return the ones at
/// or above the cutoff, best first, capped at `max_results`.
///
/// Labels are compared in normalized form; the returned strings are one
/// representative original spelling per normalized form (last write wins when
/// several raw spellings normalize identically). Ties keep first-appearance
/// order. Empty candidate or an empty/over-cutoff-free pool yields an empty
/// vec.
///
/// Advisory only: callers surface these to a human and must never merge
/// records on the strength of a suggestion alone.
pub fn find_similar<S: AsRef<str>>(
    candidate: &str,
    existing_labels: &[S],
    opts: &MatchOptions,
) -> Vec<String> {
    let target = normalize(candidate);
    if target.is_empty() || opts.max_results == 0 {
        return Vec::new();
    }

    // normalized form -> representative original spelling, insertion-ordered
    let mut representatives: IndexMap<String, String> = IndexMap::new();
    for label in existing_labels {
        let raw = label.as_ref();
        let normalized = normalize(raw);
        if normalized.is_empty() {
            continue;
        }
        representatives.insert(normalized, raw.to_string());
    }

    let mut scored: Vec<(f64, &str)> = representatives
        .iter()
        .filter_map(|(normalized, original)| {
            let score = jaro_winkler(&target, normalized);
            (score >= opts.similarity_cutoff).then_some((score, original.as_str()))
        })
        .collect();

    // Stable sort keeps first-appearance order among equal scores.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(opts.max_results);
    scored.into_iter().map(|(_, label)| label.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_near_duplicate_above_cutoff() {
        let existing = ["LULULEMON".to_string(), "NIKE".to_string()];
        let matches = find_similar("Lulu Lemon", &existing, &MatchOptions::default());
        assert_eq!(matches, vec!["LULULEMON".to_string()]);
    }

    #[test]
    fn empty_candidate_or_pool() {
        let empty: [&str; 0] = [];
        assert!(find_similar("Nike", &empty, &MatchOptions::default()).is_empty());
        assert!(find_similar("", &["NIKE"], &MatchOptions::default()).is_empty());
        assert!(find_similar("   !!", &["NIKE"], &MatchOptions::default()).is_empty());
    }

    #[test]
    fn filters_out_dissimilar_labels() {
        let matches = find_similar("Lulu Lemon", &["ZARA", "NIKE"], &MatchOptions::default());
        assert!(matches.is_empty());
    }

    #[test]
    fn skips_blank_entries_in_pool() {
        let existing = ["".to_string(), "   ".to_string(), "NIKE".to_string()];
        let matches = find_similar("nike", &existing, &MatchOptions::default());
        assert_eq!(matches, vec!["NIKE".to_string()]);
    }

    #[test]
    fn caps_results_and_ranks_best_first() {
        let existing = ["NIKEE", "NIKA", "NIKE", "NIKES"];
        let opts = MatchOptions {
            max_results: 2,
            similarity_cutoff: 0.82,
        };
        let matches = find_similar("Nike", &existing, &opts);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], "NIKE");
    }

    #[test]
    fn representative_spelling_is_last_write() {
        // Both raw labels normalize to "NIKE"; the later spelling wins.
        let existing = ["nike!", "Nike"];
        let matches = find_similar("nike", &existing, &MatchOptions::default());
        assert_eq!(matches, vec!["Nike".to_string()]);
    }
}
