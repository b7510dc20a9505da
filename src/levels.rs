//! Price-level enumeration. The set of valid levels is deployment
//! configuration, not a compiled-in constant: revisions of the log have
//! disagreed on whether MID/LOW exist, so the closed set comes from the
//! `PRICE_LEVELS` env var and only falls back to the defaults below.

use crate::normalization::normalize;
use crate::util::env as env_util;

pub const PRICE_LEVELS_ENV: &str = "PRICE_LEVELS";

/// Fallback set used when `PRICE_LEVELS` is unset.
pub const DEFAULT_PRICE_LEVELS: [&str; 3] = ["VERY HIGH END", "HIGH END", "MID HIGH"];

/// Closed set of valid price levels, each stored in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevelSet {
    levels: Vec<String>,
}

impl Default for PriceLevelSet {
    fn default() -> Self {
        Self {
            levels: DEFAULT_PRICE_LEVELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl PriceLevelSet {
    /// Load the configured set from the environment, falling back to
    /// [`DEFAULT_PRICE_LEVELS`] when `PRICE_LEVELS` is unset or empty.
    pub fn from_env() -> Self {
        match env_util::env_opt(PRICE_LEVELS_ENV) {
            Some(raw) => Self::parse(&raw),
            None => Self::default(),
        }
    }

    /// Parse a comma-separated list; entries are normalized, blanks dropped,
    /// duplicates keep their first position. An all-blank list falls back to
    /// the defaults.
    pub fn parse(raw: &str) -> Self {
        let mut levels: Vec<String> = Vec::new();
        for entry in raw.split(',') {
            let level = normalize(entry);
            if !level.is_empty() && !levels.contains(&level) {
                levels.push(level);
            }
        }
        if levels.is_empty() {
            return Self::default();
        }
        Self { levels }
    }

    /// Membership check; the input is normalized before comparison.
    pub fn contains(&self, level: &str) -> bool {
        let level = normalize(level);
        self.levels.iter().any(|l| *l == level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_production_set() {
        let set = PriceLevelSet::default();
        assert!(set.contains("VERY HIGH END"));
        assert!(set.contains("high end"));
        assert!(set.contains("MID HIGH"));
        assert!(!set.contains("LOW"));
    }

    #[test]
    fn parses_and_normalizes_configured_levels() {
        let set = PriceLevelSet::parse("mid,  low , LOW");
        assert_eq!(set.as_slice(), &["MID".to_string(), "LOW".to_string()]);
        assert!(set.contains("low"));
        assert!(!set.contains("HIGH END"));
    }

    #[test]
    fn blank_configuration_falls_back_to_defaults() {
        assert_eq!(PriceLevelSet::parse(" , ,"), PriceLevelSet::default());
    }
}
