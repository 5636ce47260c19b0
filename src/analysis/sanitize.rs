//! Turns display labels into unique identifiers that are valid in every backend.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_MAX_NAME_LEN: usize = 30;

/// A token spelled out as a word before sanitization, e.g. `%` -> ` perc `.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialToken {
    pub token: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub max_len: usize,
    pub special_tokens: Vec<SpecialToken>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_NAME_LEN,
            special_tokens: vec![SpecialToken { token: "%".into(), word: "perc".into() }],
        }
    }
}

/// Lower-cases, spells out special tokens, collapses whitespace, replaces
/// non-word characters with `_` and truncates to `max_len` characters.
///
/// The result is never empty and never starts with a digit, but it is not
/// guaranteed unique; see [`unique_name`].
pub fn sanitize(label: &str, config: &SanitizerConfig) -> String {
    let mut text = label.to_lowercase();
    for special in &config.special_tokens {
        if !special.token.is_empty() {
            text = text.replace(&special.token, &format!(" {} ", special.word));
        }
    }

    let mut name = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
        } else {
            // One `_` per UTF-16 code unit, so astral characters become `__`.
            name.extend(std::iter::repeat('_').take(c.len_utf16()));
        }
    }

    let mut name: String = name.chars().take(config.max_len).collect();
    if name.is_empty() {
        name.push('_');
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Sanitizes `label` and makes it unique against `used`, registering the result.
///
/// Collisions first gain `_2`; each further retry appends `_<n>` to the
/// already-suffixed candidate (`foo`, `foo_2`, `foo_2_3`, `foo_2_3_4`, ...).
pub fn unique_name(label: &str, used: &mut HashSet<String>, config: &SanitizerConfig) -> String {
    let mut candidate = sanitize(label, config);
    if used.contains(&candidate) {
        candidate.push_str("_2");
        let mut counter = 3;
        while used.contains(&candidate) {
            candidate = format!("{}_{}", candidate, counter);
            counter += 1;
        }
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Revenue", "revenue")]
    #[case("Revenue %", "revenue_perc_")]
    #[case("Cost  per\tunit", "cost_per_unit")]
    #[case("Growth-rate (y/y)", "growth_rate__y_y_")]
    #[case("2024 sales", "_2024_sales")]
    #[case("", "_")]
    #[case("Café", "caf_")]
    #[case("Launch 🚀", "launch___")]
    fn test_sanitize(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(sanitize(label, &SanitizerConfig::default()), expected);
    }

    #[test]
    fn test_truncates_to_configured_length() {
        let label = "a very long metric name that keeps going";
        assert_eq!(sanitize(label, &SanitizerConfig::default()).len(), DEFAULT_MAX_NAME_LEN);

        let short = SanitizerConfig { max_len: 20, ..Default::default() };
        assert_eq!(sanitize(label, &short), "a_very_long_metric_n");
    }

    #[test]
    fn test_digit_prefix_added_after_truncation() {
        let config = SanitizerConfig { max_len: 3, ..Default::default() };
        assert_eq!(sanitize("12345", &config), "_123");
    }

    #[test]
    fn test_custom_special_tokens() {
        let config = SanitizerConfig {
            special_tokens: vec![
                SpecialToken { token: "%".into(), word: "pct".into() },
                SpecialToken { token: "$".into(), word: "usd".into() },
            ],
            ..Default::default()
        };
        assert_eq!(sanitize("Margin % in $", &config), "margin_pct_in_usd_");
    }

    #[test]
    fn test_collisions_extend_suffixed_name() {
        let config = SanitizerConfig::default();
        let mut used = HashSet::new();
        let names: Vec<String> = (0..4).map(|_| unique_name("Foo", &mut used, &config)).collect();
        assert_eq!(names, vec!["foo", "foo_2", "foo_2_3", "foo_2_3_4"]);
    }

    #[test]
    fn test_naming_is_repeatable() {
        let config = SanitizerConfig::default();
        let labels = ["Users", "users", "USERS", "Users!"];
        let run = || {
            let mut used = HashSet::new();
            labels.iter().map(|l| unique_name(l, &mut used, &config)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
        assert_eq!(run(), vec!["users", "users_2", "users_2_3", "users_"]);
    }
}
