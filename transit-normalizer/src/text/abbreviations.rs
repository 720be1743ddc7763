//! Abbreviation tables used by label cleanup.
//!
//! Street types and known phrases are matched as whole words, ignoring
//! case. The replacement forms are also the tokens that title-casing must
//! leave alone.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Street-type words and their abbreviations.
const STREET_TYPES: &[(&str, &str)] = &[
    ("avenue", "Ave"),
    ("boulevard", "Blvd"),
    ("centre", "Ctr"),
    ("center", "Ctr"),
    ("court", "Ct"),
    ("crescent", "Cr"),
    ("drive", "Dr"),
    ("gate", "Gt"),
    ("heights", "Hts"),
    ("highway", "Hwy"),
    ("lake", "Lk"),
    ("lane", "Ln"),
    ("meadows", "Mdws"),
    ("mountain", "Mtn"),
    ("parkway", "Pkwy"),
    ("place", "Pl"),
    ("road", "Rd"),
    ("square", "Sq"),
    ("street", "St"),
    ("terrace", "Terr"),
    ("trail", "Trl"),
];

/// Multi-word phrases and their replacements. An empty replacement strips
/// the phrase.
const PHRASES: &[(&str, &str)] = &[
    (r"high\s+school", "HS"),
    (r"transit\s+hub", ""),
    (r"park\s*&\s*ride", "P&R"),
    (r"regional\s+transit", "RT"),
];

/// Tokens written in a fixed case regardless of the surrounding label.
const FIXED_CASE: &[&str] = &["HS", "LRT", "PDC", "P&R", "RT", "II", "III", "IV"];

/// Ordinal words and their numeric forms.
const ORDINALS: &[(&str, &str)] = &[
    ("first", "1st"),
    ("second", "2nd"),
    ("third", "3rd"),
    ("fourth", "4th"),
    ("fifth", "5th"),
    ("sixth", "6th"),
    ("seventh", "7th"),
    ("eighth", "8th"),
    ("ninth", "9th"),
    ("tenth", "10th"),
    ("eleventh", "11th"),
    ("twelfth", "12th"),
];

fn whole_word_table(table: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    table
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!(r"(?i)\b{pattern}\b"))
                .expect("abbreviation patterns are valid regexes");
            (re, *replacement)
        })
        .collect()
}

pub(super) static STREET_TYPE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| whole_word_table(STREET_TYPES));

pub(super) static PHRASE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| whole_word_table(PHRASES));

pub(super) static ORDINAL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| whole_word_table(ORDINALS));

/// Lowercased fixed-case token → its canonical spelling.
static FIXED_CASE_TOKENS: LazyLock<Vec<(String, &'static str)>> = LazyLock::new(|| {
    STREET_TYPES
        .iter()
        .map(|(_, abbr)| *abbr)
        .chain(FIXED_CASE.iter().copied())
        .collect::<HashSet<_>>()
        .into_iter()
        .map(|token| (token.to_lowercase(), token))
        .collect()
});

/// Returns the canonical spelling if `word` is a fixed-case token.
pub(super) fn fixed_case(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    FIXED_CASE_TOKENS
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, token)| *token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_case_lookup() {
        assert_eq!(fixed_case("hs"), Some("HS"));
        assert_eq!(fixed_case("LK"), Some("Lk"));
        assert_eq!(fixed_case("p&r"), Some("P&R"));
        assert_eq!(fixed_case("Banff"), None);
    }

    #[test]
    fn street_patterns_are_whole_word() {
        let (re, _) = STREET_TYPE_PATTERNS
            .iter()
            .find(|(_, abbr)| *abbr == "Lk")
            .unwrap();
        assert!(re.is_match("Lake Louise"));
        assert!(re.is_match("LAKE"));
        assert!(!re.is_match("Lakeshore"));
    }

    #[test]
    fn abbreviations_are_not_words_in_the_table() {
        // Replacements must not match any pattern again.
        for (_, abbr) in STREET_TYPES {
            for (re, _) in STREET_TYPE_PATTERNS.iter() {
                assert!(!re.is_match(abbr), "{abbr} matches {re}");
            }
        }
    }
}
