//! Label cleanup steps and the per-label pipelines built from them.

use std::sync::LazyLock;

use regex::Regex;
use titlecase::titlecase;

use super::abbreviations::{
    ORDINAL_PATTERNS, PHRASE_PATTERNS, STREET_TYPE_PATTERNS, fixed_case,
};

/// Upper bound on pipeline passes. Every step shortens the text or only
/// changes letter case, so real labels settle in two passes.
const MAX_PASSES: usize = 8;

static ROUTE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*route\s+\d+[a-z]?\b(?:\s*(?:&|\band\b)\s*\d+[a-z]?\b)?\s*-?\s*")
        .expect("route marker pattern is valid")
});

static AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\band\b").expect("and pattern is valid"));

static STOP_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bstop\s*#?\s*\d+\b|#\s*\d+\b|\(\s*\d+\s*\))")
        .expect("stop code pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static REPEATED_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(?:\s*-)+").expect("dash pattern is valid"));

static LEADING_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-&,/]+").expect("leading separator pattern is valid"));

static TRAILING_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-&,/]+$").expect("trailing separator pattern is valid"));

/// Strip a leading "route 8S -" / "Route 5 & 5B -" marker.
pub fn strip_route_marker(text: &str) -> String {
    ROUTE_MARKER.replace(text, "").into_owned()
}

/// Replace the word "and" (any case) with "&".
pub fn clean_and(text: &str) -> String {
    AND.replace_all(text, "&").into_owned()
}

/// Abbreviate street types ("Street" → "St", "Lake" → "Lk", ...).
pub fn clean_street_types(text: &str) -> String {
    replace_table(text, &STREET_TYPE_PATTERNS)
}

/// Abbreviate or strip known phrases ("High School" → "HS").
pub fn clean_phrases(text: &str) -> String {
    replace_table(text, &PHRASE_PATTERNS)
}

/// Turn ordinal words into numerals and drop stop-code tokens
/// ("#1234", "(1234)", "Stop 1234").
pub fn clean_numbers(text: &str) -> String {
    let text = STOP_CODE.replace_all(text, " ");
    replace_table(&text, &ORDINAL_PATTERNS)
}

/// Final label tidy-up: whitespace, dangling separators and casing.
pub fn clean_label(text: &str) -> String {
    let text = REPEATED_DASH.replace_all(text, "-");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = LEADING_SEPARATORS.replace(&text, "");
    let text = TRAILING_SEPARATORS.replace(&text, "");
    normalize_case(&text)
}

/// Clean a route long name.
pub fn clean_route_long_name(text: &str) -> String {
    until_stable(text, |t| {
        let t = strip_route_marker(t);
        let t = clean_and(&t);
        let t = clean_street_types(&t);
        let t = clean_phrases(&t);
        clean_label(&t)
    })
}

/// Clean a trip headsign.
pub fn clean_trip_headsign(text: &str) -> String {
    until_stable(text, |t| {
        let t = clean_and(t);
        let t = clean_street_types(&t);
        let t = clean_phrases(&t);
        clean_label(&t)
    })
}

/// Clean a stop name.
pub fn clean_stop_name(text: &str) -> String {
    until_stable(text, |t| {
        let t = clean_and(t);
        let t = clean_numbers(&t);
        let t = clean_street_types(&t);
        let t = clean_phrases(&t);
        clean_label(&t)
    })
}

fn replace_table(text: &str, table: &[(Regex, &'static str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Apply `step` until the text stops changing.
fn until_stable(text: &str, step: impl Fn(&str) -> String) -> String {
    let mut current = step(text);
    for _ in 1..MAX_PASSES {
        let next = step(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Title-case labels written entirely in upper or lower case.
///
/// Fixed-case tokens (abbreviations) are ignored when deciding and are
/// restored to their canonical spelling afterwards. Mixed-case labels are
/// left alone.
fn normalize_case(text: &str) -> String {
    let mut has_upper = false;
    let mut has_lower = false;
    for word in text.split(' ').filter(|w| fixed_case(w).is_none()) {
        for c in word.chars().filter(|c| c.is_alphabetic()) {
            has_upper |= c.is_uppercase();
            has_lower |= c.is_lowercase();
        }
    }
    if has_upper == has_lower {
        // Mixed case, or no letters to decide on.
        return text.to_string();
    }

    titlecase(&text.to_lowercase())
        .split(' ')
        .map(|word| fixed_case(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}
