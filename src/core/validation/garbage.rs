//! Placeholder and keyboard-mash detection for free-text fields
//!
//! The word lists are deliberately exact: keyboard sequences must match the
//! whole value, placeholder words match as a prefix. A surname such as
//! "Testford" is therefore rejected; widening or narrowing either list is a
//! product decision.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Message shown for any garbage-text hit, whichever heuristic fired
pub const GARBAGE_TEXT_MESSAGE: &str =
    "Please enter real information rather than test or placeholder text";

/// Fields screened in addition to every field whose name contains "name"
const SCREENED_FIELDS: &[&str] = &[
    "color",
    "breed",
    "emergencyRelationship",
    "clinicName",
    "markings",
];

const PLACEHOLDER_PREFIXES: &[&str] = &[
    "test",
    "demo",
    "sample",
    "example",
    "fake",
    "dummy",
    "placeholder",
    "asdf",
];

const KEYBOARD_SEQUENCES: &[&str] = &[
    "qwerty",
    "qwertyuiop",
    "asdf",
    "asdfgh",
    "asdfghjkl",
    "zxcv",
    "zxcvbn",
    "zxcvbnm",
    "hjkl",
    "abc",
    "abcd",
    "abcdef",
    "xyz",
];

/// Which heuristic matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GarbageMatch {
    RepeatedCharacter,
    DigitsOnly,
    LettersAndDigits,
    PlaceholderWord,
    KeyboardSequence,
}

/// Whether the garbage heuristic screens this field
pub fn applies_to(field: &str) -> bool {
    field.contains("name") || field.contains("Name") || SCREENED_FIELDS.contains(&field)
}

/// Run every heuristic against an already-trimmed value
pub fn detect(value: &str) -> Option<GarbageMatch> {
    if value.is_empty() {
        return None;
    }
    let lower = value.to_lowercase();

    if is_repeated_character(&lower) {
        return Some(GarbageMatch::RepeatedCharacter);
    }
    if lower.bytes().all(|b| b.is_ascii_digit()) {
        return Some(GarbageMatch::DigitsOnly);
    }
    if letters_digits_regex().is_match(&lower) {
        return Some(GarbageMatch::LettersAndDigits);
    }
    if KEYBOARD_SEQUENCES.contains(&lower.as_str()) {
        return Some(GarbageMatch::KeyboardSequence);
    }
    if PLACEHOLDER_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Some(GarbageMatch::PlaceholderWord);
    }
    None
}

fn is_repeated_character(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 2
}

fn letters_digits_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([a-z]+[0-9]+|[0-9]+[a-z]+)$").unwrap())
}
