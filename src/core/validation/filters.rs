//! Reusable field filters
//!
//! These normalise form values before they are stored or priced. Non-string
//! values pass through untouched.

use crate::core::field::FieldValue;

/// A value normaliser
pub type Filter = fn(FieldValue) -> FieldValue;

/// Filter: trim whitespace from string
pub fn trim(value: FieldValue) -> FieldValue {
    map_string(value, |s| s.trim().to_string())
}

/// Filter: trim and convert string to uppercase
pub fn uppercase(value: FieldValue) -> FieldValue {
    map_string(value, |s| s.trim().to_uppercase())
}

/// Filter: trim and convert string to lowercase
pub fn lowercase(value: FieldValue) -> FieldValue {
    map_string(value, |s| s.trim().to_lowercase())
}

/// Filter: keep only ASCII digits (card, routing and account numbers)
pub fn digits_only(value: FieldValue) -> FieldValue {
    map_string(value, |s| s.chars().filter(|c| c.is_ascii_digit()).collect())
}

/// The filter applied to a given form field
pub fn filter_for(field: &str) -> Filter {
    match field {
        "email" => lowercase,
        "state" => uppercase,
        "cardNumber" | "routingNumber" | "accountNumber" => digits_only,
        _ => trim,
    }
}

fn map_string(value: FieldValue, f: impl FnOnce(&str) -> String) -> FieldValue {
    match value {
        FieldValue::String(s) => FieldValue::String(f(&s)),
        other => other,
    }
}
