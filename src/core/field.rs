//! Field value types and format checks

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A polymorphic form value as it arrives from the wizard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// Get the value as an integer if possible
    ///
    /// Strings holding an integer are accepted since form inputs arrive as text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The trimmed string form used by every validator
    pub fn to_trimmed_string(&self) -> String {
        match self {
            FieldValue::String(s) => s.trim().to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Well-known field formats
///
/// Each format owns its pattern. The registration rule table and the
/// shipping zip check are built from these, and digit classes are ASCII-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
    Phone,
    Zip,
    CardNumber,
    Expiry,
    Cvv,
    RoutingNumber,
    AccountNumber,
}

impl FieldFormat {
    /// Source pattern for this format
    pub fn pattern(&self) -> &'static str {
        match self {
            FieldFormat::Email => r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
            // North American numbers, optional +1, common separators
            FieldFormat::Phone => {
                r"^(\+?1[ .-]?)?\(?[0-9]{3}\)?[ .-]?[0-9]{3}[ .-]?[0-9]{4}$"
            }
            FieldFormat::Zip => r"^[0-9]{5}(-[0-9]{4})?$",
            FieldFormat::CardNumber => r"^[0-9 \-]{13,23}$",
            FieldFormat::Expiry => r"^(0[1-9]|1[0-2])/([0-9]{2})$",
            FieldFormat::Cvv => r"^[0-9]{3,4}$",
            FieldFormat::RoutingNumber => r"^[0-9]{9}$",
            FieldFormat::AccountNumber => r"^[0-9]{4,17}$",
        }
    }

    /// The compiled pattern, built once per format
    pub fn regex(&self) -> &'static Regex {
        static COMPILED: [OnceLock<Regex>; 8] = [const { OnceLock::new() }; 8];
        COMPILED[*self as usize].get_or_init(|| Regex::new(self.pattern()).unwrap())
    }

    /// Check a trimmed value against this format
    pub fn matches(&self, value: &str) -> bool {
        self.regex().is_match(value.trim())
    }

    /// Luhn mod-10 check over the digits of a card number
    ///
    /// Spaces and dashes are ignored; anything else fails.
    pub fn passes_luhn(number: &str) -> bool {
        let mut digits = Vec::with_capacity(19);
        for c in number.chars() {
            match c {
                ' ' | '-' => continue,
                c if c.is_ascii_digit() => digits.push(c as u32 - '0' as u32),
                _ => return false,
            }
        }
        if !(13..=19).contains(&digits.len()) {
            return false;
        }

        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| {
                if i % 2 == 1 {
                    let doubled = d * 2;
                    if doubled > 9 { doubled - 9 } else { doubled }
                } else {
                    d
                }
            })
            .sum();
        sum % 10 == 0
    }

    /// ABA routing number checksum (weights 3, 7, 1)
    pub fn passes_aba_checksum(routing: &str) -> bool {
        if routing.len() != 9 || !routing.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let sum: u32 = routing
            .bytes()
            .map(|b| (b - b'0') as u32)
            .zip([3, 7, 1].iter().cycle())
            .map(|(d, w)| d * w)
            .sum();
        sum % 10 == 0
    }

    /// `MM/YY` expiry that has not yet passed
    pub fn is_future_expiry(expiry: &str) -> bool {
        Self::is_future_expiry_at(expiry, Utc::now().date_naive())
    }

    /// `MM/YY` expiry check against a fixed date
    ///
    /// A card is usable through the last day of its expiry month.
    pub fn is_future_expiry_at(expiry: &str, today: NaiveDate) -> bool {
        let Some(caps) = FieldFormat::Expiry.regex().captures(expiry) else {
            return false;
        };
        let (Ok(month), Ok(year)) = (caps[1].parse::<u32>(), caps[2].parse::<i32>()) else {
            return false;
        };
        let year = 2000 + year;

        (year, month) >= (today.year(), today.month())
    }
}
