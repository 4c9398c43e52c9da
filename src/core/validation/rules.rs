//! Declarative field rules and the registration rule table

use crate::core::error::FieldErrorKind;
use crate::core::field::FieldFormat;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Named checks that go beyond a regular expression
///
/// These stand in for free-form custom validators so rule tables stay
/// loadable from YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomCheck {
    /// Card number Luhn checksum
    Luhn,
    /// `MM/YY` not earlier than the current month
    FutureExpiry,
    /// ABA routing number checksum
    AbaChecksum,
}

impl CustomCheck {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            CustomCheck::Luhn => FieldFormat::passes_luhn(value),
            CustomCheck::FutureExpiry => FieldFormat::is_future_expiry(value),
            CustomCheck::AbaChecksum => FieldFormat::passes_aba_checksum(value),
        }
    }
}

/// Constraint descriptor for a single form field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,

    #[serde(default, with = "pattern_serde", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Regex>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomCheck>,

    /// Error kind reported for pattern and custom-check failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldErrorKind>,

    /// Display label used in the "is required" message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub message: String,
}

impl ValidationRule {
    /// A required field with the given failure message
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: true,
            message: message.into(),
            ..Default::default()
        }
    }

    /// An optional field with the given failure message
    pub fn optional(message: impl Into<String>) -> Self {
        Self {
            required: false,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_custom(mut self, check: CustomCheck) -> Self {
        self.custom = Some(check);
        self
    }

    pub fn with_kind(mut self, kind: FieldErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label shown to the user for this field
    pub fn display_label(&self, field: &str) -> String {
        self.label.clone().unwrap_or_else(|| humanize(field))
    }
}

/// `firstName` -> `First name`
pub fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

mod pattern_serde {
    use regex::Regex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pattern: &Option<Regex>, s: S) -> Result<S::Ok, S::Error> {
        match pattern {
            Some(regex) => s.serialize_some(regex.as_str()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Regex>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|p| Regex::new(&p).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Ordered mapping of field name to rule
///
/// Immutable once handed to validators; build it up front and share it
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: IndexMap<String, ValidationRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for a field
    pub fn with_rule(mut self, field: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<&ValidationRule> {
        self.rules.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge configured rules over this table
    ///
    /// Overridden fields keep their position; new fields are appended.
    pub fn with_overrides(mut self, overrides: &IndexMap<String, ValidationRule>) -> Self {
        for (field, rule) in overrides {
            tracing::debug!(field = %field, "overriding validation rule");
            self.rules.insert(field.clone(), rule.clone());
        }
        self
    }

    /// The built-in rule table for the registration wizard
    pub fn registration() -> Self {
        // literal patterns only
        let re = |p: &str| Regex::new(p).unwrap();
        let known = |f: FieldFormat| f.regex().clone();

        let person_name = || re(r"^[a-zA-Z\s'\-]{2,50}$");
        let name_message =
            "Please enter a valid name (letters, spaces, hyphens and apostrophes only)";
        let phone_message = "Please enter a valid phone number, e.g. (859) 555-0142";
        let zip_message = "Please enter a valid 5-digit ZIP code";

        Self::new()
            // Owner profile
            .with_rule(
                "firstName",
                ValidationRule::required(name_message).with_pattern(person_name()),
            )
            .with_rule(
                "lastName",
                ValidationRule::required(name_message).with_pattern(person_name()),
            )
            .with_rule(
                "email",
                ValidationRule::required("Please enter a valid email address")
                    .with_pattern(known(FieldFormat::Email)),
            )
            .with_rule(
                "phone",
                ValidationRule::required(phone_message).with_pattern(known(FieldFormat::Phone)),
            )
            .with_rule(
                "address",
                ValidationRule::required("Please enter a valid street address")
                    .with_pattern(re(r"^[a-zA-Z0-9\s,.'#\-]+$"))
                    .with_length(Some(5), Some(100)),
            )
            .with_rule(
                "city",
                ValidationRule::required("Please enter a valid city")
                    .with_pattern(re(r"^[a-zA-Z\s'.\-]{2,50}$")),
            )
            .with_rule(
                "state",
                ValidationRule::required("Please enter a two-letter state code")
                    .with_pattern(re(r"^[A-Za-z]{2}$")),
            )
            .with_rule(
                "zipCode",
                ValidationRule::required(zip_message)
                    .with_pattern(known(FieldFormat::Zip))
                    .with_kind(FieldErrorKind::InvalidZip)
                    .with_label("ZIP code"),
            )
            .with_rule(
                "emergencyContactName",
                ValidationRule::optional(name_message).with_pattern(person_name()),
            )
            .with_rule(
                "emergencyPhone",
                ValidationRule::optional(phone_message).with_pattern(known(FieldFormat::Phone)),
            )
            .with_rule(
                "emergencyRelationship",
                ValidationRule::optional("Please describe the relationship in words")
                    .with_pattern(re(r"^[a-zA-Z\s\-]{2,30}$")),
            )
            // Horse info
            .with_rule(
                "horseName",
                ValidationRule::required("Please enter your horse's name")
                    .with_pattern(re(r"^[a-zA-Z0-9\s'.\-]{2,50}$")),
            )
            .with_rule(
                "breed",
                ValidationRule::required("Please enter a valid breed")
                    .with_pattern(re(r"^[a-zA-Z\s'\-]{2,50}$")),
            )
            .with_rule(
                "age",
                ValidationRule::required("Age must be a number between 0 and 40")
                    .with_pattern(re(r"^[0-9]{1,2}$"))
                    .with_range(Some(0.0), Some(40.0)),
            )
            .with_rule(
                "color",
                ValidationRule::optional("Please enter a valid color")
                    .with_pattern(re(r"^[a-zA-Z\s\-]{2,30}$")),
            )
            .with_rule(
                "markings",
                ValidationRule::optional("Please describe markings in words")
                    .with_pattern(re(r"^[a-zA-Z0-9\s,.'\-]+$"))
                    .with_length(Some(2), Some(200)),
            )
            .with_rule(
                "medicalNotes",
                ValidationRule::optional("Medical notes must be 500 characters or fewer")
                    .with_length(None, Some(500)),
            )
            // Facility info
            .with_rule(
                "barnName",
                ValidationRule::required("Please enter a valid barn or facility name")
                    .with_pattern(re(r"^[a-zA-Z0-9\s&'.\-]{2,80}$")),
            )
            .with_rule(
                "stallCount",
                ValidationRule::optional("Stall count must be between 1 and 500")
                    .with_pattern(re(r"^[0-9]+$"))
                    .with_range(Some(1.0), Some(500.0)),
            )
            .with_rule(
                "cameraCount",
                ValidationRule::required("Camera count must be between 1 and 24")
                    .with_pattern(re(r"^[0-9]+$"))
                    .with_range(Some(1.0), Some(24.0)),
            )
            .with_rule(
                "installationType",
                ValidationRule::required("Choose self install or professional installation")
                    .with_pattern(re(r"^(selfInstall|professional)$")),
            )
            .with_rule(
                "clinicName",
                ValidationRule::optional("Please enter a valid clinic name")
                    .with_pattern(re(r"^[a-zA-Z0-9\s&'.\-]{2,80}$")),
            )
            .with_rule(
                "vetName",
                ValidationRule::optional(name_message).with_pattern(re(r"^[a-zA-Z\s'.\-]{2,50}$")),
            )
            .with_rule(
                "vetPhone",
                ValidationRule::optional(phone_message).with_pattern(known(FieldFormat::Phone)),
            )
            // Payment
            .with_rule(
                "paymentMethod",
                ValidationRule::optional("Payment method must be card or ach")
                    .with_pattern(re(r"^(card|ach)$")),
            )
            .with_rule(
                "cardholderName",
                ValidationRule::required(name_message).with_pattern(person_name()),
            )
            .with_rule(
                "cardNumber",
                ValidationRule::required("Please enter a valid card number")
                    .with_pattern(known(FieldFormat::CardNumber))
                    .with_custom(CustomCheck::Luhn)
                    .with_kind(FieldErrorKind::InvalidCardNumber),
            )
            .with_rule(
                "expiryDate",
                ValidationRule::required("Please enter a future expiry date as MM/YY")
                    .with_pattern(known(FieldFormat::Expiry))
                    .with_custom(CustomCheck::FutureExpiry)
                    .with_kind(FieldErrorKind::InvalidExpiry)
                    .with_label("Expiry date"),
            )
            .with_rule(
                "cvv",
                ValidationRule::required("CVV must be 3 or 4 digits")
                    .with_pattern(known(FieldFormat::Cvv))
                    .with_kind(FieldErrorKind::InvalidCvv)
                    .with_label("CVV"),
            )
            .with_rule(
                "billingZip",
                ValidationRule::required(zip_message)
                    .with_pattern(known(FieldFormat::Zip))
                    .with_kind(FieldErrorKind::InvalidZip)
                    .with_label("Billing ZIP code"),
            )
            .with_rule(
                "accountHolderName",
                ValidationRule::required(name_message).with_pattern(person_name()),
            )
            .with_rule(
                "routingNumber",
                ValidationRule::required("Please enter a valid 9-digit routing number")
                    .with_pattern(known(FieldFormat::RoutingNumber))
                    .with_custom(CustomCheck::AbaChecksum)
                    .with_kind(FieldErrorKind::InvalidRoutingNumber),
            )
            .with_rule(
                "accountNumber",
                ValidationRule::required("Account number must be 4 to 17 digits")
                    .with_pattern(known(FieldFormat::AccountNumber)),
            )
            .with_rule(
                "accountType",
                ValidationRule::optional("Account type must be checking or savings")
                    .with_pattern(re(r"^(checking|savings)$")),
            )
    }
}
