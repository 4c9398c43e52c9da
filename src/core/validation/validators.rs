//! Field validators
//!
//! `validate_field` is the single entry point the wizard calls on blur and
//! on submit. Each constraint of a [`ValidationRule`] is checked by its own
//! small function, in a fixed order, and the first failure wins.

use super::garbage;
use super::rules::{RuleTable, ValidationRule};
use crate::core::error::{FieldErrorKind, FieldValidationError, ValidationError};
use crate::core::field::FieldValue;
use serde::{Deserialize, Serialize};

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldErrorKind>,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
            kind: None,
        }
    }

    pub fn invalid(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            kind: Some(kind),
        }
    }
}

impl From<Result<(), FieldValidationError>> for FieldValidation {
    fn from(result: Result<(), FieldValidationError>) -> Self {
        match result {
            Ok(()) => FieldValidation::valid(),
            Err(e) => FieldValidation::invalid(e.kind, e.message),
        }
    }
}

/// Validate one field against the table, or against `custom_rule` if given
///
/// Unknown fields are valid: the table only constrains what it names.
pub fn validate_field(
    table: &RuleTable,
    field: &str,
    value: &FieldValue,
    custom_rule: Option<&ValidationRule>,
) -> FieldValidation {
    let Some(rule) = custom_rule.or_else(|| table.get(field)) else {
        return FieldValidation::valid();
    };
    let outcome = check_rule(field, rule, value);
    if let Err(e) = &outcome {
        tracing::debug!(field = %field, kind = %e.kind, "field rejected");
    }
    outcome.into()
}

/// Apply every constraint of `rule` to `value`
pub fn check_rule(
    field: &str,
    rule: &ValidationRule,
    value: &FieldValue,
) -> Result<(), FieldValidationError> {
    let text = value.to_trimmed_string();

    if text.is_empty() {
        return required(field, rule);
    }

    matches_pattern(field, rule, &text)?;
    within_length(field, rule, &text)?;
    within_range(field, rule, &text)?;
    passes_custom(field, rule, &text)?;
    not_garbage(field, &text)
}

/// Validate a list of fields, collecting every failure in order
pub fn validate_fields<'f, 'v>(
    table: &RuleTable,
    fields: impl IntoIterator<Item = &'f str>,
    lookup: impl Fn(&str) -> Option<&'v FieldValue>,
) -> Result<(), ValidationError> {
    static MISSING: FieldValue = FieldValue::Null;

    let errors: Vec<FieldValidationError> = fields
        .into_iter()
        .filter_map(|field| {
            let rule = table.get(field)?;
            let value = lookup(field).unwrap_or(&MISSING);
            check_rule(field, rule, value).err()
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::FieldErrors(errors))
    }
}

fn fail(field: &str, kind: FieldErrorKind, message: impl Into<String>) -> FieldValidationError {
    FieldValidationError {
        field: field.to_string(),
        kind,
        message: message.into(),
    }
}

fn rule_failure(field: &str, rule: &ValidationRule, default_kind: FieldErrorKind) -> FieldValidationError {
    fail(field, rule.kind.unwrap_or(default_kind), rule.message.clone())
}

/// Empty values fail only when the rule is required
fn required(field: &str, rule: &ValidationRule) -> Result<(), FieldValidationError> {
    if rule.required {
        Err(fail(
            field,
            FieldErrorKind::Required,
            format!("{} is required", rule.display_label(field)),
        ))
    } else {
        Ok(())
    }
}

fn matches_pattern(
    field: &str,
    rule: &ValidationRule,
    text: &str,
) -> Result<(), FieldValidationError> {
    match &rule.pattern {
        Some(pattern) if !pattern.is_match(text) => {
            Err(rule_failure(field, rule, FieldErrorKind::PatternMismatch))
        }
        _ => Ok(()),
    }
}

fn within_length(
    field: &str,
    rule: &ValidationRule,
    text: &str,
) -> Result<(), FieldValidationError> {
    let len = text.chars().count();
    if rule.min_length.is_some_and(|min| len < min) {
        return Err(fail(field, FieldErrorKind::TooShort, rule.message.clone()));
    }
    if rule.max_length.is_some_and(|max| len > max) {
        return Err(fail(field, FieldErrorKind::TooLong, rule.message.clone()));
    }
    Ok(())
}

fn within_range(
    field: &str,
    rule: &ValidationRule,
    text: &str,
) -> Result<(), FieldValidationError> {
    if rule.min.is_none() && rule.max.is_none() {
        return Ok(());
    }
    let Ok(number) = text.parse::<f64>() else {
        return Err(rule_failure(field, rule, FieldErrorKind::PatternMismatch));
    };
    let below = rule.min.is_some_and(|min| number < min);
    let above = rule.max.is_some_and(|max| number > max);
    if below || above {
        Err(fail(field, FieldErrorKind::OutOfRange, rule.message.clone()))
    } else {
        Ok(())
    }
}

fn passes_custom(
    field: &str,
    rule: &ValidationRule,
    text: &str,
) -> Result<(), FieldValidationError> {
    match rule.custom {
        Some(check) if !check.passes(text) => {
            Err(rule_failure(field, rule, FieldErrorKind::PatternMismatch))
        }
        _ => Ok(()),
    }
}

fn not_garbage(field: &str, text: &str) -> Result<(), FieldValidationError> {
    if !garbage::applies_to(field) {
        return Ok(());
    }
    match garbage::detect(text) {
        Some(hit) => {
            tracing::debug!(field = %field, heuristic = ?hit, "garbage text detected");
            Err(fail(
                field,
                FieldErrorKind::GarbageText,
                garbage::GARBAGE_TEXT_MESSAGE,
            ))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::rules::CustomCheck;
    use regex::Regex;

    fn table() -> RuleTable {
        RuleTable::registration()
    }

    // === required / optional ===

    #[test]
    fn test_required_empty_fails_with_label() {
        let result = validate_field(&table(), "firstName", &FieldValue::from("   "), None);
        assert!(!result.is_valid);
        assert_eq!(result.kind, Some(FieldErrorKind::Required));
        assert_eq!(result.message, "First name is required");
    }

    #[test]
    fn test_required_null_fails() {
        let result = validate_field(&table(), "email", &FieldValue::Null, None);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_optional_empty_short_circuits() {
        let result = validate_field(&table(), "color", &FieldValue::from(""), None);
        assert_eq!(result, FieldValidation::valid());
    }

    #[test]
    fn test_unknown_field_is_valid() {
        let result = validate_field(&table(), "favoriteTreat", &FieldValue::from("asdf"), None);
        assert!(result.is_valid);
        assert!(result.message.is_empty());
    }

    // === pattern ===

    #[test]
    fn test_email_pattern() {
        let t = table();
        assert!(validate_field(&t, "email", &FieldValue::from("user@example.com"), None).is_valid);
        let bad = validate_field(&t, "email", &FieldValue::from("not-an-email"), None);
        assert!(!bad.is_valid);
        assert_eq!(bad.kind, Some(FieldErrorKind::PatternMismatch));
        assert_eq!(bad.message, "Please enter a valid email address");
    }

    #[test]
    fn test_value_is_trimmed_before_pattern() {
        let result = validate_field(&table(), "zipCode", &FieldValue::from(" 40511 "), None);
        assert!(result.is_valid);
    }

    #[test]
    fn test_rule_kind_overrides_pattern_kind() {
        let result = validate_field(&table(), "zipCode", &FieldValue::from("4051"), None);
        assert_eq!(result.kind, Some(FieldErrorKind::InvalidZip));
    }

    // === length / range ===

    #[test]
    fn test_too_short_address() {
        let result = validate_field(&table(), "address", &FieldValue::from("1 A"), None);
        assert_eq!(result.kind, Some(FieldErrorKind::TooShort));
    }

    #[test]
    fn test_too_long_notes() {
        let long = "a".repeat(501);
        let result = validate_field(&table(), "medicalNotes", &FieldValue::from(long), None);
        assert_eq!(result.kind, Some(FieldErrorKind::TooLong));
    }

    #[test]
    fn test_numeric_range() {
        let t = table();
        assert!(validate_field(&t, "age", &FieldValue::Integer(12), None).is_valid);
        assert!(validate_field(&t, "age", &FieldValue::Integer(0), None).is_valid);
        let old = validate_field(&t, "age", &FieldValue::Integer(41), None);
        assert_eq!(old.kind, Some(FieldErrorKind::OutOfRange));
    }

    #[test]
    fn test_unparseable_number_is_mismatch() {
        let rule = ValidationRule::required("number please").with_range(Some(1.0), None);
        let result = validate_field(
            &RuleTable::new(),
            "count",
            &FieldValue::from("seven"),
            Some(&rule),
        );
        assert_eq!(result.kind, Some(FieldErrorKind::PatternMismatch));
        assert_eq!(result.message, "number please");
    }

    // === custom checks ===

    #[test]
    fn test_card_number_luhn() {
        let t = table();
        assert!(
            validate_field(&t, "cardNumber", &FieldValue::from("4242 4242 4242 4242"), None)
                .is_valid
        );
        let bad = validate_field(&t, "cardNumber", &FieldValue::from("4242 4242 4242 4241"), None);
        assert_eq!(bad.kind, Some(FieldErrorKind::InvalidCardNumber));
    }

    #[test]
    fn test_routing_number_checksum() {
        let t = table();
        assert!(validate_field(&t, "routingNumber", &FieldValue::from("011000015"), None).is_valid);
        let bad = validate_field(&t, "routingNumber", &FieldValue::from("011000016"), None);
        assert_eq!(bad.kind, Some(FieldErrorKind::InvalidRoutingNumber));
    }

    #[test]
    fn test_expired_card() {
        let bad = validate_field(&table(), "expiryDate", &FieldValue::from("01/20"), None);
        assert_eq!(bad.kind, Some(FieldErrorKind::InvalidExpiry));
    }

    #[test]
    fn test_cvv_kind() {
        let bad = validate_field(&table(), "cvv", &FieldValue::from("12"), None);
        assert_eq!(bad.kind, Some(FieldErrorKind::InvalidCvv));
    }

    // === garbage text ===

    #[test]
    fn test_keyboard_mash_rejected() {
        let result = validate_field(&table(), "firstName", &FieldValue::from("asdf"), None);
        assert!(!result.is_valid);
        assert_eq!(result.kind, Some(FieldErrorKind::GarbageText));
        assert_eq!(result.message, garbage::GARBAGE_TEXT_MESSAGE);
    }

    #[test]
    fn test_real_name_accepted() {
        let result = validate_field(&table(), "firstName", &FieldValue::from("Sarah"), None);
        assert!(result.is_valid);
    }

    #[test]
    fn test_garbage_only_screens_listed_fields() {
        let rule = ValidationRule::required("code").with_pattern(Regex::new(r"^\w+$").unwrap());
        let result = validate_field(
            &RuleTable::new(),
            "promoCode",
            &FieldValue::from("test123"),
            Some(&rule),
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_custom_rule_wins_over_table() {
        let rule = ValidationRule::optional("anything goes");
        let result = validate_field(&table(), "email", &FieldValue::from(""), Some(&rule));
        assert!(result.is_valid);
    }

    #[test]
    fn test_custom_rule_with_check() {
        let rule = ValidationRule::required("bad card")
            .with_custom(CustomCheck::Luhn)
            .with_kind(FieldErrorKind::InvalidCardNumber);
        let result = validate_field(
            &RuleTable::new(),
            "giftCard",
            &FieldValue::from("1234567890123"),
            Some(&rule),
        );
        assert_eq!(result.kind, Some(FieldErrorKind::InvalidCardNumber));
    }

    // === validate_fields ===

    #[test]
    fn test_validate_fields_collects_in_order() {
        let t = table();
        let email = FieldValue::from("nope");
        let lookup = |f: &str| if f == "email" { Some(&email) } else { None };

        let err = validate_fields(&t, ["firstName", "email", "color"], lookup).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "email"]);
    }

    #[test]
    fn test_field_validation_serializes_camel_case() {
        let json = serde_json::to_value(FieldValidation::valid()).unwrap();
        assert_eq!(json, serde_json::json!({ "isValid": true, "message": "" }));
    }
}
