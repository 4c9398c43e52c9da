//! Contact form intake
//!
//! [`ContactRequest`] carries its format constraints as `validator` derive
//! attributes; [`ContactRequest::check`] adds the required-field pass and
//! reports everything through the crate's field error taxonomy. Delivery
//! goes through a [`ContactService`].

use crate::core::error::{BarnError, FieldErrorKind, FieldValidationError, ValidationError};
use crate::core::field::FieldFormat;
use crate::core::validation::garbage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

/// Topic picked on the contact form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryType {
    #[default]
    General,
    Sales,
    Support,
    Partnership,
    Demo,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::General => "general",
            InquiryType::Sales => "sales",
            InquiryType::Support => "support",
            InquiryType::Partnership => "partnership",
            InquiryType::Demo => "demo",
        }
    }
}

/// Contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(
        length(min = 2, max = 100),
        custom(function = "not_garbage")
    )]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 150))]
    pub subject: String,

    #[validate(length(min = 10, max = 2000))]
    pub message: String,

    #[serde(default)]
    pub inquiry_type: InquiryType,
}

fn not_garbage(name: &str) -> Result<(), validator::ValidationError> {
    match garbage::detect(name.trim()) {
        Some(_) => Err(validator::ValidationError::new("garbage")
            .with_message(Cow::Borrowed(garbage::GARBAGE_TEXT_MESSAGE))),
        None => Ok(()),
    }
}

fn valid_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if phone.trim().is_empty() || FieldFormat::Phone.matches(phone) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("phone"))
    }
}

/// Form order, paired with the JSON field name
const CONTACT_FIELDS: [(&str, &str, &str); 6] = [
    ("name", "name", "Name"),
    ("email", "email", "Email"),
    ("phone", "phone", "Phone"),
    ("subject", "subject", "Subject"),
    ("message", "message", "Message"),
    ("inquiry_type", "inquiryType", "Inquiry type"),
];

impl ContactRequest {
    /// Required fields first, then the derive constraints
    ///
    /// Errors come back in form order with one entry per field.
    pub fn check(&self) -> Result<(), ValidationError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        let derived = self.validate().err();
        let field_errors = derived.as_ref().map(|e| e.field_errors());

        let mut errors = Vec::new();
        for (rust_name, json_name, label) in CONTACT_FIELDS {
            if missing.contains(&rust_name) {
                errors.push(FieldValidationError {
                    field: json_name.to_string(),
                    kind: FieldErrorKind::Required,
                    message: format!("{} is required", label),
                });
                continue;
            }
            let first = field_errors
                .as_ref()
                .and_then(|map| map.get(rust_name))
                .and_then(|errs| errs.first());
            if let Some(err) = first {
                errors.push(convert(json_name, label, err));
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(ValidationError::FieldError(errors.remove(0))),
            _ => Err(ValidationError::FieldErrors(errors)),
        }
    }
}

fn convert(field: &str, label: &str, err: &validator::ValidationError) -> FieldValidationError {
    let kind = match err.code.as_ref() {
        "garbage" => FieldErrorKind::GarbageText,
        "length" if err.params.contains_key("min") && is_below_min(err) => FieldErrorKind::TooShort,
        "length" => FieldErrorKind::TooLong,
        _ => FieldErrorKind::PatternMismatch,
    };
    let message = match (&err.message, kind) {
        (Some(message), _) => message.to_string(),
        (None, FieldErrorKind::TooShort) => format!("{} is too short", label),
        (None, FieldErrorKind::TooLong) => format!("{} is too long", label),
        (None, _) => format!("Please enter a valid {}", label.to_lowercase()),
    };
    FieldValidationError {
        field: field.to_string(),
        kind,
        message,
    }
}

fn is_below_min(err: &validator::ValidationError) -> bool {
    let min = err.params.get("min").and_then(|v| v.as_u64());
    let len = err
        .params
        .get("value")
        .and_then(|v| v.as_str())
        .map(|s| s.chars().count() as u64);
    matches!((min, len), (Some(min), Some(len)) if len < min)
}

/// Acknowledgement returned to the submitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Trait for contact delivery backends
#[async_trait]
pub trait ContactService: Send + Sync {
    async fn submit(&self, request: ContactRequest) -> Result<ContactReceipt, BarnError>;
}

/// Records submissions in memory and logs them
#[derive(Debug, Default)]
pub struct LoggingContactService {
    submissions: RwLock<Vec<(String, ContactRequest)>>,
}

impl LoggingContactService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions received so far, keyed by ticket id
    pub async fn submissions(&self) -> Vec<(String, ContactRequest)> {
        self.submissions.read().await.clone()
    }
}

/// `OBA-` followed by eight uppercase hex digits
pub fn new_ticket_id() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("OBA-{}", &id[..8])
}

#[async_trait]
impl ContactService for LoggingContactService {
    async fn submit(&self, request: ContactRequest) -> Result<ContactReceipt, BarnError> {
        request.check()?;

        let ticket_id = new_ticket_id();
        tracing::info!(
            ticket_id = %ticket_id,
            inquiry_type = request.inquiry_type.as_str(),
            "contact request received"
        );
        self.submissions
            .write()
            .await
            .push((ticket_id.clone(), request));

        Ok(ContactReceipt {
            success: true,
            message: "Thanks for reaching out. We'll reply within one business day.".to_string(),
            ticket_id: Some(ticket_id),
            timestamp: Utc::now(),
        })
    }
}
