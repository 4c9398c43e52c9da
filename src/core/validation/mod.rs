//! Validation and filtering system
//!
//! A declarative rule table maps form field names to constraints. Values are
//! checked one field at a time (`validate_field`) or a whole wizard step at a
//! time (`validate_fields`, the `Validated` extractor), with a garbage-text
//! screen on free-text name fields.

pub mod extractor;
pub mod filters;
pub mod garbage;
pub mod rules;
pub mod validators;

pub use extractor::{
    FacilityInfoForm, HorseInfoForm, OwnerProfileForm, PaymentForm, ValidatableForm, Validated,
};
pub use rules::{CustomCheck, RuleTable, ValidationRule};
pub use validators::{FieldValidation, check_rule, validate_field, validate_fields};
