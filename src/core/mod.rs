//! Core types shared across the crate: errors, field values, wizard forms,
//! validation and login results

pub mod auth;
pub mod error;
pub mod field;
pub mod form;
pub mod validation;

pub use auth::{AuthMode, AuthProvider, AuthResult, Credentials, DemoAuthProvider, UserRole};
pub use error::{BarnError, BarnResult, FieldErrorKind, FieldValidationError};
pub use field::{FieldFormat, FieldValue};
pub use form::{FormData, FormStep, PaymentMethod, validate_form};
