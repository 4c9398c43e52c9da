//! # One Barn
//!
//! Registration, checkout and sign-in backend for the One Barn AI equine
//! monitoring service.
//!
//! ## Features
//!
//! - **Field validation**: a declarative rule table for every registration
//!   field, with card, routing-number and expiry checks and a garbage-text
//!   screen on names
//! - **Checkout pricing**: plan tiers, installation, shipping and sales tax
//!   computed in integer cents
//! - **Contact intake** and **demo sign-in** behind swappable traits
//! - **Configuration-based**: pricing, demo accounts and rule overrides load
//!   from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use onebarn::prelude::*;
//!
//! let book = Arc::new(PriceBook::default());
//! let mut checkout = Checkout::new(book, 2)?;
//! checkout.set_installation(InstallationType::Professional);
//! checkout.set_cameras(6);
//! checkout.set_zip("40511")?;
//!
//! let summary = checkout.summary();
//! println!("Total due today: {}", summary.total);
//! ```

pub mod config;
pub mod contact;
pub mod core;
pub mod dashboard;
pub mod pricing;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{
            AuthMode, AuthProvider, AuthResult, Credentials, DemoAccount, DemoAuthProvider,
            UserRole,
        },
        error::{
            AuthError, BarnError, BarnResult, ConfigError, ErrorResponse, FieldErrorKind,
            FieldValidationError, PricingError, RequestError, ValidationError,
        },
        field::{FieldFormat, FieldValue},
        form::{FormData, FormStep, PaymentMethod, validate_form},
    };

    // === Validation ===
    pub use crate::core::validation::{
        CustomCheck, FacilityInfoForm, FieldValidation, HorseInfoForm, OwnerProfileForm,
        PaymentForm, RuleTable, ValidatableForm, Validated, ValidationRule, filters,
        validate_field, validate_fields,
    };

    // === Pricing ===
    pub use crate::pricing::{
        BillingCycle, Checkout, InstallationType, Money, OrderRequest, OrderSummaryData, PlanId,
        PriceBook, PricingConfig, PricingPlan, ShippingMethod, ShippingQuote, TaxQuote, quote,
    };

    // === Contact ===
    pub use crate::contact::{
        ContactReceipt, ContactRequest, ContactService, InquiryType, LoggingContactService,
    };

    // === Dashboards ===
    pub use crate::dashboard::{
        DashboardRoute, DashboardTab, DashboardView, HealthStatus, SystemHealth,
    };

    // === Config ===
    pub use crate::config::{AppConfig, BrandConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::{
        Router,
        routing::{get, post},
    };
}
