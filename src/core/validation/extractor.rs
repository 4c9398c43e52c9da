//! Axum extractor for validated wizard steps
//!
//! This module provides the `Validated<F>` extractor that validates a wizard
//! step's JSON body and normalises it before it reaches the handler.

use crate::core::error::{BarnError, ValidationError};
use crate::core::form::{FormData, FormStep};
use crate::core::validation::rules::RuleTable;
use axum::{
    Json,
    extract::{FromRef, FromRequest, Request},
    response::{IntoResponse, Response},
};
use std::marker::PhantomData;
use std::sync::Arc;

/// A form type bound to one wizard step
pub trait ValidatableForm {
    const STEP: FormStep;
}

/// Owner profile page
pub struct OwnerProfileForm;

/// Horse information page
pub struct HorseInfoForm;

/// Facility information page
pub struct FacilityInfoForm;

/// Payment page
pub struct PaymentForm;

impl ValidatableForm for OwnerProfileForm {
    const STEP: FormStep = FormStep::OwnerProfile;
}

impl ValidatableForm for HorseInfoForm {
    const STEP: FormStep = FormStep::HorseInfo;
}

impl ValidatableForm for FacilityInfoForm {
    const STEP: FormStep = FormStep::FacilityInfo;
}

impl ValidatableForm for PaymentForm {
    const STEP: FormStep = FormStep::Payment;
}

/// Axum extractor that validates and then normalises a wizard step
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn save_owner(
///     form: Validated<OwnerProfileForm>,
/// ) -> StatusCode {
///     // every owner-profile rule passed; the data is already normalised
///     tracing::info!(email = ?form.get_str("email"), "owner saved");
///     StatusCode::NO_CONTENT
/// }
/// ```
pub struct Validated<F>(pub FormData, PhantomData<F>);

impl<F> Validated<F> {
    pub fn new(data: FormData) -> Self {
        Self(data, PhantomData)
    }

    pub fn into_inner(self) -> FormData {
        self.0
    }
}

impl<F> std::ops::Deref for Validated<F> {
    type Target = FormData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, F> FromRequest<S> for Validated<F>
where
    S: Send + Sync,
    F: ValidatableForm + Send + Sync,
    Arc<RuleTable>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let rules = Arc::<RuleTable>::from_ref(state);

        let Json(data): Json<FormData> = Json::from_request(req, state).await.map_err(|e| {
            BarnError::from(ValidationError::InvalidJson {
                message: e.body_text(),
            })
            .into_response()
        })?;

        // rules see the trimmed input as typed; filters only run on accepted data
        match data.validate(&rules, F::STEP) {
            Ok(()) => Ok(Validated::new(data.normalized())),
            Err(errors) => {
                tracing::debug!(
                    step = F::STEP.slug(),
                    failures = errors.field_errors().len(),
                    "form step rejected"
                );
                Err(BarnError::from(errors).into_response())
            }
        }
    }
}
