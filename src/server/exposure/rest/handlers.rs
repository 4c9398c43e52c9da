//! REST handlers
//!
//! Each handler returns `Result<_, BarnError>` so failures render through the
//! shared JSON error body.

use crate::contact::{ContactReceipt, ContactRequest};
use crate::core::auth::{AuthResult, Credentials};
use crate::core::error::{AuthError, BarnError, RequestError, ValidationError};
use crate::core::field::FieldValue;
use crate::core::form::{FormData, FormStep};
use crate::core::validation::{
    FacilityInfoForm, FieldValidation, HorseInfoForm, OwnerProfileForm, PaymentForm,
    ValidatableForm, Validated, ValidationRule, validate_field,
};
use crate::dashboard::DashboardRoute;
use crate::pricing::{
    InstallationType, Money, OrderRequest, OrderSummaryData, PricingPlan, ShippingQuote, quote,
};
use crate::server::host::ServerHost;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Unwrap a JSON body, reporting parse failures as a validation error
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, BarnError> {
    body.map(|Json(value)| value).map_err(|e| {
        ValidationError::InvalidJson {
            message: e.body_text(),
        }
        .into()
    })
}

/// GET /health
pub async fn health_check(State(host): State<ServerHost>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": host.config.brand.product_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Body of a single-field check
#[derive(Debug, Deserialize)]
pub struct FieldCheckRequest {
    #[serde(default)]
    pub value: Option<FieldValue>,

    /// Replaces the table's rule for this one check
    #[serde(default)]
    pub rule: Option<ValidationRule>,
}

/// POST /validate/{field}
///
/// Always 200: the verdict is in the body.
pub async fn validate_single_field(
    State(host): State<ServerHost>,
    Path(field): Path<String>,
    body: Result<Json<FieldCheckRequest>, JsonRejection>,
) -> Result<Json<FieldValidation>, BarnError> {
    let request = json_body(body)?;
    let value = request.value.unwrap_or(FieldValue::Null);
    Ok(Json(validate_field(
        &host.rules,
        &field,
        &value,
        request.rule.as_ref(),
    )))
}

async fn accept_step<F: ValidatableForm>(form: Validated<F>) -> StatusCode {
    tracing::debug!(step = F::STEP.slug(), fields = form.len(), "form step accepted");
    StatusCode::NO_CONTENT
}

/// POST /forms/owner-profile/validate
pub async fn validate_owner_profile(form: Validated<OwnerProfileForm>) -> StatusCode {
    accept_step(form).await
}

/// POST /forms/horse-info/validate
pub async fn validate_horse_info(form: Validated<HorseInfoForm>) -> StatusCode {
    accept_step(form).await
}

/// POST /forms/facility-info/validate
pub async fn validate_facility_info(form: Validated<FacilityInfoForm>) -> StatusCode {
    accept_step(form).await
}

/// POST /forms/payment/validate
pub async fn validate_payment(form: Validated<PaymentForm>) -> StatusCode {
    accept_step(form).await
}

/// POST /forms/{step}/validate for a step that does not exist
pub async fn unknown_form_step(Path(step): Path<String>) -> BarnError {
    RequestError::InvalidPath {
        path: format!("/forms/{}/validate", step),
        message: format!("'{}' is not a registration step", step),
    }
    .into()
}

/// GET /pricing/plans
pub async fn list_plans(State(host): State<ServerHost>) -> Json<Vec<PricingPlan>> {
    Json(host.price_book.plans().to_vec())
}

/// Query for an installation price
#[derive(Debug, Deserialize)]
pub struct InstallationQuery {
    pub cameras: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationQuote {
    pub cameras: u32,
    pub installation_type: InstallationType,
    pub cost: Money,
}

/// GET /pricing/installation?cameras=N&type=professional
pub async fn installation_price(
    State(host): State<ServerHost>,
    Query(query): Query<InstallationQuery>,
) -> Result<Json<InstallationQuote>, BarnError> {
    let raw = query.cameras.unwrap_or_default();
    let cameras: u32 = raw.trim().parse().map_err(|_| RequestError::InvalidQuery {
        param: "cameras".to_string(),
        message: format!("expected a camera count, got '{}'", raw),
    })?;

    let kind = match query.kind.as_deref().unwrap_or("professional") {
        "professional" => InstallationType::Professional,
        "selfInstall" | "self-install" => InstallationType::SelfInstall,
        other => {
            return Err(RequestError::InvalidQuery {
                param: "type".to_string(),
                message: format!("unknown installation type '{}'", other),
            }
            .into());
        }
    };

    Ok(Json(InstallationQuote {
        cameras,
        installation_type: kind,
        cost: host.price_book.installation().cost(kind, cameras),
    }))
}

/// GET /shipping/{zip}
pub async fn shipping_quotes(
    State(host): State<ServerHost>,
    Path(zip): Path<String>,
) -> Result<Json<Vec<ShippingQuote>>, BarnError> {
    Ok(Json(host.price_book.shipping().quote_all(&zip)?))
}

/// POST /checkout/quote
pub async fn checkout_quote(
    State(host): State<ServerHost>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderSummaryData>, BarnError> {
    let request = json_body(body)?;
    Ok(Json(quote(host.price_book.clone(), &request)?))
}

/// POST /contact
pub async fn submit_contact(
    State(host): State<ServerHost>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactReceipt>), BarnError> {
    let request = json_body(body)?;
    let receipt = host.contact_service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub auth: AuthResult,
    pub dashboard: DashboardRoute,
}

/// POST /auth/login
pub async fn login(
    State(host): State<ServerHost>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, BarnError> {
    let credentials = json_body(body)?;
    let auth = host.auth_provider.authenticate(&credentials).await?;

    let role = match (auth.is_valid, auth.user_role) {
        (true, Some(role)) => role,
        _ => return Err(AuthError::InvalidCredentials.into()),
    };

    Ok(Json(LoginResponse {
        dashboard: DashboardRoute::for_role(role),
        auth,
    }))
}

/// Draft snapshot helper exposed for clients that persist wizard progress
///
/// POST /forms/{step}/draft
pub async fn form_draft(
    Path(step): Path<String>,
    body: Result<Json<FormData>, JsonRejection>,
) -> Result<Json<Value>, BarnError> {
    let step_kind = FormStep::from_slug(&step).ok_or_else(|| {
        RequestError::InvalidPath {
            path: format!("/forms/{}/draft", step),
            message: format!("'{}' is not a registration step", step),
        }
    })?;
    let data = json_body(body)?.normalized();
    Ok(Json(json!({
        "storageKey": step_kind.storage_key(),
        "data": data.snapshot(step_kind),
    })))
}
