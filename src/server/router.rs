//! Route table for the public API

use super::exposure::rest::handlers::{
    checkout_quote, form_draft, installation_price, list_plans, login, shipping_quotes,
    submit_contact, unknown_form_step, validate_facility_info, validate_horse_info,
    validate_owner_profile, validate_payment, validate_single_field,
};
use super::host::ServerHost;
use axum::{
    Router,
    routing::{get, post},
};

/// Build the API routes
///
/// - POST /validate/{field} - Check one field value
/// - POST /forms/{step}/validate - Check a whole wizard step (204 or 422)
/// - POST /forms/{step}/draft - Secret-free draft of a wizard step
/// - GET /pricing/plans - Plan catalogue
/// - GET /pricing/installation - Professional installation price
/// - GET /shipping/{zip} - Shipping quotes for a zip
/// - POST /checkout/quote - Full order summary
/// - POST /contact - Contact form intake
/// - POST /auth/login - Sign in and resolve the landing dashboard
pub fn build_api_routes(host: ServerHost) -> Router {
    Router::new()
        .route("/validate/{field}", post(validate_single_field))
        .route("/forms/owner-profile/validate", post(validate_owner_profile))
        .route("/forms/horse-info/validate", post(validate_horse_info))
        .route("/forms/facility-info/validate", post(validate_facility_info))
        .route("/forms/payment/validate", post(validate_payment))
        .route("/forms/{step}/validate", post(unknown_form_step))
        .route("/forms/{step}/draft", post(form_draft))
        .route("/pricing/plans", get(list_plans))
        .route("/pricing/installation", get(installation_price))
        .route("/shipping/{zip}", get(shipping_quotes))
        .route("/checkout/quote", post(checkout_quote))
        .route("/contact", post(submit_contact))
        .route("/auth/login", post(login))
        .with_state(host)
}
