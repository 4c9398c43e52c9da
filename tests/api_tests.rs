//! End-to-end tests for the REST API
//!
//! Each test builds the full router from the default configuration and drives
//! it through `axum_test::TestServer`.

use axum::http::StatusCode;
use axum_test::TestServer;
use onebarn::prelude::*;
use serde_json::{Value, json};

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new(AppConfig::default_config())
        .build()
        .expect("Failed to build app");
    TestServer::try_new(app).expect("Failed to create test server")
}

fn owner_profile() -> Value {
    json!({
        "firstName": "Sarah",
        "lastName": "Whitfield",
        "email": "  Sarah@WhitfieldFarm.com ",
        "phone": "(859) 555-0142",
        "address": "1200 Paddock Lane",
        "city": "Lexington",
        "state": "ky",
        "zipCode": "40511"
    })
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "One Barn AI");
    }

    #[tokio::test]
    async fn test_custom_routes_are_served() {
        let routes = Router::new().route("/ping", get(|| async { "pong" }));
        let app = ServerBuilder::new(AppConfig::default_config())
            .with_custom_routes(routes)
            .build()
            .unwrap();
        let server = TestServer::try_new(app).unwrap();

        let response = server.get("/ping").await;
        response.assert_status_ok();
        response.assert_text("pong");
    }
}

// =============================================================================
// Validation Endpoint Tests
// =============================================================================

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_single_field_ok() {
        let server = create_test_server();

        let response = server
            .post("/validate/cardNumber")
            .json(&json!({ "value": "4242 4242 4242 4242" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["isValid"], true);
    }

    #[tokio::test]
    async fn test_validate_single_field_garbage() {
        let server = create_test_server();

        let response = server
            .post("/validate/firstName")
            .json(&json!({ "value": "asdf" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["isValid"], false);
        assert_eq!(body["kind"], "garbage-text");
    }

    #[tokio::test]
    async fn test_validate_single_field_with_custom_rule() {
        let server = create_test_server();

        let response = server
            .post("/validate/barnCode")
            .json(&json!({
                "value": "ab",
                "rule": { "required": true, "minLength": 3, "message": "Too short" }
            }))
            .await;

        let body: Value = response.json();
        assert_eq!(body["isValid"], false);
        assert_eq!(body["kind"], "too-short");
    }

    #[tokio::test]
    async fn test_validate_single_field_bad_json() {
        let server = create_test_server();

        let response = server
            .post("/validate/firstName")
            .content_type("application/json")
            .text("{not json")
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_owner_profile_step_accepted() {
        let server = create_test_server();

        let response = server
            .post("/forms/owner-profile/validate")
            .json(&owner_profile())
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_owner_profile_step_rejected_with_every_field() {
        let server = create_test_server();

        let mut body = owner_profile();
        body["firstName"] = json!("qwerty");
        body["city"] = json!("");
        body["zipCode"] = json!("4051");

        let response = server.post("/forms/owner-profile/validate").json(&body).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields = body["details"]["fields"].as_array().unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f["field"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["firstName", "city", "zipCode"]);
        assert_eq!(fields[0]["kind"], "garbage-text");
        assert_eq!(fields[1]["kind"], "required");
        assert_eq!(fields[2]["kind"], "invalid-zip");
    }

    #[tokio::test]
    async fn test_payment_step_normalises_card_number() {
        let server = create_test_server();

        let response = server
            .post("/forms/payment/validate")
            .json(&json!({
                "paymentMethod": "card",
                "cardholderName": "Sarah Whitfield",
                "cardNumber": "4242-4242-4242-4242",
                "expiryDate": "12/99",
                "cvv": "123",
                "billingZip": "40511"
            }))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_payment_step_rejects_letters_in_card_number() {
        let server = create_test_server();

        let response = server
            .post("/forms/payment/validate")
            .json(&json!({
                "cardholderName": "Sarah Whitfield",
                "cardNumber": "4242x4242y4242z4242",
                "expiryDate": "12/99",
                "cvv": "123",
                "billingZip": "40511"
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["details"]["fields"][0]["field"], "cardNumber");
        assert_eq!(body["details"]["fields"][0]["kind"], "invalid-card-number");
    }

    #[tokio::test]
    async fn test_single_field_checks_value_as_typed() {
        let server = create_test_server();

        let response = server
            .post("/validate/routingNumber")
            .json(&json!({ "value": "0110x00015" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["isValid"], false);
        assert_eq!(body["kind"], "invalid-routing-number");
    }

    #[tokio::test]
    async fn test_unknown_step_is_404() {
        let server = create_test_server();

        let response = server.post("/forms/billing/validate").json(&json!({})).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_draft_drops_secrets() {
        let server = create_test_server();

        let response = server
            .post("/forms/payment/draft")
            .json(&json!({
                "cardholderName": "Sarah Whitfield",
                "cardNumber": "4242424242424242",
                "cvv": "123"
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["storageKey"], "registerPaymentFormData");
        assert_eq!(body["data"], json!({ "cardholderName": "Sarah Whitfield" }));
    }
}

// =============================================================================
// Pricing Endpoint Tests
// =============================================================================

mod pricing_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_plans() {
        let server = create_test_server();

        let response = server.get("/pricing/plans").await;
        response.assert_status_ok();

        let plans: Vec<Value> = response.json();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0]["id"], "oneHorse");
    }

    #[tokio::test]
    async fn test_installation_price() {
        let server = create_test_server();

        let response = server
            .get("/pricing/installation")
            .add_query_param("cameras", 5)
            .add_query_param("type", "professional")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["cost"], 89900);
    }

    #[tokio::test]
    async fn test_installation_price_bad_query() {
        let server = create_test_server();

        let response = server
            .get("/pricing/installation")
            .add_query_param("cameras", "lots")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_shipping_quotes() {
        let server = create_test_server();

        let response = server.get("/shipping/40511").await;
        response.assert_status_ok();

        let quotes: Vec<Value> = response.json();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0]["method"], "standard");
        assert_eq!(quotes[0]["cost"], 2999);
    }

    #[tokio::test]
    async fn test_shipping_invalid_zip() {
        let server = create_test_server();

        let response = server.get("/shipping/4051").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_ZIP");
        assert_eq!(body["details"]["zip"], "4051");
    }

    #[tokio::test]
    async fn test_shipping_fullwidth_zip() {
        let server = create_test_server();

        // "４０５１１" percent-encoded
        let response = server
            .get("/shipping/%EF%BC%94%EF%BC%90%EF%BC%95%EF%BC%91%EF%BC%91")
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_ZIP");
    }

    #[tokio::test]
    async fn test_checkout_quote() {
        let server = create_test_server();

        let response = server
            .post("/checkout/quote")
            .json(&json!({
                "horses": 2,
                "cameras": 6,
                "installation": "professional",
                "zip": "40511"
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["plan"], "twoHorses");
        assert_eq!(body["planCost"], 24900);
        assert_eq!(body["installation"], 89900);
        assert_eq!(body["subtotal"], 24900 + 89900);
        assert_eq!(body["tax"]["state"], "KY");
        assert_eq!(body["tax"]["taxable"], 24900 + 89900 + 2999);
    }

    #[tokio::test]
    async fn test_checkout_quote_too_many_horses() {
        let server = create_test_server();

        let response = server
            .post("/checkout/quote")
            .json(&json!({ "horses": 12 }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "TOO_MANY_HORSES");
    }
}

// =============================================================================
// Contact Endpoint Tests
// =============================================================================

mod contact_tests {
    use super::*;

    #[tokio::test]
    async fn test_contact_submission() {
        let server = create_test_server();

        let response = server
            .post("/contact")
            .json(&json!({
                "name": "Maria Alvarez",
                "email": "maria@shadyacres.com",
                "subject": "Camera coverage",
                "message": "How many cameras do I need for twelve stalls?",
                "inquiryType": "sales"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body["ticketId"].as_str().unwrap().starts_with("OBA-"));
    }

    #[tokio::test]
    async fn test_contact_garbage_name() {
        let server = create_test_server();

        let response = server
            .post("/contact")
            .json(&json!({
                "name": "test",
                "email": "maria@shadyacres.com",
                "subject": "Hello",
                "message": "Just checking whether this form works."
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["details"]["fields"][0]["kind"], "garbage-text");
    }
}

// =============================================================================
// Login Endpoint Tests
// =============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_login_routes_to_dashboard() {
        let server = create_test_server();

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "owner@onebarn.ai", "password": "demo123" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["isValid"], true);
        assert_eq!(body["userRole"], "owner");
        assert_eq!(body["authMode"], "demo");
        assert_eq!(body["dashboard"]["route"], "smart-dashboard");
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let server = create_test_server();

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "owner@onebarn.ai", "password": "guess" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_production_mode_unavailable() {
        let server = create_test_server();

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "owner@onebarn.ai",
                "password": "demo123",
                "mode": "production"
            }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_configured_demo_accounts() {
        let mut config = AppConfig::default_config();
        config.demo_accounts = vec![DemoAccount::new(
            "dr.hale@equinevet.com",
            "hay-bale",
            UserRole::Veterinarian,
        )];
        let server = TestServer::try_new(ServerBuilder::new(config).build().unwrap()).unwrap();

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "dr.hale@equinevet.com", "password": "hay-bale" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["dashboard"]["route"], "vet-dashboard");

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "owner@onebarn.ai", "password": "demo123" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
