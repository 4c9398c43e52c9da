//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with the request
//! tracing and CORS middleware applied.

pub mod handlers;

use super::super::host::ServerHost;
use crate::config::ServerConfig;
use crate::core::error::ConfigError;
use crate::server::router::build_api_routes;
use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - API routes
    /// - Custom routes
    pub fn build_router(host: ServerHost, custom_routes: Vec<Router>) -> Result<Router> {
        let cors = Self::cors_layer(&host.config.server)?;

        let mut app = Self::health_routes(host.clone()).merge(build_api_routes(host));
        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors),
        ))
    }

    /// CORS from the configured origins; any origin when none are listed
    fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        if config.cors_origins.is_empty() {
            return Ok(layer.allow_origin(Any));
        }

        let origins = config
            .cors_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: "server.cors_origins".to_string(),
                        value: origin.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(layer.allow_origin(origins))
    }

    /// Build health check routes
    fn health_routes(host: ServerHost) -> Router {
        Router::new()
            .route("/health", get(handlers::health_check))
            .route("/healthz", get(handlers::health_check))
            .with_state(host)
    }
}
