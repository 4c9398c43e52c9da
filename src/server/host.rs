//! Shared state behind every route
//!
//! `ServerHost` is built once by the [`ServerBuilder`](super::ServerBuilder)
//! and cloned into handlers. Everything inside is immutable or behind its
//! own synchronisation, so clones are cheap `Arc` bumps.

use crate::config::AppConfig;
use crate::contact::ContactService;
use crate::core::auth::AuthProvider;
use crate::core::validation::RuleTable;
use crate::pricing::PriceBook;
use axum::extract::FromRef;
use std::sync::Arc;

/// Host context containing all application state
#[derive(Clone)]
pub struct ServerHost {
    /// Loaded configuration
    pub config: Arc<AppConfig>,

    /// Checked pricing catalogue
    pub price_book: Arc<PriceBook>,

    /// Registration rules with configured overrides applied
    pub rules: Arc<RuleTable>,

    pub contact_service: Arc<dyn ContactService>,

    pub auth_provider: Arc<dyn AuthProvider>,
}

impl ServerHost {
    pub fn new(
        config: AppConfig,
        contact_service: Arc<dyn ContactService>,
        auth_provider: Arc<dyn AuthProvider>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let price_book = Arc::new(config.price_book()?);
        let rules = Arc::new(config.rule_table());

        tracing::debug!(
            rules = rules.len(),
            plans = price_book.plans().len(),
            "server host ready"
        );

        Ok(Self {
            config: Arc::new(config),
            price_book,
            rules,
            contact_service,
            auth_provider,
        })
    }
}

impl FromRef<ServerHost> for Arc<RuleTable> {
    fn from_ref(host: &ServerHost) -> Self {
        host.rules.clone()
    }
}

impl FromRef<ServerHost> for Arc<PriceBook> {
    fn from_ref(host: &ServerHost) -> Self {
        host.price_book.clone()
    }
}
