//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::contact::{ContactService, LoggingContactService};
use crate::core::auth::{AuthProvider, DemoAuthProvider};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the One Barn HTTP server
///
/// Without explicit collaborators, contact submissions go to a
/// [`LoggingContactService`] and logins to a [`DemoAuthProvider`] over the
/// configured demo accounts.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(AppConfig::load()?)
///     .with_contact_service(MyCrmService::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    contact_service: Option<Arc<dyn ContactService>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            contact_service: None,
            auth_provider: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set where contact submissions are delivered
    pub fn with_contact_service(mut self, service: impl ContactService + 'static) -> Self {
        self.contact_service = Some(Arc::new(service));
        self
    }

    /// Set the credential backend for `/auth/login`
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the registration flow, such as
    /// webhooks from a payment processor.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::post};
    ///
    /// let hooks = Router::new().route("/webhooks/payments", post(payment_hook));
    ///
    /// ServerBuilder::new(config)
    ///     .with_custom_routes(hooks)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared host state
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let contact_service = self
            .contact_service
            .take()
            .unwrap_or_else(|| Arc::new(LoggingContactService::new()));
        let auth_provider = self.auth_provider.take().unwrap_or_else(|| {
            Arc::new(DemoAuthProvider::new(self.config.demo_accounts.clone()))
        });

        ServerHost::new(self.config.clone(), contact_service, auth_provider)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = self.build_host()?;
        RestExposure::build_router(host, std::mem::take(&mut self.custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = AppConfig::load()?;
    /// let addr = config.server.addr();
    /// ServerBuilder::new(config).serve(&addr).await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
