//! HTTP server for the review label bot.
//!
//! # Endpoints
//!
//! - `POST /github` - Accepts GitHub webhook deliveries and reconciles inline
//! - `GET /ping` - Returns 200 if server is running
//! - `GET /health` - Same as `/ping`, for load balancer probes

use std::sync::Arc;

use crate::effects::GitHubInterpreter;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{WebhookError, webhook_handler};

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
pub struct AppState<G> {
    inner: Arc<AppStateInner<G>>,
}

struct AppStateInner<G> {
    /// GitHub access used by webhook reconciliation.
    client: G,

    /// Webhook secret for HMAC-SHA256 signature verification.
    /// When absent, signatures are not checked.
    webhook_secret: Option<Vec<u8>>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G> AppState<G> {
    pub fn new(client: G, webhook_secret: Option<Vec<u8>>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                client,
                webhook_secret,
            }),
        }
    }

    pub fn client(&self) -> &G {
        &self.inner.client
    }

    /// Returns the webhook secret, if one is configured.
    pub fn webhook_secret(&self) -> Option<&[u8]> {
        self.inner.webhook_secret.as_deref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<G>(app_state: AppState<G>) -> axum::Router
where
    G: GitHubInterpreter + Send + Sync + 'static,
{
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/github", post(webhook_handler::<G>))
        .route("/ping", get(health_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
