//! HTTP API Layer
//!
//! This crate exposes the claim intake wizard over REST using Axum. One
//! process drives one wizard session, the way one browser tab does.
//!
//! # Architecture
//!
//! - **Handlers**: Thin wrappers over [`WizardController`] operations
//! - **Middleware**: Request logging, tracing, request ids
//! - **DTOs**: Session snapshot and request bodies
//! - **Error Handling**: Wizard errors mapped to status codes with field details
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{build_wizard, create_router, config::ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let app = create_router(build_wizard(&config)?, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::{LoggingSubmissionSink, WizardController};
use infra_store::{open_store, KeyValueDraftStore};

use crate::config::ApiConfig;
use crate::handlers::{health, wizard};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<Mutex<WizardController>>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `wizard` - Loaded wizard session
/// * `config` - API configuration
pub fn create_router(wizard: WizardController, config: ApiConfig) -> Router {
    let state = AppState {
        wizard: Arc::new(Mutex::new(wizard)),
        config,
    };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/wizard", get(wizard::get_wizard))
        .route("/addresses/:postcode", get(wizard::lookup_addresses))
        .route("/wizard/address", post(wizard::submit_address))
        .route("/wizard/personal-details", post(wizard::submit_personal_details))
        .route(
            "/wizard/signature",
            post(wizard::save_signature).delete(wizard::clear_signature),
        )
        .route("/wizard/submit-signature", post(wizard::submit_signature))
        .route("/wizard/back", post(wizard::back))
        .route("/wizard/reset", post(wizard::reset))
        .route("/wizard/submit", post(wizard::submit_claim))
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Opens the configured store and address book and loads the session
///
/// # Errors
///
/// Returns an error if the store or the address book cannot be opened
pub fn build_wizard(config: &ApiConfig) -> anyhow::Result<WizardController> {
    let store = open_store(&config.store_backend()).context("opening draft store")?;
    let lookup = config
        .address_lookup()
        .with_context(|| format!("loading address book {:?}", config.address_book_path))?;

    tracing::info!(
        backend = store.backend_name(),
        addresses = lookup.len(),
        "wizard storage ready"
    );

    Ok(WizardController::load(
        Arc::new(KeyValueDraftStore::new(store)),
        Arc::new(lookup),
        Arc::new(LoggingSubmissionSink),
    ))
}
