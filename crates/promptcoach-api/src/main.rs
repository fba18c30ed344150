//! Prompt Coach API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use promptcoach_analytics::{CtaNotifier, HttpCtaNotifier};
use promptcoach_core::clock::{Clock, SystemClock};
use promptcoach_core::repository::EventRepository;
use promptcoach_event_store::InMemoryEventRepository;
use promptcoach_api::{routes, state};
use promptcoach_onboarding::application::session_service::SessionService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Prompt Coach API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let cta_endpoint = std::env::var("CTA_ENDPOINT_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:4000/analytics/cta".to_string());

    // Build application state.
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository: Arc<dyn EventRepository> = Arc::new(InMemoryEventRepository::new());
    let notifier: Arc<dyn CtaNotifier> = Arc::new(HttpCtaNotifier::new(cta_endpoint));
    let session_service = SessionService::new(clock, repository, notifier);
    let app_state = state::AppState::new(session_service);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/onboarding", routes::onboarding::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
