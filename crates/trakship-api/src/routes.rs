//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use trakship_core::error::TrakshipError;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The chat widget is embedded in marketing pages served from arbitrary
    // origins, so CORS is open for the public endpoints.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/signup", post(handlers::signup))
        .route("/api/signin", post(handlers::signin))
        .route("/api/chat/start", post(handlers::chat_start))
        .route("/api/chat/message", post(handlers::chat_message))
        .route("/api/chat/history/{session_id}", get(handlers::chat_history));

    let protected_routes = Router::new()
        .route("/api/user/profile", get(handlers::profile))
        .route("/api/chat/sessions", get(handlers::chat_sessions))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ));

    public_routes
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Binds to 0.0.0.0 so the widget can reach the API from other hosts.
pub async fn start_server(state: AppState) -> Result<(), TrakshipError> {
    let port = state.config.general.port;
    let addr = format!("0.0.0.0:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TrakshipError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| TrakshipError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
