//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::search::{SearchEngine, SearchError};
use super::{handlers, models::SearchParams};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Configure and start the HTTP server
pub async fn start_http_server(engine: Arc<SearchEngine>, host: &str, port: u16) -> Result<()> {
    info!("🚀 Starting HTTP server on port {}", port);

    let app_state = AppState { engine };

    // Configure CORS to allow browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    // Build the application with routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/api/episodes", get(episodes_handler))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("🌐 Search API listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    match handlers::health_check().await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
        }
    }
}

/// Search handler
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    match handlers::search(&state.engine, &params).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            let status = search_error_status(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!("Search request failed: {}", e);
            }
            // Error bodies keep an empty results array so clients can render
            // them like an empty search.
            (
                status,
                Json(serde_json::json!({"error": e.to_string(), "results": []})),
            )
                .into_response()
        }
    }
}

/// Episode listing handler
async fn episodes_handler(State(state): State<AppState>) -> impl IntoResponse {
    match handlers::list_episodes(&state.engine).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            error!("Episode listing failed: {}", e);
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
        }
    }
}

fn search_error_status(error: &SearchError) -> StatusCode {
    match error {
        SearchError::EmptyQuery | SearchError::QueryTooShort => StatusCode::BAD_REQUEST,
        SearchError::UnknownEpisode(_) => StatusCode::NOT_FOUND,
        SearchError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            search_error_status(&SearchError::EmptyQuery),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            search_error_status(&SearchError::QueryTooShort),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            search_error_status(&SearchError::UnknownEpisode("s9e9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            search_error_status(&SearchError::Registry(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
