//! Axum web server exposing the search pipeline

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::clock::SystemClock;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::llm::ChatClient;
use crate::search::response::ErrorResponse;
use crate::search::SearchService;
use crate::store::rest::RestStore;
use crate::store::types::Campus;
use crate::store::ItemStore;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub message: String,
    pub campus: Campus,
}

/// Build the search service from configuration
///
/// The model client is optional: without an API key every query takes the
/// rule-based path, which is a fully functional degradation.
pub fn build_service(config: &Config) -> Arc<SearchService> {
    let store: Arc<dyn ItemStore> =
        Arc::new(RestStore::new(&config.store, Config::store_api_key()));

    let model = if config.model.enabled {
        match Config::model_api_key() {
            Some(key) => Some(ChatClient::new(&config.model, key)),
            None => {
                info!("no model API key configured, using rule-based interpretation only");
                None
            }
        }
    } else {
        None
    };

    Arc::new(SearchService::new(
        config,
        store,
        model,
        Arc::new(SystemClock),
    ))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(api_search))
        .route("/health", get(api_health))
        .with_state(state)
}

/// Run the server until shutdown
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState {
        service: build_service(config),
    };
    let app = router(state);

    let addr = SocketAddr::from((config.server.host, config.server.port));
    info!(%addr, "findu search service listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn api_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    match state.service.search(&request.message, request.campus).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!(error = %e, query = %request.message, "search request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}

async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_parses_campus() {
        let body = r#"{"message": "저번주 아이폰", "campus": "신촌"}"#;
        let request: SearchRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.campus, Campus::Sinchon);

        // Unknown campus is rejected before the pipeline runs
        let bad = r#"{"message": "지갑", "campus": "서울"}"#;
        assert!(serde_json::from_str::<SearchRequest>(bad).is_err());
    }
}
