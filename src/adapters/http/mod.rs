//! HTTP adapters - router assembly and plain HTTP endpoints.
//!
//! The relay exposes two routes:
//!
//! - `GET {relay.path}` - WebSocket signaling endpoint
//! - `GET /health` - liveness and occupancy counters

pub mod health;

use axum::{routing::get, Router};
use ::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{signaling_router, SignalingState};
use crate::config::{AppConfig, ServerConfig};

pub use health::{health_handler, HealthResponse};

/// Build the application router with tracing and CORS layers applied.
pub fn app_router(state: SignalingState, config: &AppConfig) -> Router {
    signaling_router(&config.relay.path)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy from `server.cors_origins`; any origin when unset.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::InMemoryRoomStore;
    use crate::ports::RoomStore;
    use ::http::{header, Request, StatusCode};
    use axum::body::Body;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(cors_origins: Option<&str>) -> Router {
        let mut config = AppConfig::default();
        config.server.cors_origins = cors_origins.map(str::to_string);
        let store: Arc<dyn RoomStore> = Arc::new(InMemoryRoomStore::new());
        app_router(SignalingState::new(store, config.relay.clone()), &config)
    }

    /// `Access-Control-Allow-Origin` returned for a request from `origin`.
    async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn any_origin_when_none_configured() {
        let allowed = allowed_origin(app(None), "https://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn configured_origins_are_echoed() {
        let origins = Some("https://portal.school.example, http://localhost:5173");

        let allowed = allowed_origin(app(origins), "http://localhost:5173").await;

        assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_cors_header() {
        let app = app(Some("https://portal.school.example"));

        assert_eq!(allowed_origin(app, "https://evil.example").await, None);
    }

    #[tokio::test]
    async fn invalid_origin_entries_are_skipped() {
        let app = app(Some("https://portal.school.example,bad\u{7f}origin"));

        let allowed = allowed_origin(app, "https://portal.school.example").await;

        assert_eq!(allowed.as_deref(), Some("https://portal.school.example"));
    }
}
