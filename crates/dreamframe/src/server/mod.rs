//! HTTP API.
//!
//! Routes:
//!
//! - `POST /api/generate` with a JSON body, returns `{"images": [...]}`
//! - `GET /api/generate?q=&n=&s=&style=` shareable link form of the above
//! - `GET /health`
//!
//! Validation failures answer 400 with `{"error": {"formErrors", "fieldErrors"}}`;
//! generation failures answer 500 with `{"error": "<message>"}`.

mod error;
mod handlers;

use axum::routing::get;
use axum::Router;
use dreamframe_core::Generator;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/generate",
            get(handlers::share).post(handlers::generate),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use dreamframe_core::provider::PollinationsProvider;
    use dreamframe_core::{
        Config, DispatchOptions, Dispatcher, GeneratedImage, ImageProvider, ImageRequest,
        ProviderError,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};
    use tower::ServiceExt;

    struct FailingProvider {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl ImageProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, _request: &ImageRequest) -> Result<GeneratedImage, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Status {
                provider: "failing",
                status: 503,
                body: "overloaded".to_string(),
            })
        }
    }

    fn app_with(primary: Option<Arc<dyn ImageProvider>>, options: DispatchOptions) -> Router {
        let free = PollinationsProvider::new("https://image.pollinations.ai");
        let dispatcher = Dispatcher::new(primary, free, options);
        build_router(AppState {
            generator: Arc::new(Generator::new(dispatcher)),
        })
    }

    fn free_only_app() -> Router {
        let mut config = Config::default();
        config.providers.openai.api_key = String::new();
        build_router(AppState {
            generator: Arc::new(Generator::from_config(&config)),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_post_returns_count_images() {
        let body = json!({ "prompt": "I was flying. Then the city melted.", "count": 2 });
        let (status, json) = send(free_only_app(), post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        let images = json["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        for image in images {
            let url = image["url"].as_str().unwrap();
            assert!(url.starts_with("https://image.pollinations.ai/prompt/"));
        }
    }

    #[tokio::test]
    async fn test_post_defaults_to_four_images() {
        let body = json!({ "prompt": "A lighthouse made of glass" });
        let (status, json) = send(free_only_app(), post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["images"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_short_prompt_is_400_with_field_errors() {
        let (status, json) = send(free_only_app(), post_json(r#"{"prompt":"hey"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["fieldErrors"]["prompt"][0], "Prompt too short");
        assert_eq!(json["error"]["formErrors"], json!([]));
    }

    #[tokio::test]
    async fn test_every_violation_reported() {
        let body = json!({ "prompt": "hey", "count": 9, "style": "anime" });
        let (status, json) = send(free_only_app(), post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields = json["error"]["fieldErrors"].as_object().unwrap();
        assert!(fields.contains_key("prompt"));
        assert!(fields.contains_key("count"));
        assert!(fields.contains_key("style"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_400_form_error() {
        let (status, json) = send(free_only_app(), post_json("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let form_errors = json["error"]["formErrors"].as_array().unwrap();
        assert_eq!(form_errors.len(), 1);
        assert!(form_errors[0].as_str().unwrap().starts_with("Invalid JSON: "));
        assert_eq!(json["error"]["fieldErrors"], json!({}));
    }

    #[tokio::test]
    async fn test_json_null_body_is_400_type_error() {
        let (status, json) = send(free_only_app(), post_json("null")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["formErrors"], json!(["Expected object, received null"]));
    }

    #[tokio::test]
    async fn test_share_link() {
        let uri = "/api/generate?q=A%20whale%20in%20the%20sky&n=1&s=512x512&style=comic";
        let (status, json) = send(free_only_app(), get(uri)).await;

        assert_eq!(status, StatusCode::OK);
        let images = json["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        let url = images[0]["url"].as_str().unwrap();
        assert!(url.contains("width=512&height=512"));
    }

    #[tokio::test]
    async fn test_share_link_without_prompt_is_400() {
        let (status, json) = send(free_only_app(), get("/api/generate?n=2")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["fieldErrors"]["prompt"][0], "Required");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = send(free_only_app(), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], dreamframe_core::VERSION);
        assert_eq!(json["primary_available"], false);
    }

    #[tokio::test]
    async fn test_failing_primary_falls_back() {
        let calls = Arc::new(AtomicU32::new(0));
        let primary: Arc<dyn ImageProvider> = Arc::new(FailingProvider {
            calls: Arc::clone(&calls),
        });
        let app = app_with(Some(primary), DispatchOptions::default());

        let body = json!({ "prompt": "The moon rang like a bell.", "count": 3, "provider": "openai" });
        let (status, json) = send(app, post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let images = json["images"].as_array().unwrap();
        assert_eq!(images.len(), 3);
        assert!(images
            .iter()
            .all(|i| i["url"].as_str().unwrap().contains("pollinations")));
    }

    #[tokio::test]
    async fn test_failing_primary_without_fallback_is_500() {
        let primary: Arc<dyn ImageProvider> = Arc::new(FailingProvider {
            calls: Arc::new(AtomicU32::new(0)),
        });
        let options = DispatchOptions {
            fallback_enabled: false,
            ..DispatchOptions::default()
        };
        let app = app_with(Some(primary), options);

        let body = json!({ "prompt": "The moon rang like a bell.", "provider": "openai" });
        let (status, json) = send(app, post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "failing HTTP 503: overloaded");
    }

    #[tokio::test]
    async fn test_missing_credential_is_500() {
        let options = DispatchOptions {
            fallback_enabled: false,
            ..DispatchOptions::default()
        };
        let app = app_with(None, options);

        let body = json!({ "prompt": "A library under the sea", "provider": "openai" });
        let (status, json) = send(app, post_json(&body.to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Missing OPENAI_API_KEY" }));
    }
}
