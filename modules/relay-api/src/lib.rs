pub mod rest;
pub mod scrape;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

pub use scrape::Scraper;
pub use traits::ActorRunner;

pub struct AppState {
    pub scraper: Scraper,
}

impl AppState {
    pub fn new(scraper: Scraper) -> Self {
        Self { scraper }
    }
}

/// Build the HTTP surface: liveness on `/`, the relay on `/scrape`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(rest::home))
        .route("/scrape", post(rest::api_scrape))
        .with_state(state)
        // CORS: any origin with credentials, so the origin is mirrored rather than `*`
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        )
        // Scrape results are per-request; never cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
