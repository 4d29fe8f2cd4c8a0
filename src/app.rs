//! Shared handler state and the HTTP router.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    locale::Locales,
    proxy::GeminiProxy,
    routes::{gemini, locale, subscribers},
    store::SubscriberStore,
};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Cheap to clone; every field is reference-counted and read-only.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubscriberStore>,
    pub proxy: Arc<GeminiProxy>,
    pub locales: Arc<Locales>,
}

pub fn router(state: AppState, domain: &str) -> Router {
    Router::new()
        .route("/subscribe", post(subscribers::subscribe))
        .route("/api/gemini/search", post(gemini::search))
        .route("/api/gemini/generate", post(gemini::generate))
        .route("/locale", get(locale::get_locale))
        .route("/health", get(locale::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(cors(domain)),
        )
        .with_state(state)
}

/// Same-site pages need no CORS; this admits the public origin only.
fn cors(domain: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    match HeaderValue::from_str(&format!("https://{domain}")) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => layer,
    }
}
