use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use hyper::StatusCode;
use serde_json::json;

use crate::{
    AppState,
    models::response::HealthResponse,
    routes::LangQuery,
};

/// GET /locale?lang=xx: the bundle the landing page should render with.
pub async fn get_locale(
    State(state): State<AppState>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = LangQuery::or_default(query);
    let (lang, translations) = state.locales.for_tag(query.lang.as_deref());
    (
        StatusCode::OK,
        Json(json!({ "lang": lang.code(), "translations": translations })),
    )
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            proxy_enabled: state.proxy.is_enabled(),
        }),
    )
}
