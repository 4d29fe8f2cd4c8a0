use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    AppState,
    error::ProxyError,
    models::{
        gemini::{ProxyRequest, ToolDirective},
        response::ErrorResponse,
    },
};

const GENERATION_FAILED: &str = "Generative service request failed";

/// POST /api/gemini/search: grounded answer using web search.
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    forward(&state, body, "search", Some(&[ToolDirective::GoogleSearch {}])).await
}

/// POST /api/gemini/generate: free-form generation, no tools.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    forward(&state, body, "generate", None).await
}

async fn forward(
    state: &AppState,
    body: Result<Json<ProxyRequest>, JsonRejection>,
    variant: &'static str,
    tools: Option<&[ToolDirective]>,
) -> Response {
    let req = match body {
        Ok(Json(req)) if req.validate().is_ok() => req,
        Ok(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("systemPrompt and userQuery are required")),
            )
                .into_response();
        }
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    let display_name = req.display_name.as_deref().unwrap_or("anonymous");
    info!(variant, display_name, "forwarding prompt upstream");

    match state
        .proxy
        .invoke(&req.system_prompt, &req.user_query, tools)
        .await
    {
        Ok(resp) => {
            info!(variant, display_name, sources = resp.sources.len(), "upstream call succeeded");
            (StatusCode::OK, Json(resp.raw)).into_response()
        }
        Err(e) => {
            match &e {
                ProxyError::Configuration => warn!(variant, display_name, "proxy call without credential"),
                _ => error!(variant, display_name, error = %e, "upstream call failed"),
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(GENERATION_FAILED)),
            )
                .into_response()
        }
    }
}
