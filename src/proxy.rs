//! Forwarding of prompts to the Gemini `generateContent` endpoint.
//!
//! One call, one upstream round-trip: no retries, no caching, no streaming.
//! Upstream wire types are private to this module.

use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::GeminiConfig;
use crate::error::ProxyError;
use crate::models::gemini::{ProxyResponse, Source, ToolDirective};

pub struct GeminiProxy {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    upstream_calls: AtomicUsize,
}

impl GeminiProxy {
    pub fn new(config: &GeminiConfig) -> Result<Self, ProxyError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            upstream_calls: AtomicUsize::new(0),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Number of upstream requests attempted so far.
    pub fn upstream_calls(&self) -> usize {
        self.upstream_calls.load(Ordering::Relaxed)
    }

    /// Send one prompt upstream and extract the first candidate's text.
    ///
    /// `tools` is `None` for plain generation and carries e.g. the web-search
    /// directive for grounded answers.
    pub async fn invoke(
        &self,
        system_instruction: &str,
        user_query: &str,
        tools: Option<&[ToolDirective]>,
    ) -> Result<ProxyResponse, ProxyError> {
        let api_key = self.api_key.as_deref().ok_or(ProxyError::Configuration)?;

        let payload = GenerateRequest {
            contents: vec![Content::text(user_query)],
            system_instruction: Content::text(system_instruction),
            tools,
        };

        debug!(
            endpoint = %self.endpoint,
            tools = tools.map_or(0, <[_]>::len),
            query_len = user_query.len(),
            "sending generateContent request"
        );

        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, timeout = e.is_timeout(), "upstream request failed");
                ProxyError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                warn!(status = status.as_u16(), error = %e, "failed to read upstream error body");
                ProxyError::Transport(e)
            })?;
            warn!(status = status.as_u16(), "upstream returned non-success status");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let raw: Value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "upstream success body is not JSON");
            ProxyError::EmptyResponse
        })?;

        extract(raw)
    }
}

/// Pull the first text part and the grounding sources out of `raw`.
///
/// Fields are read leniently: an attribution of the wrong shape is dropped,
/// only a missing text part fails the call.
fn extract(raw: Value) -> Result<ProxyResponse, ProxyError> {
    let candidate = raw
        .pointer("/candidates/0")
        .ok_or(ProxyError::EmptyResponse)?;

    let generated_text = candidate
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(ProxyError::EmptyResponse)?;

    let sources: Vec<Source> = candidate
        .pointer("/groundingMetadata/groundingAttributions")
        .and_then(Value::as_array)
        .map(|attributions| attributions.iter().filter_map(web_source).collect())
        .unwrap_or_default();

    Ok(ProxyResponse {
        generated_text,
        sources,
        raw,
    })
}

fn web_source(attribution: &Value) -> Option<Source> {
    let web = attribution.get("web")?;
    let title = web.get("title")?.as_str().filter(|t| !t.is_empty())?;
    let uri = web.get("uri")?.as_str().filter(|u| !u.is_empty())?;
    Some(Source {
        title: title.to_string(),
        uri: uri.to_string(),
    })
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDirective]>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}
