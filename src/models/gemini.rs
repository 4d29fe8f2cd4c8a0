use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the `/api/gemini/*` endpoints.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub system_prompt: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_query: String,
    /// Free-form caller label, only ever logged.
    pub display_name: Option<String>,
}

/// Capability directive attached to an upstream request.
///
/// Serializes to the upstream tool object, e.g. `{"google_search": {}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolDirective {
    GoogleSearch {},
}

/// A grounding attribution with both fields present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Result of one successful upstream call.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub generated_text: String,
    pub sources: Vec<Source>,
    /// The upstream body exactly as received.
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_search_directive_wire_shape() {
        let tools = vec![ToolDirective::GoogleSearch {}];
        assert_eq!(
            serde_json::to_value(&tools).unwrap(),
            serde_json::json!([{ "google_search": {} }])
        );
    }

    #[test]
    fn empty_prompt_fails_validation() {
        let req: ProxyRequest =
            serde_json::from_str(r#"{"systemPrompt":"","userQuery":"hi"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: ProxyRequest =
            serde_json::from_str(r#"{"systemPrompt":"s","userQuery":"q","displayName":"Info"}"#)
                .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.display_name.as_deref(), Some("Info"));
    }
}
