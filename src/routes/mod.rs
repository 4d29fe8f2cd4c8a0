pub mod gemini;
pub mod locale;
pub mod subscribers;

use axum::extract::{Query, rejection::QueryRejection};
use serde::Deserialize;
use tracing::debug;

/// `?lang=xx` query string shared by the localized routes.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    /// An unparsable query string (e.g. a repeated `lang`) means no tag.
    pub fn or_default(query: Result<Query<LangQuery>, QueryRejection>) -> Self {
        match query {
            Ok(Query(query)) => query,
            Err(rejection) => {
                debug!(error = %rejection, "ignoring unparsable query string");
                Self::default()
            }
        }
    }
}
