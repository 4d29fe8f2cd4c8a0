//! Landing-page backend: email signups into a flat JSON file and a narrow
//! proxy to the Gemini generative-text API.

pub mod app;
pub mod config;
pub mod error;
pub mod locale;
pub mod logger;
pub mod models;
pub mod proxy;
pub mod routes;
pub mod store;

pub use app::AppState;
