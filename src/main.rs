use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use gouvgpt_landing::{
    AppState, app,
    config::Config,
    error::AppError,
    locale::Locales,
    logger,
    proxy::GeminiProxy,
    store::{JsonFileStore, SubscriberStore},
};
use tracing::{error, info, warn};

async fn run(config: Config) -> Result<(), AppError> {
    let locales = Locales::load(&config.locales_dir)?;

    let store = JsonFileStore::new(config.emails_file.clone());
    match store.list().await {
        Ok(emails) => info!(
            path = %config.emails_file.display(),
            email_count = emails.len(),
            "subscriber store ready"
        ),
        Err(e) => warn!(error = %e, "subscriber store unavailable; signups will fail"),
    }

    let proxy = GeminiProxy::new(&config.gemini)
        .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
    if !proxy.is_enabled() {
        warn!("GEMINI_API_KEY not set; generative endpoints will return errors");
    }

    let app_state = AppState {
        store: Arc::new(store),
        proxy: Arc::new(proxy),
        locales: Arc::new(locales),
    };

    let app = app::router(app_state, &config.domain);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "server running on http://localhost:{}", config.port);
    info!("public site: https://{}/?lang=fr and https://{}/?lang=en", config.domain, config.domain);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!(error = %e, "failed to listen for SIGTERM"),
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init(&config.log_level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}
