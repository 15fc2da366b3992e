//! Proxy in front of the purchase prediction service.
//!
//! # General Infrastructure
//! - Terminal form (`predict`) posts `{ age, salary }` to this server
//! - Server validates with the shared `schema` crate, same rules as the form
//! - Valid bodies are forwarded to `PREDICTION_API_URL` (the model service)
//! - Model answer `{ prediction }` is returned verbatim
//!
//!
//!
//! # Status Codes
//!
//! | Outcome                                | Status |
//! |----------------------------------------|--------|
//! | Forwarded, model answered              | 200    |
//! | Body not JSON / schema rejected        | 400    |
//! | Model answered with non-2xx            | 502    |
//! | Model unreachable or timed out         | 502    |
//! | Anything else                          | 500    |
//!
//! Both 502 cases carry different messages so the form can tell a broken
//! model apart from a wrong endpoint.
//!
//!
//!
//! # Environment
//! - `RUST_PORT`: listen port, default `5000`
//! - `PREDICTION_API_URL`: model endpoint, default `http://django:8000/api/predict/`
//! - `PREDICTION_TIMEOUT_MS`: outbound timeout, default `10000`
//! - `RUST_LOG`: tracing filter
//!
//!
//!
//! # Setup
//!
//! ```sh
//! RUST_LOG=info PREDICTION_API_URL=http://localhost:8000/api/predict/ cargo run -p server
//! ```
//!
//! ```sh
//! curl -X POST localhost:5000/api/predict -H 'content-type: application/json' -d '{"age":25,"salary":50000}'
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};

use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;

use config::Config;
use routes::{PREDICT_PATH, predict_handler};
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");
    info!("Forwarding predictions to {}", state.config.prediction_url);

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(PREDICT_PATH, post(predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
