mod error;
mod maps;
mod profile;
mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::app_config::Server;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::get;
use axum::{Json, Router};
use maps::{mosque_handler, mosques_handler, prayer_times_handler, qibla_direction_handler};
use profile::{profile_handler, update_profile_handler};
use serde_json::{Value, json};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub fn router(state: Arc<AppState>, cors_max_age: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(cors_max_age);

    let api = Router::new()
        .route("/maps/mosques", get(mosques_handler))
        .route("/maps/mosques/{id}", get(mosque_handler))
        .route("/maps/qibla-direction", get(qibla_direction_handler))
        .route("/maps/prayer-times", get(prayer_times_handler))
        .route("/user/profile", get(profile_handler).put(update_profile_handler));

    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": format!("{} API", env!("CARGO_PKG_NAME")) }))
}

/// Serves the API until the process receives Ctrl+C or SIGTERM.
#[instrument(skip_all)]
pub async fn serve(config: &Server, state: Arc<AppState>) -> io::Result<()> {
    let app = router(state, config.cors_max_age());

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("🌐 Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("🌐 Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
