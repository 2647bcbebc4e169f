pub mod embed;
pub mod error;
pub mod routes;
pub mod state;
pub mod surface;

use axum::routing::{get, post};
use axum::Router;
use formkit_core::{FormDefinition, Outcome};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tower_http::trace::TraceLayer;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// How `serve_form` exposes the form.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// `0` lets the OS pick a free port.
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 0,
            open_browser: true,
        }
    }
}

/// Build the axum Router with all routes and middleware.
/// Used by `serve_form()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .route("/", get(routes::page::get_page))
        .route("/api/form", get(routes::form::get_form))
        .route(
            "/api/sessions/{id}/messages",
            post(routes::messages::post_message),
        )
        .route("/api/events", get(routes::events::sse_events))
        .route("/assets/{*path}", get(embed::asset_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Host `definition` on a local port until it is submitted or cancelled.
///
/// Ctrl-C while the form is open disposes the session, which resolves it as
/// cancelled. The server shuts down gracefully before this returns.
pub async fn serve_form(definition: FormDefinition, config: ServeConfig) -> anyhow::Result<Outcome> {
    let app_state = state::AppState::new()?;
    let mut outcomes = app_state.outcome_tx.subscribe();

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    let port = listener.local_addr()?.port();

    let session = app_state.session.lock().await.start(definition, None, None);
    let url = format!("http://localhost:{port}");
    tracing::info!(%session, "form available at {url}");
    if config.open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open a browser; visit {url}");
        }
    }

    let interrupt_state = app_state.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted; closing form");
            let outcome = interrupt_state.session.lock().await.dispose();
            if let Some(outcome) = outcome {
                interrupt_state.publish_outcome(outcome);
            }
        }
    });

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let router = build_router(app_state);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    let outcome = loop {
        match outcomes.recv().await {
            Ok(outcome) => break Ok(outcome),
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => {
                break Err(anyhow::anyhow!("form session ended without an outcome"))
            }
        }
    };

    interrupt.abort();
    let _ = stop_tx.send(());
    // An event stream the browser never closed would hold shutdown open.
    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(joined) => joined??,
        Err(_) => {
            tracing::debug!("connections still open after shutdown; dropping them");
            server.abort();
        }
    }
    outcome
}
