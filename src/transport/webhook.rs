//! Webhook transport.
//!
//! Routes:
//! - `GET|HEAD /health` answers `{"status":"ok"}`
//! - `POST /{token}` accepts a JSON update when `{token}` is the bot token
//!
//! An update is handled to completion before the response is written, so the
//! status code reflects the result. A document transfer that outlasts
//! Telegram's delivery timeout is retried by Telegram and can be sent back twice.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use teloxide::types::Update;
use tracing::{error, info, warn};

use super::TransportError;
use crate::app::{AppContext, handle_update};
use crate::config::Settings;
use crate::telegram::TelegramBot;

/// Builds the webhook HTTP router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/{token}", post(receive_update))
        .with_state(ctx)
}

/// Registers the webhook if needed and serves until Ctrl+C.
pub async fn serve(
    ctx: Arc<AppContext>,
    bot: &TelegramBot,
    settings: &Settings,
) -> Result<(), TransportError> {
    let url = settings.webhook_url()?;
    if bot.ensure_webhook(&url).await? {
        info!("Webhook set to {}", settings.masked_webhook_url());
    } else {
        info!("Webhook unchanged at {}", settings.masked_webhook_url());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening for webhook calls on {}", addr);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Webhook server stopped");
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn receive_update(
    State(ctx): State<Arc<AppContext>>,
    Path(token): Path<String>,
    body: Bytes,
) -> StatusCode {
    if !ctx.is_webhook_token(&token) {
        warn!("Rejected webhook call with a wrong token");
        return StatusCode::FORBIDDEN;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            error!("Failed to parse webhook body as an update: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    match handle_update(&ctx, update).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!("Failed to handle webhook update: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => {
            warn!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
