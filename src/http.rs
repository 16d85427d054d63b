//! HTTP surfaces.
//!
//! - the command and history API, served on `http.address`
//! - Prometheus `/metrics`, served on its own port

use crate::app::App;
use crate::commands::{
    Command, CommandProcessingResponse, ExecutionContext, MessageType, ResponseMessage,
};
use crate::db::HistoryEntry;
use crate::services::HistorySummary;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jukebox_proto::PlayerState;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, warn};

/// Returned when a command comes from any channel but the authorized one.
pub const UNAUTHORIZED_CHANNEL_MESSAGE: &str =
    "Commands are only accepted in the jukebox channel.";

/// Build the command and history router.
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/commands/slack", post(slack_command))
        .route("/commands", post(json_command))
        .route("/history", get(history))
        .route("/history/summary", get(history_summary))
        .route("/player/state", get(player_state))
        .with_state(app)
}

/// Serve `router` on `addr` until the task is dropped.
pub async fn run_api_server(addr: SocketAddr, app: Arc<App>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Command API listening");
    axum::serve(listener, router(app)).await?;
    Ok(())
}

fn authorized(app: &App, channel_id: &str, user: &str) -> bool {
    if channel_id == app.commands.authorized_channel_id {
        return true;
    }
    warn!(channel_id = %channel_id, user = %user, "Command from unauthorized channel rejected");
    false
}

// ============================================================================
// Slack slash commands
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SlackCommandForm {
    pub channel_id: String,
    pub command: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlackResponseType {
    Ephemeral,
    InChannel,
}

#[derive(Debug, Serialize)]
pub struct SlackResponse {
    pub response_type: SlackResponseType,
    pub blocks: Vec<SlackBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlock {
    Section { text: SlackText },
    Header { text: SlackText },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackText {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl From<&ResponseMessage> for SlackBlock {
    fn from(message: &ResponseMessage) -> Self {
        let text = message.text.clone();
        match message.kind {
            MessageType::Plain => Self::Section {
                text: SlackText::PlainText { text },
            },
            MessageType::Markdown => Self::Section {
                text: SlackText::Mrkdwn { text },
            },
            MessageType::Header => Self::Header {
                text: SlackText::PlainText { text },
            },
        }
    }
}

impl From<&CommandProcessingResponse> for SlackResponse {
    fn from(response: &CommandProcessingResponse) -> Self {
        Self {
            response_type: if response.is_visible_to_issuer_only {
                SlackResponseType::Ephemeral
            } else {
                SlackResponseType::InChannel
            },
            blocks: response.messages.iter().map(SlackBlock::from).collect(),
        }
    }
}

/// The text handed to the parser for a slash command.
///
/// The configured slash command carries the command in its text; any other
/// slash command names the command itself.
fn slack_command_text(form: &SlackCommandForm, slash_command: &str) -> String {
    if form.command == slash_command {
        form.text.clone()
    } else {
        format!("{} {}", form.command.trim_start_matches('/'), form.text)
    }
}

async fn slack_command(
    State(app): State<Arc<App>>,
    Form(form): Form<SlackCommandForm>,
) -> Json<SlackResponse> {
    if !authorized(&app, &form.channel_id, &form.user_name) {
        let response = CommandProcessingResponse::single_text(UNAUTHORIZED_CHANNEL_MESSAGE, true);
        return Json(SlackResponse::from(&response));
    }

    let text = slack_command_text(&form, &app.commands.slash_command);
    let ctx = ExecutionContext::new(form.user_name.clone()).in_channel(form.channel_id.clone());
    let response = app.executor.process_from_text(&text, &ctx).await;
    Json(SlackResponse::from(&response))
}

// ============================================================================
// JSON commands
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCommandRequest {
    pub channel_id: String,
    /// When set, `text` holds only the arguments.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub issuer_only: bool,
}

async fn json_command(
    State(app): State<Arc<App>>,
    Json(request): Json<JsonCommandRequest>,
) -> (StatusCode, Json<CommandProcessingResponse>) {
    if !authorized(&app, &request.channel_id, &request.user) {
        return (
            StatusCode::FORBIDDEN,
            Json(CommandProcessingResponse::single_text(UNAUTHORIZED_CHANNEL_MESSAGE, true)),
        );
    }

    let ctx = ExecutionContext {
        user: request.user,
        channel_id: Some(request.channel_id),
        issuer_only: request.issuer_only,
    };
    let response = match request.command {
        Some(key) => {
            let command = Command::new(key, request.text.trim());
            app.executor.process_command(&command, &ctx).await
        }
        None => app.executor.process_from_text(&request.text, &ctx).await,
    };
    (StatusCode::OK, Json(response))
}

// ============================================================================
// History and player state
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> Response {
    error!(error = %e, "{context}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn history(State(app): State<Arc<App>>) -> Response {
    match app.history.get_all().await {
        Ok(entries) => Json(HistoryResponse { entries }).into_response(),
        Err(e) => internal_error("Failed to read history", e),
    }
}

async fn history_summary(State(app): State<Arc<App>>) -> Response {
    match app.history.generate_summary().await {
        Ok(summary) => Json::<HistorySummary>(summary).into_response(),
        Err(e) => internal_error("Failed to summarize history", e),
    }
}

/// Live state from the primary player, or the canonical copy when it cannot answer.
async fn player_state(State(app): State<Arc<App>>) -> Json<PlayerState> {
    let state = match app.hub.request_state(app.hub.state_request_timeout()).await {
        Ok(state) => state,
        Err(e) => {
            tracing::debug!(error = %e, "Serving canonical player state");
            app.hub.owner().get_state()
        }
    };
    Json(state)
}

// ============================================================================
// Metrics
// ============================================================================

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

/// Run the HTTP server for Prometheus metrics.
///
/// Binds to `0.0.0.0:port` and serves the `/metrics` endpoint.
/// This is a long-running task that should be spawned in the background.
pub async fn run_metrics_server(port: u16) {
    let app = Router::new().route("/metrics", get(metrics_handler));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Prometheus HTTP server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind metrics server on {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Metrics server error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(command: &str, text: &str) -> SlackCommandForm {
        SlackCommandForm {
            channel_id: "C1".into(),
            command: command.into(),
            text: text.into(),
            user_name: "alice".into(),
        }
    }

    #[test]
    fn slash_command_text_composition() {
        assert_eq!(slack_command_text(&form("/fm", "skip 2"), "/fm"), "skip 2");
        assert_eq!(slack_command_text(&form("/skip", "2"), "/fm"), "skip 2");
    }

    #[test]
    fn slack_blocks_follow_message_types() {
        let response = CommandProcessingResponse::new(
            vec![
                ResponseMessage::header("Tags"),
                ResponseMessage::markdown("- _a_"),
                ResponseMessage::plain("done"),
            ],
            false,
        );
        assert_eq!(
            serde_json::to_value(SlackResponse::from(&response)).unwrap(),
            json!({
                "response_type": "in_channel",
                "blocks": [
                    {"type": "header", "text": {"type": "plain_text", "text": "Tags"}},
                    {"type": "section", "text": {"type": "mrkdwn", "text": "- _a_"}},
                    {"type": "section", "text": {"type": "plain_text", "text": "done"}}
                ]
            })
        );
    }

    #[test]
    fn issuer_only_is_ephemeral() {
        let response = CommandProcessingResponse::single_text("psst", true);
        let value = serde_json::to_value(SlackResponse::from(&response)).unwrap();
        assert_eq!(value["response_type"], "ephemeral");
    }
}
