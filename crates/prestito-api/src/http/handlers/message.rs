//! Inbound message handler.
//!
//! One request carries one text event for one chat; the response carries
//! every outbound message the event produced, in order. Documents travel
//! base64-encoded with their filename.

use axum::Json;
use axum::extract::{Path, State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use prestito_core::engine::Outbound;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::Authenticated;
use crate::state::AppState;

/// Inbound text event.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// Raw message text; control commands are `/start` and `/cancel`.
    /// May be empty (the extended flow treats empty rate input as
    /// "use the default").
    pub text: String,
}

/// One outbound reply.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    Text { body: String },
    Document { filename: String, content_base64: String },
}

/// Response body: replies in delivery order plus the resulting state.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub chat_id: String,
    pub state: String,
    pub replies: Vec<Reply>,
}

impl From<Outbound> for Reply {
    fn from(outbound: Outbound) -> Self {
        match outbound {
            Outbound::Text(body) => Reply::Text { body },
            Outbound::Document { filename, bytes } => Reply::Document {
                filename,
                content_base64: BASE64.encode(bytes),
            },
        }
    }
}

/// POST /api/v1/sessions/{chat_id}/messages
///
/// The engine call is CPU-bound when it renders a document, so it runs on
/// the blocking pool and never stalls other sessions' event dispatch.
pub async fn post_message(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Json(inbound): Json<InboundMessage>,
) -> Result<Json<MessageResponse>, AppError> {
    if chat_id.trim().is_empty() {
        return Err(AppError::Validation("chat_id must not be empty".to_string()));
    }

    let engine = state.engine.clone();
    let id = chat_id.clone();
    let outbound = tokio::task::spawn_blocking(move || engine.handle_message(&id, &inbound.text))
        .await
        .map_err(|e| AppError::Internal(format!("engine task failed: {e}")))?;

    Ok(Json(MessageResponse {
        state: state.engine.state_of(&chat_id).to_string(),
        chat_id,
        replies: outbound.into_iter().map(Reply::from).collect(),
    }))
}

/// GET /api/v1/sessions/{chat_id}
pub async fn get_session(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "chat_id": chat_id,
        "state": state.engine.state_of(&chat_id).to_string(),
    }))
}
