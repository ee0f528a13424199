//! Chat relay handler.
//!
//! `POST /chat` either (re)initializes the session's persona or relays one
//! message to the inference endpoint, depending on the `system` flag.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use manmaru_types::persona::Persona;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionHandle;
use crate::state::AppState;

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub system: bool,
}

/// A validated chat request.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// Reset the transcript to the persona's system prompt.
    Initialize(Persona),
    /// Relay one user message.
    Exchange { message: String },
}

impl TryFrom<ChatRequest> for ChatCommand {
    type Error = AppError;

    fn try_from(request: ChatRequest) -> Result<Self, Self::Error> {
        if request.system {
            return Ok(ChatCommand::Initialize(Persona::from_mode(
                request.mode.as_deref(),
            )));
        }

        // `mode` only matters at initialization time.
        match request.message {
            Some(message) if !message.trim().is_empty() => Ok(ChatCommand::Exchange { message }),
            Some(_) => Err(AppError::Validation(
                "'message' must not be empty".to_string(),
            )),
            None => Err(AppError::Validation(
                "'message' is required unless 'system' is true".to_string(),
            )),
        }
    }
}

/// Body of a successful `POST /chat` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    session: SessionHandle,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let command = ChatCommand::try_from(request)?;

    let reply = match command {
        ChatCommand::Initialize(persona) => {
            state.relay.initialize(session.id(), persona).await?;
            String::new()
        }
        ChatCommand::Exchange { message } => state.relay.exchange(session.id(), &message).await?,
    };

    Ok(session.attach(Json(ChatReply { reply })))
}
