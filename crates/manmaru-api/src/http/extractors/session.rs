//! Session cookie extractor.
//!
//! Reads the `manmaru_session` cookie and verifies its signature. A missing,
//! malformed, or forged cookie starts a fresh session, and the handler is
//! expected to send the new cookie back via [`SessionHandle::attach`].

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};

use manmaru_types::session::SessionId;

use crate::http::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the signed session id.
pub const SESSION_COOKIE: &str = "manmaru_session";

/// The caller's session, plus a `Set-Cookie` value when it was just created.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    set_cookie: Option<HeaderValue>,
}

impl SessionHandle {
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Turn `body` into a response, adding `Set-Cookie` for new sessions.
    pub fn attach(&self, body: impl IntoResponse) -> Response {
        let mut response = body.into_response();
        if let Some(cookie) = &self.set_cookie {
            response.headers_mut().insert(SET_COOKIE, cookie.clone());
        }
        response
    }
}

impl FromRequestParts<AppState> for SessionHandle {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(value) = find_cookie(parts, SESSION_COOKIE) {
            match state.signer.verify(value) {
                Ok(id) => {
                    return Ok(Self {
                        id,
                        set_cookie: None,
                    });
                }
                Err(e) => tracing::debug!(error = %e, "Ignoring session cookie"),
            }
        }

        let id = SessionId::new();
        let signed = state
            .signer
            .sign(&id)
            .map_err(|e| AppError::Internal(format!("Failed to sign session cookie: {e}")))?;
        let cookie = HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={signed}; Path=/; HttpOnly; SameSite=Lax"
        ))
        .map_err(|e| AppError::Internal(format!("Invalid session cookie header: {e}")))?;

        tracing::debug!(session_id = %id, "Started new session");
        Ok(Self {
            id,
            set_cookie: Some(cookie),
        })
    }
}

/// Find a cookie by name across all `Cookie` headers.
fn find_cookie<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}
