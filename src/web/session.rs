//! Session-backed identity and one-shot status messages.

use axum::{
    extract::FromRequestParts,
    http::{Uri, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppState, WebError, paths};
use crate::db::User;
use crate::domain::UserId;

pub const USER_KEY: &str = "user_id";
const MESSAGES_KEY: &str = "messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: Level,
    pub text: String,
}

/// Queues a message for the next rendered page.
pub async fn push_message(
    session: &Session,
    level: Level,
    text: impl Into<String>,
) -> Result<(), WebError> {
    let mut messages: Vec<FlashMessage> = session.get(MESSAGES_KEY).await?.unwrap_or_default();
    messages.push(FlashMessage {
        level,
        text: text.into(),
    });
    session.insert(MESSAGES_KEY, messages).await?;
    Ok(())
}

/// Drains queued messages. A broken session renders without them.
pub async fn take_messages(session: &Session) -> Vec<FlashMessage> {
    match session.remove::<Vec<FlashMessage>>(MESSAGES_KEY).await {
        Ok(messages) => messages.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read flash messages: {e}");
            Vec::new()
        }
    }
}

/// Binds the session to `user` under a fresh session id.
pub async fn start_session(session: &Session, user: &User) -> Result<(), WebError> {
    session.cycle_id().await?;
    session.insert(USER_KEY, UserId::new(user.id)).await?;
    Ok(())
}

async fn session_from_parts(
    parts: &mut Parts,
    state: &Arc<AppState>,
) -> Result<Session, WebError> {
    Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| WebError::InternalError(msg.to_string()))
}

/// The caller, if logged in.
pub struct Viewer(pub Option<User>);

impl FromRequestParts<Arc<AppState>> for Viewer {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state).await?;

        let Some(user_id) = session.get::<UserId>(USER_KEY).await? else {
            return Ok(Self(None));
        };

        let user = state.auth().get_user(user_id).await?;
        match &user {
            Some(user) => {
                tracing::Span::current().record("user_id", user.id);
            }
            None => {
                // Account deleted while the session was alive.
                session.remove::<UserId>(USER_KEY).await?;
            }
        }

        Ok(Self(user))
    }
}

/// A logged-in caller. Anonymous requests are redirected to the login page
/// with `next` pointing back at the requested path.
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Viewer(user) = Viewer::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        user.map(Self).ok_or_else(|| {
            Redirect::to(&paths::login_with_next(&requested_path(&parts.uri))).into_response()
        })
    }
}

/// Path plus query string, used as the `next` target after login.
#[must_use]
pub fn requested_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string)
}
