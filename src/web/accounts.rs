use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::render::{self, Chrome};
use super::session::{Viewer, start_session, take_messages};
use super::validation::safe_redirect_target;
use super::{AppState, WebError, paths};
use crate::services::AuthError;

const INVALID_LOGIN: &str = "Please enter a correct username and password.";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /accounts/login/
pub async fn login_form(
    Viewer(viewer): Viewer,
    session: Session,
    Query(query): Query<NextQuery>,
) -> Html<String> {
    let messages = take_messages(&session).await;
    let chrome = Chrome {
        user: viewer.as_ref(),
        messages: &messages,
    };
    let next = query.next.unwrap_or_default();
    Html(render::login(&chrome, &next, "", None))
}

/// POST /accounts/login/
/// Form fields: `username`, `password`, `next`
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match state.auth().login(form.username.trim(), &form.password).await {
        Ok(user) => {
            start_session(&session, &user).await?;
            tracing::Span::current().record("user_id", user.id);
            tracing::info!(username = %user.username, "User logged in");

            let target = safe_redirect_target(Some(&form.next));
            Ok(Redirect::to(&target).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Failed login attempt");
            let page = render::login(
                &Chrome::anonymous(),
                &form.next,
                &form.username,
                Some(INVALID_LOGIN),
            );
            Ok(Html(page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /accounts/logout/
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    session.flush().await?;
    Ok(Redirect::to(paths::COURSE_LIST))
}
