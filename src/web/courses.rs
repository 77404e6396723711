use axum::{
    extract::{Path, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::render::{self, Chrome};
use super::session::{CurrentUser, Level, Viewer, push_message, requested_path, take_messages};
use super::validation::validate_slug;
use super::{AppState, WebError, paths};
use crate::domain::UserId;
use crate::services::{CourseError, EnrollOutcome, ToggleOutcome};

const ENROLLMENT_REQUIRED: &str = "You must enroll in this course to view this lesson.";

/// GET /
pub async fn course_list(
    State(state): State<Arc<AppState>>,
    Viewer(viewer): Viewer,
    session: Session,
) -> Result<Html<String>, WebError> {
    let courses = state.courses().list_courses().await?;
    let messages = take_messages(&session).await;

    let chrome = Chrome {
        user: viewer.as_ref(),
        messages: &messages,
    };
    Ok(Html(render::course_list(&chrome, &courses)))
}

/// GET /{slug}/
pub async fn course_detail(
    State(state): State<Arc<AppState>>,
    Viewer(viewer): Viewer,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    let slug = validate_slug(&slug)?;

    let viewer_id = viewer.as_ref().map(|u| UserId::new(u.id));
    let detail = state.courses().course_detail(slug, viewer_id).await?;
    let messages = take_messages(&session).await;

    let chrome = Chrome {
        user: viewer.as_ref(),
        messages: &messages,
    };
    Ok(Html(render::course_detail(&chrome, &detail)))
}

/// POST /{slug}/enroll/
pub async fn enroll(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Redirect, WebError> {
    let slug = validate_slug(&slug)?;

    let enrollment = state.courses().enroll(UserId::new(user.id), slug).await?;
    let title = &enrollment.course.title;

    match enrollment.outcome {
        EnrollOutcome::Enrolled => {
            push_message(&session, Level::Success, format!("You have enrolled in {title}")).await?;
        }
        EnrollOutcome::AlreadyEnrolled => {
            push_message(
                &session,
                Level::Info,
                format!("You are already enrolled in {title}"),
            )
            .await?;
        }
    }

    Ok(Redirect::to(&paths::course_detail(&enrollment.course.slug)))
}

/// GET /{slug}/lessons/{lesson_slug}/
pub async fn lesson_detail(
    State(state): State<Arc<AppState>>,
    Viewer(viewer): Viewer,
    session: Session,
    Path((course_slug, lesson_slug)): Path<(String, String)>,
    uri: Uri,
) -> Result<Response, WebError> {
    let course_slug = validate_slug(&course_slug)?;
    let lesson_slug = validate_slug(&lesson_slug)?;

    let Some(user) = viewer else {
        // Anonymous callers never see lesson content: previews go through
        // login, everything else is bounced to the course page.
        let (course, lesson) = state.courses().find_lesson(course_slug, lesson_slug).await?;
        if lesson.is_free_preview {
            let login = paths::login_with_next(&requested_path(&uri));
            return Ok(Redirect::to(&login).into_response());
        }
        push_message(&session, Level::Error, ENROLLMENT_REQUIRED).await?;
        return Ok(Redirect::to(&paths::course_detail(&course.slug)).into_response());
    };

    let page = match state
        .courses()
        .lesson_detail(UserId::new(user.id), course_slug, lesson_slug)
        .await
    {
        Ok(page) => page,
        Err(CourseError::AccessDenied { course_slug }) => {
            push_message(&session, Level::Error, ENROLLMENT_REQUIRED).await?;
            return Ok(Redirect::to(&paths::course_detail(&course_slug)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let messages = take_messages(&session).await;
    let chrome = Chrome {
        user: Some(&user),
        messages: &messages,
    };
    Ok(Html(render::lesson(&chrome, &page)).into_response())
}

/// POST /{slug}/lessons/{lesson_slug}/complete/
pub async fn toggle_lesson_complete(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Path((course_slug, lesson_slug)): Path<(String, String)>,
) -> Result<Redirect, WebError> {
    let course_slug = validate_slug(&course_slug)?;
    let lesson_slug = validate_slug(&lesson_slug)?;

    let result = match state
        .courses()
        .toggle_completion(UserId::new(user.id), course_slug, lesson_slug)
        .await
    {
        Ok(result) => result,
        Err(CourseError::AccessDenied { course_slug }) => {
            return Ok(Redirect::to(&paths::course_detail(&course_slug)));
        }
        Err(e) => return Err(e.into()),
    };

    let title = &result.lesson.title;
    match result.outcome {
        ToggleOutcome::Completed => {
            push_message(&session, Level::Success, format!("Lesson '{title}' completed!")).await?;
        }
        ToggleOutcome::Uncompleted => {
            push_message(
                &session,
                Level::Info,
                format!("Lesson '{title}' marked as not completed."),
            )
            .await?;
        }
    }

    Ok(Redirect::to(&paths::lesson_detail(
        &result.course.slug,
        &result.lesson.slug,
    )))
}
