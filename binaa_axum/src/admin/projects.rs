use axum::{Form, Json, Router, routing::post};
use binaa::{DeleteForm, Message, ProjectForm, SessionClaims};

use crate::error::{ApiError, IntoResponseError, MessageResponse};
use crate::locale::ApiLocale;
use crate::session::AuthUser;

pub(super) fn router() -> Router<()> {
    Router::new()
        .route("/", post(create_project))
        .route("/update", post(update_project))
        .route("/delete", post(delete_project))
}

async fn create_project(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Form(form): Form<ProjectForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (project, message) = binaa::create_project(&SessionClaims::from(&auth_user), form)
        .await
        .into_response_error_or(locale, Message::ProjectCreateFailed)?;

    Ok(Json(MessageResponse::new(message, locale).with_id(project.id)))
}

async fn update_project(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Form(form): Form<ProjectForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = binaa::update_project(&SessionClaims::from(&auth_user), form)
        .await
        .into_response_error_or(locale, Message::ProjectUpdateFailed)?;

    Ok(Json(MessageResponse::new(message, locale)))
}

async fn delete_project(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Form(form): Form<DeleteForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = binaa::delete_project(&SessionClaims::from(&auth_user), form)
        .await
        .into_response_error_or(locale, Message::ProjectDeleteFailed)?;

    Ok(Json(MessageResponse::new(message, locale)))
}
