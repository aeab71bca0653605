use axum::{
    Form, Json, Router,
    extract::Query,
    routing::{get, post},
};
use binaa::{CreateUserForm, DeleteForm, Message, SessionClaims, UpdateUserForm, User};
use serde::Deserialize;

use crate::error::{ApiError, IntoResponseError, MessageResponse};
use crate::locale::ApiLocale;
use crate::session::AuthUser;

pub(super) fn router() -> Router<()> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/update", post(update_user))
        .route("/delete", post(delete_user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    full_name: Option<String>,
}

async fn list_users(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    binaa::list_users(&SessionClaims::from(&auth_user), query.full_name.as_deref())
        .await
        .map(Json)
        .into_response_error(locale)
}

async fn create_user(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Form(form): Form<CreateUserForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (user, message) = binaa::create_user(&SessionClaims::from(&auth_user), form)
        .await
        .into_response_error_or(locale, Message::UserCreateFailed)?;

    Ok(Json(MessageResponse::new(message, locale).with_id(user.id)))
}

async fn update_user(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Form(form): Form<UpdateUserForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (_, message) = binaa::update_user(&SessionClaims::from(&auth_user), form)
        .await
        .into_response_error_or(locale, Message::UserUpdateFailed)?;

    Ok(Json(MessageResponse::new(message, locale)))
}

async fn delete_user(
    auth_user: AuthUser,
    ApiLocale(locale): ApiLocale,
    Form(form): Form<DeleteForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = binaa::delete_user(&SessionClaims::from(&auth_user), form)
        .await
        .into_response_error_or(locale, Message::UserDeleteFailed)?;

    Ok(Json(MessageResponse::new(message, locale)))
}
