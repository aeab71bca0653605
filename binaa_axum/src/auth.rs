use axum::{
    Form, Json, Router,
    extract::rejection::FormRejection,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use binaa::{LoginForm, Message, SESSION_CODEC};

use super::error::{ApiError, MessageResponse, api_error};
use super::locale::ApiLocale;

pub(crate) fn router() -> Router<()> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Signs in with the url-encoded form. The body is only ever a localized message; the
/// session travels in the `Set-Cookie` header.
async fn login(
    ApiLocale(locale): ApiLocale,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let Form(form) = form.map_err(|e| {
        tracing::debug!(error = %e, "Rejected login body");
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new(Message::InvalidInput, locale)),
        )
    })?;
    let (headers, message) = binaa::login(&SESSION_CODEC, form)
        .await
        .map_err(|e| api_error(&e, e.login_message(), locale))?;

    Ok((headers, Json(MessageResponse::new(message, locale))))
}

async fn logout(
    ApiLocale(locale): ApiLocale,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let (headers, message) =
        binaa::logout().map_err(|e| api_error(&e, Message::LogoutFailed, locale))?;

    Ok((headers, Json(MessageResponse::new(message, locale))))
}
