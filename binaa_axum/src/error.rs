use axum::Json;
use binaa::{CoordinationError, FieldError, Locale, Message};
use http::StatusCode;
use serde::Serialize;

/// Body of every API response
#[derive(Debug, Serialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
    /// Id of the created resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldMessage>,
}

/// A rejected form field with its localized explanation
#[derive(Debug, Serialize, PartialEq)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: Message, locale: Locale) -> Self {
        Self {
            message: message.text(locale).to_string(),
            id: None,
            errors: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn with_errors(mut self, errors: &[FieldError], locale: Locale) -> Self {
        self.errors = errors
            .iter()
            .map(|e| FieldMessage {
                field: e.field,
                message: e.text(locale),
            })
            .collect();
        self
    }
}

pub type ApiError = (StatusCode, Json<MessageResponse>);

pub(crate) fn status_of(err: &CoordinationError) -> StatusCode {
    match err {
        CoordinationError::Validation(_) => StatusCode::BAD_REQUEST,
        CoordinationError::NotFound => StatusCode::NOT_FOUND,
        CoordinationError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        CoordinationError::Unauthorized => StatusCode::UNAUTHORIZED,
        CoordinationError::Forbidden => StatusCode::FORBIDDEN,
        CoordinationError::Conflict(_) => StatusCode::CONFLICT,
        CoordinationError::PasswordMismatch => StatusCode::BAD_REQUEST,
        CoordinationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the API error for `err`, showing `message` to the user
pub(crate) fn api_error(err: &CoordinationError, message: Message, locale: Locale) -> ApiError {
    let mut body = MessageResponse::new(message, locale);
    if let CoordinationError::Validation(errors) = err {
        body = body.with_errors(errors, locale);
    }
    (status_of(err), Json(body))
}

/// Helper trait for converting coordination results to localized API errors
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self, locale: Locale) -> Result<T, ApiError>;

    /// Like `into_response_error`, but storage failures report `failed` instead of the
    /// generic message
    fn into_response_error_or(self, locale: Locale, failed: Message) -> Result<T, ApiError>;
}

impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self, locale: Locale) -> Result<T, ApiError> {
        self.map_err(|e| api_error(&e, e.message(), locale))
    }

    fn into_response_error_or(self, locale: Locale, failed: Message) -> Result<T, ApiError> {
        self.map_err(|e| {
            let message = match e {
                CoordinationError::Store(_) => failed,
                ref other => other.message(),
            };
            api_error(&e, message, locale)
        })
    }
}
