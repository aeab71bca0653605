use http::HeaderMap;

use crate::forms::LoginForm;
use crate::i18n::Message;
use crate::password::verify_password;
use crate::session::{SessionCodec, create_session, prepare_logout_response};
use crate::userdb::{UserSearchField, UserStore};

use super::errors::CoordinationError;

/// Signs a user in.
///
/// On success returns the `Set-Cookie` headers carrying the new session and the message to
/// show. No cookie is produced unless the password verified.
#[tracing::instrument(skip(codec, form))]
pub async fn login(
    codec: &SessionCodec,
    form: LoginForm,
) -> Result<(HeaderMap, Message), CoordinationError> {
    let credentials = form.validate()?;

    let user = UserStore::get_user_by(UserSearchField::Email(credentials.email.clone()))
        .await?
        .ok_or_else(|| CoordinationError::NotFound.log())?;

    if !verify_password(&credentials.password, &user.password_hash) {
        tracing::warn!(user_id = %user.id, "Password verification failed");
        return Err(CoordinationError::InvalidCredentials);
    }

    let (headers, claims) = create_session(codec, &user)?;
    tracing::info!(user_id = %claims.id, role = %claims.role, "User signed in");

    Ok((headers, Message::LoginSuccess))
}

/// Ends the current session. Succeeds whether or not one exists.
pub fn logout() -> Result<(HeaderMap, Message), CoordinationError> {
    let headers = prepare_logout_response()?;
    Ok((headers, Message::LogoutSuccess))
}

impl CoordinationError {
    /// Message for a failed sign-in
    pub fn login_message(&self) -> Message {
        match self {
            Self::NotFound => Message::AccountNotFound,
            Self::Store(_) => Message::LoginFailed,
            other => other.message(),
        }
    }
}
