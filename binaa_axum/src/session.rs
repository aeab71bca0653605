use axum::{
    Json, RequestPartsExt,
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{TypedHeader, headers};
use binaa::{Locale, Message, Role, SESSION_CODEC, SESSION_COOKIE_NAME, SessionClaims};
use http::{Method, StatusCode, request::Parts};

use super::error::MessageResponse;
use super::locale::ApiLocale;

pub struct AuthRedirect {
    method: Method,
    locale: Locale,
}

impl AuthRedirect {
    fn new(method: Method, locale: Locale) -> Self {
        Self { method, locale }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            let target = format!("/{}/sign-in", self.locale);
            tracing::debug!("Redirecting to {}", target);
            Redirect::temporary(&target).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse::new(Message::Unauthorized, self.locale)),
            )
                .into_response()
        }
    }
}

/// Signed-in staff member, available as an Axum extractor
///
/// Taken from the request extensions when the route guard already verified the session,
/// otherwise from the session cookie. Extraction fails for missing, tampered or expired
/// sessions: GET requests are redirected to the sign-in page, others get a 401.
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use binaa_axum::AuthUser;
///
/// async fn dashboard(user: AuthUser) -> String {
///     format!("Hello, {}!", user.full_name)
/// }
///
/// let app: Router = Router::new().route("/dashboard", get(dashboard));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    /// Issue time of the session, in seconds since the epoch
    pub iat: i64,
    /// Expiry of the session, in seconds since the epoch
    pub exp: i64,
}

impl AuthUser {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        AuthUser {
            id: claims.id,
            full_name: claims.full_name,
            email: claims.email,
            role: claims.role,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

impl From<&AuthUser> for SessionClaims {
    fn from(auth_user: &AuthUser) -> Self {
        SessionClaims {
            id: auth_user.id.clone(),
            full_name: auth_user.full_name.clone(),
            role: auth_user.role,
            email: auth_user.email.clone(),
            iat: auth_user.iat,
            exp: auth_user.exp,
        }
    }
}

impl<B> FromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &B) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let method = parts.method.clone();
        let ApiLocale(locale) = ApiLocale::from_parts(parts);

        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("No cookies on request");
            AuthRedirect::new(method.clone(), locale)
        })?;

        let token = cookies.get(SESSION_COOKIE_NAME.as_str()).ok_or_else(|| {
            tracing::debug!("No session cookie: {:?}", SESSION_COOKIE_NAME.as_str());
            AuthRedirect::new(method.clone(), locale)
        })?;

        let claims = SESSION_CODEC.decode(token).ok_or_else(|| {
            tracing::debug!("Session cookie is invalid or expired");
            AuthRedirect::new(method.clone(), locale)
        })?;

        Ok(AuthUser::from(claims))
    }
}

impl<B> OptionalFromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &B,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthUser as FromRequestParts<B>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
