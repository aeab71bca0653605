use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use binaa::{
    GuardDecision, GuardRequest, SESSION_CODEC, SessionClaims, evaluate,
    read_session_cookie, refresh_session,
};
use http::header::{ACCEPT_LANGUAGE, SET_COOKIE};

use super::session::AuthUser;

// Slides the session forward on a response that already went through the guard
fn refresh_on_response(mut response: Response, claims: &SessionClaims) -> Response {
    match refresh_session(&SESSION_CODEC, claims) {
        Ok(headers) => {
            for value in headers.get_all(SET_COOKIE) {
                response.headers_mut().append(SET_COOKIE, value.clone());
            }
        }
        Err(e) => tracing::error!(error = %e, user_id = %claims.id, "Failed to refresh session"),
    }
    response
}

/// Route guard for every page request.
///
/// Assets and API calls pass untouched. Paths without a locale are redirected to their
/// negotiated locale, dashboard paths require a session (and `/dashboard/users` a super
/// admin), and pages rendered for a signed-in user carry a refreshed session cookie.
pub async fn route_guard(mut req: Request, next: Next) -> Response {
    let decision = {
        let guard_request = GuardRequest {
            path: req.uri().path(),
            query: req.uri().query(),
            accept_language: req
                .headers()
                .get(ACCEPT_LANGUAGE)
                .and_then(|h| h.to_str().ok()),
            session_token: read_session_cookie(req.headers()),
        };
        evaluate(&SESSION_CODEC, &guard_request)
    };

    match decision {
        GuardDecision::PassThrough => next.run(req).await,
        GuardDecision::Redirect(target) => Redirect::temporary(&target).into_response(),
        GuardDecision::Continue { session, .. } => {
            let Some(claims) = session else {
                return next.run(req).await;
            };

            req.extensions_mut().insert(AuthUser::from(claims.clone()));
            let response = next.run(req).await;
            refresh_on_response(response, &claims)
        }
    }
}
