use chrono::Utc;

use crate::config::DEFAULT_LOCALE;
use crate::i18n::Locale;
use crate::session::{SessionClaims, SessionCodec};

use super::assets::is_public_asset_path;
use super::config::{ADMIN_ROUTES, SUPER_ADMIN_ROUTES};

/// The parts of an incoming request the guard looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub session_token: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    /// Assets and API calls: forward untouched
    PassThrough,
    /// Send the client elsewhere
    Redirect(String),
    /// Render the page. A present session should be refreshed on the response.
    Continue {
        locale: Locale,
        session: Option<SessionClaims>,
    },
}

/// Splits a leading locale segment off `path`.
///
/// `/en` gives `(en, "/")`, `/en/projects` gives `(en, "/projects")`, anything else has no locale.
pub fn strip_locale(path: &str) -> (Option<Locale>, &str) {
    for locale in Locale::ALL {
        let Some(rest) = path
            .strip_prefix('/')
            .and_then(|p| p.strip_prefix(locale.code()))
        else {
            continue;
        };
        if rest.is_empty() {
            return (Some(locale), "/");
        }
        if rest.starts_with('/') {
            return (Some(locale), rest);
        }
    }
    (None, path)
}

fn under(path: &str, routes: &[&str]) -> bool {
    routes.iter().any(|route| {
        path.strip_prefix(route)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn sign_in_redirect(locale: Locale, original_path: &str) -> GuardDecision {
    GuardDecision::Redirect(format!(
        "/{}/sign-in?redirect={}",
        locale,
        urlencoding::encode(original_path)
    ))
}

/// Decides what happens to a request before it reaches a page
pub fn evaluate(codec: &SessionCodec, request: &GuardRequest<'_>) -> GuardDecision {
    evaluate_at(codec, request, Utc::now().timestamp())
}

pub(crate) fn evaluate_at(codec: &SessionCodec, request: &GuardRequest<'_>, now: i64) -> GuardDecision {
    let path = request.path;

    if is_public_asset_path(path) {
        tracing::trace!(path, "Guard bypass for asset");
        return GuardDecision::PassThrough;
    }

    let (locale, rest) = strip_locale(path);

    let Some(locale) = locale else {
        let locale = Locale::negotiate(request.accept_language, *DEFAULT_LOCALE);
        // The home page lives at `/{locale}`, not `/{locale}/`
        let localized = match path {
            "/" => format!("/{locale}"),
            _ => format!("/{locale}{path}"),
        };
        let target = match request.query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{localized}?{query}"),
            None => localized,
        };
        tracing::debug!(path, %target, "Redirecting to localized path");
        return GuardDecision::Redirect(target);
    };

    // Invalid and expired tokens are indistinguishable from no token
    let session = request
        .session_token
        .and_then(|token| codec.decode_at(token, now));

    if under(rest, &SUPER_ADMIN_ROUTES) {
        match &session {
            None => {
                tracing::debug!(path, "No session for super admin route");
                return sign_in_redirect(locale, path);
            }
            Some(claims) if !claims.is_super_admin() => {
                tracing::warn!(path, user_id = %claims.id, role = %claims.role, "Super admin route denied");
                return GuardDecision::Redirect(format!("/{locale}/dashboard"));
            }
            Some(_) => {}
        }
    }

    if under(rest, &ADMIN_ROUTES) && session.is_none() {
        tracing::debug!(path, "No session for dashboard route");
        return sign_in_redirect(locale, path);
    }

    GuardDecision::Continue { locale, session }
}
