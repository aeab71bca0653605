use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use binaa::{DEFAULT_LOCALE, Locale};
use http::{header::ACCEPT_LANGUAGE, request::Parts};
use serde::Deserialize;

/// Locale for API messages: `?lang=` when it names a supported locale, otherwise
/// negotiated from `Accept-Language`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiLocale(pub Locale);

#[derive(Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl ApiLocale {
    pub(crate) fn from_parts(parts: &Parts) -> Self {
        let requested = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang)
            .and_then(|code| Locale::from_code(&code));

        if let Some(locale) = requested {
            return Self(locale);
        }

        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|h| h.to_str().ok());
        Self(Locale::negotiate(accept_language, *DEFAULT_LOCALE))
    }
}

impl<S> FromRequestParts<S> for ApiLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    fn request_parts(uri: &str, accept_language: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = accept_language {
            builder = builder.header(ACCEPT_LANGUAGE, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_query_parameter_wins() {
        let parts = request_parts("/api/auth/login?lang=en", Some("ar"));
        assert_eq!(ApiLocale::from_parts(&parts), ApiLocale(Locale::En));
    }

    #[test]
    fn test_falls_back_to_accept_language() {
        let parts = request_parts("/api/auth/login?lang=fr", Some("en-US,en;q=0.9"));
        assert_eq!(ApiLocale::from_parts(&parts), ApiLocale(Locale::En));

        let parts = request_parts("/api/contact", Some("ar-SA"));
        assert_eq!(ApiLocale::from_parts(&parts), ApiLocale(Locale::Ar));
    }

    #[test]
    fn test_defaults_without_hints() {
        let parts = request_parts("/api/contact", None);
        assert_eq!(ApiLocale::from_parts(&parts), ApiLocale(*DEFAULT_LOCALE));
    }
}
