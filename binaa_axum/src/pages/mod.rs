//! Server-rendered pages under `/{lang}`
//!
//! The route guard runs before these handlers, so a dashboard handler only sees requests
//! that already carry a valid session.

mod dashboard;
mod public;
mod views;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::Html,
    routing::get,
};
use binaa::{CoordinationError, Locale};

use crate::error::status_of;

pub(crate) type PageError = (StatusCode, String);

pub(super) fn router() -> Router<()> {
    Router::new()
        .route("/{lang}", get(public::home))
        .route("/{lang}/", get(public::home))
        .route("/{lang}/services", get(public::services))
        .route("/{lang}/projects", get(public::projects))
        .route("/{lang}/projects/{id}", get(public::project))
        .route("/{lang}/careers", get(public::careers))
        .route("/{lang}/contact", get(public::contact))
        .route("/{lang}/terms", get(public::terms))
        .route("/{lang}/privacy", get(public::privacy))
        .route("/{lang}/sign-in", get(public::sign_in))
        .route("/{lang}/dashboard", get(dashboard::overview))
        .route("/{lang}/dashboard/projects", get(dashboard::projects))
        .route("/{lang}/dashboard/projects/new", get(dashboard::new_project))
        .route("/{lang}/dashboard/projects/{id}", get(dashboard::edit_project))
        .route("/{lang}/dashboard/users", get(dashboard::users))
}

/// Locale-aware helpers available to every template as `ui`
#[derive(Debug, Clone)]
pub(crate) struct Ui {
    locale: Locale,
    /// Current page path without the locale prefix
    path: String,
}

impl Ui {
    pub(crate) fn new(locale: Locale, path: impl Into<String>) -> Self {
        Self {
            locale,
            path: path.into(),
        }
    }

    pub(crate) fn lang(&self) -> &'static str {
        self.locale.code()
    }

    pub(crate) fn dir(&self) -> &'static str {
        self.locale.dir()
    }

    /// Picks the Arabic or English variant of a label
    pub(crate) fn t(&self, ar: &'static str, en: &'static str) -> &'static str {
        match self.locale {
            Locale::Ar => ar,
            Locale::En => en,
        }
    }

    /// `path` under the current locale, e.g. `/ar/projects`
    pub(crate) fn href(&self, path: &str) -> String {
        localized_href(self.locale, path)
    }

    /// The current page in the other language
    pub(crate) fn switch_href(&self) -> String {
        let other = match self.locale {
            Locale::Ar => Locale::En,
            Locale::En => Locale::Ar,
        };
        localized_href(other, &self.path)
    }

    pub(crate) fn switch_label(&self) -> &'static str {
        self.t("English", "العربية")
    }
}

fn localized_href(locale: Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{locale}"),
        _ => format!("/{locale}{path}"),
    }
}

/// Locale named by the `{lang}` path segment
pub(crate) fn page_locale(lang: &str) -> Result<Locale, PageError> {
    Locale::from_code(lang).ok_or((StatusCode::NOT_FOUND, "Not found".to_string()))
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, PageError> {
    template
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub(crate) fn page_error(err: CoordinationError, locale: Locale) -> PageError {
    (status_of(&err), err.message().text(locale).to_string())
}
