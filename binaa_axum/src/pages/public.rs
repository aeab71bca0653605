use askama::Template;
use axum::{
    extract::{Path, Query},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::views::{ProjectCard, ProjectView};
use super::{PageError, Ui, page_error, page_locale, render};
use crate::config::HOME_PROJECT_COUNT;
use crate::projects::ProjectQuery;
use crate::session::AuthUser;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    ui: Ui,
    projects: Vec<ProjectCard>,
}

pub(super) async fn home(Path(lang): Path<String>) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let projects = binaa::list_projects(None, Some(HOME_PROJECT_COUNT))
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&HomeTemplate {
        ui: Ui::new(locale, "/"),
        projects: projects.iter().map(|p| ProjectCard::new(p, locale)).collect(),
    })
}

#[derive(Template)]
#[template(path = "projects.html")]
struct ProjectsTemplate {
    ui: Ui,
    name: String,
    projects: Vec<ProjectCard>,
}

pub(super) async fn projects(
    Path(lang): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let projects = binaa::list_projects(query.name.as_deref(), query.limit)
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&ProjectsTemplate {
        ui: Ui::new(locale, "/projects"),
        name: query.name.unwrap_or_default(),
        projects: projects.iter().map(|p| ProjectCard::new(p, locale)).collect(),
    })
}

#[derive(Template)]
#[template(path = "project.html")]
struct ProjectTemplate {
    ui: Ui,
    project: ProjectView,
}

pub(super) async fn project(
    Path((lang, id)): Path<(String, String)>,
) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let details = binaa::get_project(&id)
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&ProjectTemplate {
        ui: Ui::new(locale, format!("/projects/{id}")),
        project: ProjectView::new(&details, locale),
    })
}

/// Pages whose content lives entirely in the template
#[derive(Template)]
#[template(path = "services.html")]
struct ServicesTemplate {
    ui: Ui,
}

#[derive(Template)]
#[template(path = "careers.html")]
struct CareersTemplate {
    ui: Ui,
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    ui: Ui,
}

#[derive(Template)]
#[template(path = "terms.html")]
struct TermsTemplate {
    ui: Ui,
}

#[derive(Template)]
#[template(path = "privacy.html")]
struct PrivacyTemplate {
    ui: Ui,
}

pub(super) async fn services(Path(lang): Path<String>) -> Result<Html<String>, PageError> {
    render(&ServicesTemplate {
        ui: Ui::new(page_locale(&lang)?, "/services"),
    })
}

pub(super) async fn careers(Path(lang): Path<String>) -> Result<Html<String>, PageError> {
    render(&CareersTemplate {
        ui: Ui::new(page_locale(&lang)?, "/careers"),
    })
}

pub(super) async fn contact(Path(lang): Path<String>) -> Result<Html<String>, PageError> {
    render(&ContactTemplate {
        ui: Ui::new(page_locale(&lang)?, "/contact"),
    })
}

pub(super) async fn terms(Path(lang): Path<String>) -> Result<Html<String>, PageError> {
    render(&TermsTemplate {
        ui: Ui::new(page_locale(&lang)?, "/terms"),
    })
}

pub(super) async fn privacy(Path(lang): Path<String>) -> Result<Html<String>, PageError> {
    render(&PrivacyTemplate {
        ui: Ui::new(page_locale(&lang)?, "/privacy"),
    })
}

#[derive(Template)]
#[template(path = "sign_in.html")]
struct SignInTemplate {
    ui: Ui,
    next: String,
}

#[derive(Deserialize)]
pub(super) struct SignInQuery {
    redirect: Option<String>,
}

/// Only same-site absolute paths are followed after sign-in.
///
/// Browsers drop tabs and newlines inside URLs (`/\t/host` becomes `//host`), so any
/// whitespace or control character is refused.
fn safe_redirect(target: Option<&str>) -> Option<&str> {
    target.filter(|t| {
        let mut chars = t.chars();
        chars.next() == Some('/')
            && !matches!(chars.next(), Some('/' | '\\'))
            && !t.contains('\\')
            && !t.chars().any(|c| c.is_control() || c.is_whitespace())
    })
}

pub(super) async fn sign_in(
    Path(lang): Path<String>,
    Query(query): Query<SignInQuery>,
    user: Option<AuthUser>,
) -> Result<Response, PageError> {
    let ui = Ui::new(page_locale(&lang)?, "/sign-in");
    let next = safe_redirect(query.redirect.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| ui.href("/dashboard"));

    if user.is_some() {
        return Ok(Redirect::to(&next).into_response());
    }

    Ok(render(&SignInTemplate { ui, next })?.into_response())
}
