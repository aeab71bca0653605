use askama::Template;
use axum::{
    extract::{Path, Query},
    response::Html,
};
use binaa::SessionClaims;
use serde::Deserialize;

use super::views::{ProjectCard, ProjectFormView, UserRow};
use super::{PageError, Ui, page_error, page_locale, render};
use crate::projects::ProjectQuery;
use crate::session::AuthUser;

#[derive(Template)]
#[template(path = "dashboard/overview.html")]
struct OverviewTemplate {
    ui: Ui,
    full_name: String,
    is_super_admin: bool,
    project_count: usize,
}

pub(super) async fn overview(
    user: AuthUser,
    Path(lang): Path<String>,
) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let projects = binaa::list_projects(None, None)
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&OverviewTemplate {
        ui: Ui::new(locale, "/dashboard"),
        is_super_admin: user.is_super_admin(),
        full_name: user.full_name,
        project_count: projects.len(),
    })
}

#[derive(Template)]
#[template(path = "dashboard/projects.html")]
struct ProjectsTemplate {
    ui: Ui,
    name: String,
    projects: Vec<ProjectCard>,
}

pub(super) async fn projects(
    _user: AuthUser,
    Path(lang): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let projects = binaa::list_projects(query.name.as_deref(), None)
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&ProjectsTemplate {
        ui: Ui::new(locale, "/dashboard/projects"),
        name: query.name.unwrap_or_default(),
        projects: projects.iter().map(|p| ProjectCard::new(p, locale)).collect(),
    })
}

#[derive(Template)]
#[template(path = "dashboard/project_form.html")]
struct ProjectFormTemplate {
    ui: Ui,
    is_new: bool,
    form: ProjectFormView,
}

pub(super) async fn new_project(
    _user: AuthUser,
    Path(lang): Path<String>,
) -> Result<Html<String>, PageError> {
    render(&ProjectFormTemplate {
        ui: Ui::new(page_locale(&lang)?, "/dashboard/projects/new"),
        is_new: true,
        form: ProjectFormView::default(),
    })
}

pub(super) async fn edit_project(
    _user: AuthUser,
    Path((lang, id)): Path<(String, String)>,
) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let details = binaa::get_project(&id)
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&ProjectFormTemplate {
        ui: Ui::new(locale, format!("/dashboard/projects/{id}")),
        is_new: false,
        form: ProjectFormView::new(&details),
    })
}

#[derive(Template)]
#[template(path = "dashboard/users.html")]
struct UsersTemplate {
    ui: Ui,
    full_name: String,
    current_user_id: String,
    users: Vec<UserRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UsersQuery {
    full_name: Option<String>,
}

pub(super) async fn users(
    user: AuthUser,
    Path(lang): Path<String>,
    Query(query): Query<UsersQuery>,
) -> Result<Html<String>, PageError> {
    let locale = page_locale(&lang)?;
    let users = binaa::list_users(&SessionClaims::from(&user), query.full_name.as_deref())
        .await
        .map_err(|e| page_error(e, locale))?;

    render(&UsersTemplate {
        ui: Ui::new(locale, "/dashboard/users"),
        full_name: query.full_name.unwrap_or_default(),
        current_user_id: user.id,
        users: users.iter().map(UserRow::from).collect(),
    })
}
