use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::get,
};
use binaa::{Project, ProjectDetails};
use serde::Deserialize;

use super::error::{ApiError, IntoResponseError};
use super::locale::ApiLocale;

pub(crate) fn router() -> Router<()> {
    Router::new()
        .route("/", get(list_projects))
        .route("/{id}", get(get_project))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectQuery {
    pub(crate) name: Option<String>,
    pub(crate) limit: Option<i64>,
}

async fn list_projects(
    ApiLocale(locale): ApiLocale,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    binaa::list_projects(query.name.as_deref(), query.limit)
        .await
        .map(Json)
        .into_response_error(locale)
}

async fn get_project(
    ApiLocale(locale): ApiLocale,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetails>, ApiError> {
    binaa::get_project(&id)
        .await
        .map(Json)
        .into_response_error(locale)
}
