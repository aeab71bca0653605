//! Flat table rows and their conversion to and from the nested project types

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::projectdb::errors::ProjectError;
use crate::projectdb::types::{Image, Localized, Milestone, Project};

#[derive(Debug, FromRow)]
pub(super) struct ProjectRow {
    pub id: String,
    pub title_ar: String,
    pub title_en: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub category: String,
    pub location: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub poster: String,
    pub images: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = ProjectError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let poster: Image = serde_json::from_str(&row.poster)?;
        let images: Vec<Image> = serde_json::from_str(&row.images)?;
        Ok(Project {
            id: row.id,
            title: Localized::new(row.title_ar, row.title_en),
            description: split_optional(row.description_ar, row.description_en),
            category: row.category,
            location: row.location,
            client: row.client,
            start_date: row.start_date,
            end_date: row.end_date,
            poster,
            images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct MilestoneRow {
    pub id: String,
    pub project_id: String,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl From<MilestoneRow> for Milestone {
    fn from(row: MilestoneRow) -> Self {
        Milestone {
            id: row.id,
            project_id: row.project_id,
            title: split_optional(row.title_ar, row.title_en),
            description: split_optional(row.description_ar, row.description_en),
            date: row.date,
            completed: row.completed,
        }
    }
}

/// A localized value is present when its Arabic column is non-null
fn split_optional(ar: Option<String>, en: Option<String>) -> Option<Localized> {
    ar.map(|ar| Localized::new(ar, en))
}

/// Column pair for an optional localized value
pub(super) fn columns(value: &Option<Localized>) -> (Option<&str>, Option<&str>) {
    match value {
        Some(v) => (Some(v.ar.as_str()), v.en.as_deref()),
        None => (None, None),
    }
}

pub(super) struct EncodedImages {
    pub poster: String,
    pub images: String,
}

pub(super) fn encode_images(project: &Project) -> Result<EncodedImages, ProjectError> {
    Ok(EncodedImages {
        poster: serde_json::to_string(&project.poster)?,
        images: serde_json::to_string(&project.images)?,
    })
}
