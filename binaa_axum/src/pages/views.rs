//! Flattened, already-localized data handed to the templates

use binaa::{Image, Locale, Milestone, Project, ProjectDetails, Role, User};
use chrono::{DateTime, Utc};

fn day(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn json_or_empty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

pub(crate) struct ImageView {
    pub src: String,
    pub alt: String,
}

impl ImageView {
    fn new(image: &Image, fallback_alt: &str) -> Self {
        Self {
            src: image.src.clone(),
            alt: image.alt.clone().unwrap_or_else(|| fallback_alt.to_string()),
        }
    }
}

pub(crate) struct ProjectCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub poster: ImageView,
}

impl ProjectCard {
    pub(crate) fn new(project: &Project, locale: Locale) -> Self {
        let title = project.title.get(locale).to_string();
        Self {
            id: project.id.clone(),
            poster: ImageView::new(&project.poster, &title),
            category: project.category.clone(),
            location: project.location.clone().unwrap_or_default(),
            title,
        }
    }
}

pub(crate) struct MilestoneView {
    pub title: String,
    pub description: String,
    pub date: String,
    pub completed: bool,
}

impl MilestoneView {
    fn new(milestone: &Milestone, locale: Locale) -> Self {
        Self {
            title: milestone
                .title
                .as_ref()
                .map(|t| t.get(locale).to_string())
                .unwrap_or_default(),
            description: milestone
                .description
                .as_ref()
                .map(|d| d.get(locale).to_string())
                .unwrap_or_default(),
            date: day(milestone.date),
            completed: milestone.completed,
        }
    }
}

pub(crate) struct ProjectView {
    pub card: ProjectCard,
    pub description: String,
    pub client: String,
    pub start_date: String,
    pub end_date: String,
    pub images: Vec<ImageView>,
    pub milestones: Vec<MilestoneView>,
}

impl ProjectView {
    pub(crate) fn new(details: &ProjectDetails, locale: Locale) -> Self {
        let project = &details.project;
        let card = ProjectCard::new(project, locale);
        Self {
            description: project
                .description
                .as_ref()
                .map(|d| d.get(locale).to_string())
                .unwrap_or_default(),
            client: project.client.clone().unwrap_or_default(),
            start_date: day(project.start_date),
            end_date: day(project.end_date),
            images: project
                .images
                .iter()
                .map(|image| ImageView::new(image, &card.title))
                .collect(),
            milestones: details
                .milestones
                .iter()
                .map(|m| MilestoneView::new(m, locale))
                .collect(),
            card,
        }
    }
}

/// Field values of the project editor. Nested fields are shown as their JSON encoding,
/// the same shape the form posts back.
#[derive(Default)]
pub(crate) struct ProjectFormView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub client: String,
    pub start_date: String,
    pub end_date: String,
    pub poster: String,
    pub images: String,
    pub milestones: String,
}

impl ProjectFormView {
    pub(crate) fn new(details: &ProjectDetails) -> Self {
        let project = &details.project;
        let milestones: Vec<serde_json::Value> = details
            .milestones
            .iter()
            .map(|m| {
                serde_json::json!({
                    "title": m.title,
                    "description": m.description,
                    "date": day(m.date),
                    "completed": m.completed.to_string(),
                })
            })
            .collect();

        Self {
            id: project.id.clone(),
            title: json_or_empty(&project.title),
            description: project
                .description
                .as_ref()
                .map(json_or_empty)
                .unwrap_or_default(),
            category: project.category.clone(),
            location: project.location.clone().unwrap_or_default(),
            client: project.client.clone().unwrap_or_default(),
            start_date: day(project.start_date),
            end_date: day(project.end_date),
            poster: json_or_empty(&project.poster),
            images: json_or_empty(&project.images),
            milestones: json_or_empty(&milestones),
        }
    }
}

pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: String,
    pub is_super_admin: bool,
    pub verified: bool,
    pub created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            role: user.role.to_string(),
            is_super_admin: user.role == Role::SuperAdmin,
            verified: user.verified,
            created_at: day(Some(user.created_at)),
        }
    }
}
