use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text published in both languages. Arabic is the primary language; English is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub ar: String,
    pub en: Option<String>,
}

impl Localized {
    pub fn new(ar: impl Into<String>, en: Option<String>) -> Self {
        Self { ar: ar.into(), en }
    }

    /// English when available and requested, Arabic otherwise
    pub fn get(&self, locale: crate::i18n::Locale) -> &str {
        match (locale, &self.en) {
            (crate::i18n::Locale::En, Some(en)) => en,
            _ => &self.ar,
        }
    }
}

/// Reference to an already-uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub key: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: Localized,
    pub description: Option<Localized>,
    pub category: String,
    pub location: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub poster: Image,
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project together with its milestones, latest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub project_id: String,
    pub title: Option<Localized>,
    pub description: Option<Localized>,
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
}

/// Milestone as submitted, before it has an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewMilestone {
    pub title: Option<Localized>,
    pub description: Option<Localized>,
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: Localized,
    pub description: Option<Localized>,
    pub category: String,
    pub location: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub poster: Image,
    pub images: Vec<Image>,
    pub milestones: Vec<NewMilestone>,
}

impl NewProject {
    /// Assigns an id and timestamps, returning the project row and its milestones
    pub(crate) fn into_project(self) -> (Project, Vec<NewMilestone>) {
        let now = Utc::now();
        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            category: self.category,
            location: self.location,
            client: self.client,
            start_date: self.start_date,
            end_date: self.end_date,
            poster: self.poster,
            images: self.images,
            created_at: now,
            updated_at: now,
        };
        (project, self.milestones)
    }
}

/// One field of a partial update.
///
/// `Absent` leaves the stored value untouched, `Null` clears it, `Value` replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(value) => *target = Some(value),
        }
    }
}

/// Partial update of a project.
///
/// Required fields are `Option`s (`None` keeps the stored value); nullable fields are
/// [`Patch`]es. A supplied milestone list replaces the stored collection entirely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectUpdate {
    pub id: String,
    pub title: Option<Localized>,
    pub description: Patch<Localized>,
    pub category: Option<String>,
    pub location: Patch<String>,
    pub client: Patch<String>,
    pub start_date: Patch<DateTime<Utc>>,
    pub end_date: Patch<DateTime<Utc>>,
    pub poster: Option<Image>,
    pub images: Option<Vec<Image>>,
    pub milestones: Option<Vec<NewMilestone>>,
}

impl ProjectUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Applies the scalar fields to `project` and hands back the milestone replacement, if any
    pub fn apply(self, project: &mut Project) -> Option<Vec<NewMilestone>> {
        if let Some(title) = self.title {
            project.title = title;
        }
        self.description.apply(&mut project.description);
        if let Some(category) = self.category {
            project.category = category;
        }
        self.location.apply(&mut project.location);
        self.client.apply(&mut project.client);
        self.start_date.apply(&mut project.start_date);
        self.end_date.apply(&mut project.end_date);
        if let Some(poster) = self.poster {
            project.poster = poster;
        }
        if let Some(images) = self.images {
            project.images = images;
        }
        project.updated_at = Utc::now();
        self.milestones
    }
}
