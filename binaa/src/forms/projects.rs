//! Project forms.
//!
//! Scalars arrive as plain form fields; `title`, `description`, `poster`, `images` and
//! `milestones` arrive as JSON documents embedded in form fields.

use serde::Deserialize;

use crate::projectdb::{Image, Localized, NewMilestone, NewProject, Patch, ProjectUpdate};

use super::errors::{FieldError, FieldErrors, FieldReason};
use super::fields::{JsonField, date, from_json, json_field, normalize, optional_date, required};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub poster: Option<String>,
    pub images: Option<String>,
    pub milestones: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocalizedInput {
    ar: Option<String>,
    #[serde(default)]
    en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageInput {
    src: Option<String>,
    key: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MilestoneInput {
    #[serde(default)]
    title: Option<LocalizedInput>,
    #[serde(default)]
    description: Option<LocalizedInput>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    completed: Option<serde_json::Value>,
}

/// Project-level localized text: Arabic must be non-empty
fn localized(field: &'static str, value: serde_json::Value) -> Result<Localized, FieldError> {
    let input: LocalizedInput = from_json(field, value)?;
    let ar = input
        .ar
        .filter(|ar| !ar.is_empty())
        .ok_or_else(|| FieldError::new(field, FieldReason::Required))?;
    Ok(Localized::new(ar, normalize(input.en.as_deref())))
}

/// Milestone text: a missing Arabic value becomes empty rather than an error
fn milestone_localized(input: Option<LocalizedInput>) -> Option<Localized> {
    input.map(|i| Localized::new(i.ar.unwrap_or_default(), normalize(i.en.as_deref())))
}

fn image(field: &'static str, input: ImageInput) -> Result<Image, FieldError> {
    let src = input.src.filter(|s| !s.is_empty());
    let key = input.key.filter(|k| !k.is_empty());
    match (src, key) {
        (Some(src), Some(key)) => Ok(Image {
            src,
            key,
            alt: normalize(input.alt.as_deref()),
        }),
        _ => Err(FieldError::new(field, FieldReason::Required)),
    }
}

fn poster(value: serde_json::Value) -> Result<Image, FieldError> {
    image("poster", from_json("poster", value)?)
}

fn images(value: serde_json::Value) -> Result<Vec<Image>, FieldError> {
    let inputs: Vec<ImageInput> = from_json("images", value)?;
    inputs.into_iter().map(|i| image("images", i)).collect()
}

/// Only an explicit `false` marks a milestone as pending
fn completed(value: Option<&serde_json::Value>) -> bool {
    !matches!(value, Some(serde_json::Value::Bool(false)))
        && value.and_then(|v| v.as_str()) != Some("false")
}

fn milestones(value: serde_json::Value) -> Result<Vec<NewMilestone>, FieldError> {
    let inputs: Vec<MilestoneInput> = from_json("milestones", value)?;
    inputs
        .into_iter()
        .map(|m| {
            let when = normalize(m.date.as_deref())
                .map(|d| date("milestones", &d))
                .transpose()?;
            Ok(NewMilestone {
                title: milestone_localized(m.title),
                description: milestone_localized(m.description),
                date: when,
                completed: completed(m.completed.as_ref()),
            })
        })
        .collect()
}

/// `Patch` for a plain optional field: key missing leaves it, blank clears it
fn text_patch(value: Option<&str>) -> Patch<String> {
    match value {
        None => Patch::Absent,
        Some(v) => normalize(Some(v)).map_or(Patch::Null, Patch::Value),
    }
}

fn date_patch(
    field: &'static str,
    value: Option<&str>,
) -> Result<Patch<chrono::DateTime<chrono::Utc>>, FieldError> {
    match value {
        None => Ok(Patch::Absent),
        Some(v) => Ok(optional_date(field, Some(v))?.map_or(Patch::Null, Patch::Value)),
    }
}

impl ProjectForm {
    pub fn into_new_project(self) -> Result<NewProject, Vec<FieldError>> {
        let mut errors = FieldErrors::default();

        let title = match errors.check(json_field("title", self.title.as_deref())) {
            Some(JsonField::Value(v)) => errors.check(localized("title", v)),
            Some(_) => {
                errors.push(FieldError::new("title", FieldReason::Required));
                None
            }
            None => None,
        };
        let description = match errors.check(json_field("description", self.description.as_deref()))
        {
            Some(JsonField::Value(v)) => errors.check(localized("description", v)).map(Some),
            Some(_) => Some(None),
            None => None,
        };
        let category = errors.check(required("category", self.category.as_deref()));
        let start_date = errors.check(optional_date("startDate", self.start_date.as_deref()));
        let end_date = errors.check(optional_date("endDate", self.end_date.as_deref()));
        let poster = match errors.check(json_field("poster", self.poster.as_deref())) {
            Some(JsonField::Value(v)) => errors.check(poster(v)),
            Some(_) => {
                errors.push(FieldError::new("poster", FieldReason::Required));
                None
            }
            None => None,
        };
        let images = match errors.check(json_field("images", self.images.as_deref())) {
            Some(JsonField::Value(v)) => errors.check(images(v)),
            Some(_) => Some(Vec::new()),
            None => None,
        };
        let milestones = match errors.check(json_field("milestones", self.milestones.as_deref())) {
            Some(JsonField::Value(v)) => errors.check(milestones(v)),
            Some(_) => Some(Vec::new()),
            None => None,
        };

        match (
            title,
            description,
            category,
            start_date,
            end_date,
            poster,
            images,
            milestones,
        ) {
            (
                Some(title),
                Some(description),
                Some(category),
                Some(start_date),
                Some(end_date),
                Some(poster),
                Some(images),
                Some(milestones),
            ) if errors.is_empty() => Ok(NewProject {
                title,
                description,
                category,
                location: normalize(self.location.as_deref()),
                client: normalize(self.client.as_deref()),
                start_date,
                end_date,
                poster,
                images,
                milestones,
            }),
            _ => Err(errors.into_inner()),
        }
    }

    pub fn into_update(self) -> Result<ProjectUpdate, Vec<FieldError>> {
        let mut errors = FieldErrors::default();
        let mut update = ProjectUpdate::default();

        if let Some(id) = errors.check(required("id", self.id.as_deref())) {
            update.id = id;
        }

        if let Some(JsonField::Value(v)) = errors.check(json_field("title", self.title.as_deref())) {
            update.title = errors.check(localized("title", v));
        }

        match errors.check(json_field("description", self.description.as_deref())) {
            Some(JsonField::Value(v)) => {
                if let Some(description) = errors.check(localized("description", v)) {
                    update.description = Patch::Value(description);
                }
            }
            Some(JsonField::Null) => update.description = Patch::Null,
            Some(JsonField::Missing) | None => {}
        }

        update.category = normalize(self.category.as_deref());
        update.location = text_patch(self.location.as_deref());
        update.client = text_patch(self.client.as_deref());

        if let Some(patch) = errors.check(date_patch("startDate", self.start_date.as_deref())) {
            update.start_date = patch;
        }
        if let Some(patch) = errors.check(date_patch("endDate", self.end_date.as_deref())) {
            update.end_date = patch;
        }

        if let Some(JsonField::Value(v)) = errors.check(json_field("poster", self.poster.as_deref()))
        {
            update.poster = errors.check(poster(v));
        }

        if let Some(JsonField::Value(v)) = errors.check(json_field("images", self.images.as_deref()))
        {
            update.images = errors.check(images(v));
        }

        match errors.check(json_field("milestones", self.milestones.as_deref())) {
            Some(JsonField::Value(v)) => update.milestones = errors.check(milestones(v)),
            // An explicit null clears the collection
            Some(JsonField::Null) => update.milestones = Some(Vec::new()),
            Some(JsonField::Missing) | None => {}
        }

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors.into_inner())
        }
    }
}
