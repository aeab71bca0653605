use crate::forms::{DeleteForm, ProjectForm};
use crate::i18n::Message;
use crate::projectdb::{Project, ProjectDetails, ProjectStore};
use crate::session::SessionClaims;
use crate::storage::{get_or_fetch, invalidate_tag};

use super::errors::CoordinationError;

const PROJECTS_TAG: &str = "projects";
const PROJECTS_CACHE_TTL: usize = 30 * 24 * 60 * 60;

/// Public project listing: title search in either language, newest first
pub async fn list_projects(
    name: Option<&str>,
    limit: Option<i64>,
) -> Result<Vec<Project>, CoordinationError> {
    let name = name.unwrap_or_default();
    let limit = limit.filter(|l| *l > 0);
    let key = match limit {
        Some(limit) => format!("list:{limit}:{name}"),
        None => format!("list:all:{name}"),
    };

    get_or_fetch(PROJECTS_TAG, &key, PROJECTS_CACHE_TTL, move || async move {
        ProjectStore::list_projects(Some(name), limit)
            .await
            .map_err(CoordinationError::from)
    })
    .await
}

/// A project with its milestones. Not cached.
pub async fn get_project(id: &str) -> Result<ProjectDetails, CoordinationError> {
    ProjectStore::get_project_details(id)
        .await?
        .ok_or(CoordinationError::NotFound)
}

#[tracing::instrument(skip(actor, form), fields(actor_id = %actor.id))]
pub async fn create_project(
    actor: &SessionClaims,
    form: ProjectForm,
) -> Result<(Project, Message), CoordinationError> {
    let new_project = form.into_new_project()?;

    let project = ProjectStore::create_project(new_project).await?;
    invalidate_tag(PROJECTS_TAG).await;

    Ok((project, Message::ProjectCreated))
}

#[tracing::instrument(skip(actor, form), fields(actor_id = %actor.id))]
pub async fn update_project(
    actor: &SessionClaims,
    form: ProjectForm,
) -> Result<Message, CoordinationError> {
    let update = form.into_update()?;

    ProjectStore::update_project(update).await?;
    invalidate_tag(PROJECTS_TAG).await;

    Ok(Message::ProjectUpdated)
}

#[tracing::instrument(skip(actor, form), fields(actor_id = %actor.id))]
pub async fn delete_project(
    actor: &SessionClaims,
    form: DeleteForm,
) -> Result<Message, CoordinationError> {
    let id = form.validate()?;

    ProjectStore::delete_project(&id).await?;
    invalidate_tag(PROJECTS_TAG).await;

    Ok(Message::ProjectDeleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use crate::userdb::Role;
    use serde_json::json;
    use serial_test::serial;

    fn actor() -> SessionClaims {
        SessionClaims {
            id: "editor-id".to_string(),
            full_name: "Project Editor".to_string(),
            role: Role::Admin,
            email: "editor@example.com".to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn milestones(count: usize) -> String {
        let list: Vec<_> = (1..=count)
            .map(|i| {
                json!({
                    "title": {"ar": format!("مرحلة {i}"), "en": format!("Phase {i}")},
                    "date": format!("2024-01-{i:02}"),
                    "completed": "false",
                })
            })
            .collect();
        serde_json::Value::Array(list).to_string()
    }

    fn create_form(title: &str, milestone_count: usize) -> ProjectForm {
        ProjectForm {
            title: Some(json!({"ar": title, "en": format!("{title} EN")}).to_string()),
            category: Some("infrastructure".to_string()),
            poster: Some(json!({"src": "/images/p.jpg", "key": "p"}).to_string()),
            images: Some(json!([{"src": "/images/1.jpg", "key": "1"}]).to_string()),
            milestones: Some(milestones(milestone_count)),
            ..Default::default()
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_update_replaces_milestones_only_when_supplied() {
        init_test_environment().await;
        let editor = actor();

        // Given a project with five milestones
        let (project, message) = create_project(&editor, create_form("جسر", 5))
            .await
            .unwrap();
        assert_eq!(message, Message::ProjectCreated);
        assert_eq!(get_project(&project.id).await.unwrap().milestones.len(), 5);

        // When updating scalars only, milestones are untouched
        let form = ProjectForm {
            id: Some(project.id.clone()),
            client: Some("Ministry".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update_project(&editor, form).await.unwrap(),
            Message::ProjectUpdated
        );
        let details = get_project(&project.id).await.unwrap();
        assert_eq!(details.milestones.len(), 5);
        assert_eq!(details.project.client.as_deref(), Some("Ministry"));

        // When supplying two milestones, they replace all five
        let form = ProjectForm {
            id: Some(project.id.clone()),
            milestones: Some(milestones(2)),
            ..Default::default()
        };
        update_project(&editor, form).await.unwrap();
        let details = get_project(&project.id).await.unwrap();
        assert_eq!(details.milestones.len(), 2);
        assert!(details.milestones.iter().all(|m| !m.completed));

        delete_project(
            &editor,
            DeleteForm {
                id: Some(project.id),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_list_is_invalidated_by_writes() {
        init_test_environment().await;
        let editor = actor();
        let tag = uuid::Uuid::new_v4().simple().to_string();

        // Given a cached empty result
        assert!(list_projects(Some(&tag), None).await.unwrap().is_empty());

        // When a matching project is created
        let (project, _) = create_project(&editor, create_form(&format!("مشروع {tag}"), 0))
            .await
            .unwrap();

        // Then the listing reflects it
        let listed = list_projects(Some(&tag), Some(10)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, project.id);
        assert_eq!(list_projects(Some(&tag), None).await.unwrap().len(), 1);

        // And deleting it clears the listing again
        delete_project(
            &editor,
            DeleteForm {
                id: Some(project.id.clone()),
            },
        )
        .await
        .unwrap();
        assert!(list_projects(Some(&tag), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_forms_and_missing_projects() {
        init_test_environment().await;
        let editor = actor();

        assert!(matches!(
            create_project(&editor, ProjectForm::default()).await,
            Err(CoordinationError::Validation(_))
        ));
        assert!(matches!(
            update_project(&editor, ProjectForm::default()).await,
            Err(CoordinationError::Validation(_))
        ));

        let ghost = uuid::Uuid::new_v4().to_string();
        let form = ProjectForm {
            id: Some(ghost.clone()),
            ..Default::default()
        };
        assert!(matches!(
            update_project(&editor, form).await,
            Err(CoordinationError::NotFound)
        ));
        assert!(matches!(
            get_project(&ghost).await,
            Err(CoordinationError::NotFound)
        ));
        assert!(matches!(
            delete_project(&editor, DeleteForm { id: Some(ghost) }).await,
            Err(CoordinationError::NotFound)
        ));
    }
}
