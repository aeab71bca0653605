use crate::projectdb::{
    errors::ProjectError,
    types::{NewProject, Project, ProjectDetails, ProjectUpdate},
};
use crate::storage::GENERIC_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

pub struct ProjectStore;

impl ProjectStore {
    pub(crate) async fn init() -> Result<(), ProjectError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_project_tables_sqlite(pool).await
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_project_tables_postgres(pool).await
            }
            _ => Err(ProjectError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Projects whose Arabic or English title contains `name`, newest first
    pub async fn list_projects(
        name: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Project>, ProjectError> {
        let name = name.unwrap_or_default();
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            list_projects_sqlite(pool, name, limit).await
        } else if let Some(pool) = store.as_postgres() {
            list_projects_postgres(pool, name, limit).await
        } else {
            Err(ProjectError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(fields(project_id = %id))]
    pub async fn get_project(id: &str) -> Result<Option<Project>, ProjectError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_project_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_project_postgres(pool, id).await
        } else {
            Err(ProjectError::Storage("Unsupported database type".to_string()))
        }
    }

    /// The project with its milestones ordered by date (latest first, undated last)
    #[tracing::instrument(fields(project_id = %id))]
    pub async fn get_project_details(id: &str) -> Result<Option<ProjectDetails>, ProjectError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let (project, milestones) = if let Some(pool) = store.as_sqlite() {
            let Some(project) = get_project_sqlite(pool, id).await? else {
                return Ok(None);
            };
            (project, get_milestones_sqlite(pool, id).await?)
        } else if let Some(pool) = store.as_postgres() {
            let Some(project) = get_project_postgres(pool, id).await? else {
                return Ok(None);
            };
            (project, get_milestones_postgres(pool, id).await?)
        } else {
            return Err(ProjectError::Storage("Unsupported database type".to_string()));
        };

        tracing::debug!(milestones = milestones.len(), "Project details loaded");
        Ok(Some(ProjectDetails {
            project,
            milestones,
        }))
    }

    /// Insert a project and its milestones in one transaction
    #[tracing::instrument(skip(new_project))]
    pub async fn create_project(new_project: NewProject) -> Result<Project, ProjectError> {
        let (project, milestones) = new_project.into_project();
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            insert_project_sqlite(pool, &project, &milestones).await
        } else if let Some(pool) = store.as_postgres() {
            insert_project_postgres(pool, &project, &milestones).await
        } else {
            Err(ProjectError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(()) => tracing::info!(
                project_id = %project.id,
                milestones = milestones.len(),
                "Project created"
            ),
            Err(e) => tracing::error!(error = %e, "Project creation failed"),
        }

        result.map(|_| project)
    }

    /// Apply a partial update. A supplied milestone list replaces the stored one; an
    /// omitted list leaves it untouched.
    #[tracing::instrument(skip(update), fields(project_id = %update.id))]
    pub async fn update_project(update: ProjectUpdate) -> Result<(), ProjectError> {
        let replaces_milestones = update.milestones.is_some();
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            update_project_sqlite(pool, update).await
        } else if let Some(pool) = store.as_postgres() {
            update_project_postgres(pool, update).await
        } else {
            Err(ProjectError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(()) => tracing::info!(replaces_milestones, "Project updated"),
            Err(e) => tracing::error!(error = %e, "Project update failed"),
        }

        result
    }

    /// Delete a project together with its milestones
    #[tracing::instrument(fields(project_id = %id))]
    pub async fn delete_project(id: &str) -> Result<(), ProjectError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_project_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_project_postgres(pool, id).await
        } else {
            Err(ProjectError::Storage("Unsupported database type".to_string()))
        }
    }
}
