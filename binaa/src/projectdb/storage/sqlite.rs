use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::projectdb::{
    errors::ProjectError,
    types::{Milestone, NewMilestone, Project, ProjectUpdate},
};
use crate::storage::validate_sqlite_table_schema;

use super::config::{DB_TABLE_MILESTONES, DB_TABLE_PROJECTS};
use super::rows::{MilestoneRow, ProjectRow, columns, encode_images};

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), ProjectError> {
    let projects = DB_TABLE_PROJECTS.as_str();
    let milestones = DB_TABLE_MILESTONES.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {projects} (
            id TEXT PRIMARY KEY NOT NULL,
            title_ar TEXT NOT NULL,
            title_en TEXT,
            description_ar TEXT,
            description_en TEXT,
            category TEXT NOT NULL,
            location TEXT,
            client TEXT,
            start_date TIMESTAMP,
            end_date TIMESTAMP,
            poster TEXT NOT NULL,
            images TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {milestones} (
            id TEXT PRIMARY KEY NOT NULL,
            project_id TEXT NOT NULL REFERENCES {projects}(id),
            position INTEGER NOT NULL,
            title_ar TEXT,
            title_en TEXT,
            description_ar TEXT,
            description_en TEXT,
            date TIMESTAMP,
            completed BOOLEAN NOT NULL DEFAULT false
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{milestones}_project_id ON {milestones}(project_id)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_project_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), ProjectError> {
    let project_columns = [
        ("id", "TEXT"),
        ("title_ar", "TEXT"),
        ("title_en", "TEXT"),
        ("description_ar", "TEXT"),
        ("description_en", "TEXT"),
        ("category", "TEXT"),
        ("location", "TEXT"),
        ("client", "TEXT"),
        ("start_date", "TIMESTAMP"),
        ("end_date", "TIMESTAMP"),
        ("poster", "TEXT"),
        ("images", "TEXT"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];
    validate_sqlite_table_schema(
        pool,
        DB_TABLE_PROJECTS.as_str(),
        &project_columns,
        ProjectError::Storage,
    )
    .await?;

    let milestone_columns = [
        ("id", "TEXT"),
        ("project_id", "TEXT"),
        ("position", "INTEGER"),
        ("title_ar", "TEXT"),
        ("title_en", "TEXT"),
        ("description_ar", "TEXT"),
        ("description_en", "TEXT"),
        ("date", "TIMESTAMP"),
        ("completed", "BOOLEAN"),
    ];
    validate_sqlite_table_schema(
        pool,
        DB_TABLE_MILESTONES.as_str(),
        &milestone_columns,
        ProjectError::Storage,
    )
    .await
}

async fn fetch_project_row(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Project>, ProjectError> {
    let table_name = DB_TABLE_PROJECTS.as_str();

    sqlx::query_as::<_, ProjectRow>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .map(Project::try_from)
        .transpose()
}

async fn insert_milestones(
    conn: &mut SqliteConnection,
    project_id: &str,
    milestones: &[NewMilestone],
) -> Result<(), ProjectError> {
    let table_name = DB_TABLE_MILESTONES.as_str();

    for (position, milestone) in milestones.iter().enumerate() {
        let (title_ar, title_en) = columns(&milestone.title);
        let (description_ar, description_en) = columns(&milestone.description);

        sqlx::query(&format!(
            r#"
            INSERT INTO {table_name}
                (id, project_id, position, title_ar, title_en, description_ar, description_en, date, completed)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        ))
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(project_id)
        .bind(position as i64)
        .bind(title_ar)
        .bind(title_en)
        .bind(description_ar)
        .bind(description_en)
        .bind(milestone.date)
        .bind(milestone.completed)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn delete_milestones(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<u64, ProjectError> {
    let table_name = DB_TABLE_MILESTONES.as_str();

    let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE project_id = ?"))
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

pub(super) async fn insert_project_sqlite(
    pool: &Pool<Sqlite>,
    project: &Project,
    milestones: &[NewMilestone],
) -> Result<(), ProjectError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROJECTS.as_str();
    let (title_ar, title_en) = (project.title.ar.as_str(), project.title.en.as_deref());
    let (description_ar, description_en) = columns(&project.description);
    let encoded = encode_images(project)?;

    let mut tx = pool.begin().await?;

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
            (id, title_ar, title_en, description_ar, description_en, category, location, client,
             start_date, end_date, poster, images, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&project.id)
    .bind(title_ar)
    .bind(title_en)
    .bind(description_ar)
    .bind(description_en)
    .bind(&project.category)
    .bind(&project.location)
    .bind(&project.client)
    .bind(project.start_date)
    .bind(project.end_date)
    .bind(&encoded.poster)
    .bind(&encoded.images)
    .bind(project.created_at)
    .bind(project.updated_at)
    .execute(&mut *tx)
    .await?;

    insert_milestones(&mut tx, &project.id, milestones).await?;

    tx.commit().await?;
    Ok(())
}

pub(super) async fn update_project_sqlite(
    pool: &Pool<Sqlite>,
    update: ProjectUpdate,
) -> Result<(), ProjectError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROJECTS.as_str();
    let mut tx = pool.begin().await?;

    let Some(mut project) = fetch_project_row(&mut tx, &update.id).await? else {
        return Err(ProjectError::NotFound);
    };

    let replacement = update.apply(&mut project);

    let (description_ar, description_en) = columns(&project.description);
    let encoded = encode_images(&project)?;

    sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET
            title_ar = ?,
            title_en = ?,
            description_ar = ?,
            description_en = ?,
            category = ?,
            location = ?,
            client = ?,
            start_date = ?,
            end_date = ?,
            poster = ?,
            images = ?,
            updated_at = ?
        WHERE id = ?
        "#
    ))
    .bind(&project.title.ar)
    .bind(&project.title.en)
    .bind(description_ar)
    .bind(description_en)
    .bind(&project.category)
    .bind(&project.location)
    .bind(&project.client)
    .bind(project.start_date)
    .bind(project.end_date)
    .bind(&encoded.poster)
    .bind(&encoded.images)
    .bind(project.updated_at)
    .bind(&project.id)
    .execute(&mut *tx)
    .await?;

    if let Some(milestones) = replacement {
        let removed = delete_milestones(&mut tx, &project.id).await?;
        insert_milestones(&mut tx, &project.id, &milestones).await?;
        tracing::debug!(removed, inserted = milestones.len(), "Replaced milestones");
    }

    tx.commit().await?;
    Ok(())
}

pub(super) async fn delete_project_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<(), ProjectError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROJECTS.as_str();
    let mut tx = pool.begin().await?;

    delete_milestones(&mut tx, id).await?;

    let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ProjectError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}

pub(super) async fn get_project_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<Option<Project>, ProjectError> {
    create_tables_sqlite(pool).await?;

    let mut conn = pool.acquire().await?;
    fetch_project_row(&mut conn, id).await
}

pub(super) async fn get_milestones_sqlite(
    pool: &Pool<Sqlite>,
    project_id: &str,
) -> Result<Vec<Milestone>, ProjectError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_MILESTONES.as_str();

    let rows = sqlx::query_as::<_, MilestoneRow>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE project_id = ?
        ORDER BY date IS NULL, date DESC, position ASC
        "#
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Milestone::from).collect())
}

pub(super) async fn list_projects_sqlite(
    pool: &Pool<Sqlite>,
    name: &str,
    limit: Option<i64>,
) -> Result<Vec<Project>, ProjectError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROJECTS.as_str();

    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE instr(title_ar, ?) > 0 OR instr(COALESCE(title_en, ''), ?) > 0
        ORDER BY created_at DESC
        LIMIT ?
        "#
    ))
    .bind(name)
    .bind(name)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Project::try_from).collect()
}
