use sqlx::{Pool, Postgres, Row, Sqlite};

/// Compares the actual columns of a table against the expected `(name, type)` list.
///
/// Missing columns and type mismatches are errors; extra columns only log a warning.
fn compare_columns<E>(
    table_name: &str,
    actual_columns: &[(String, String)],
    expected_columns: &[(&str, &str)],
    error_mapper: &impl Fn(String) -> E,
) -> Result<(), E> {
    if actual_columns.is_empty() {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    for (expected_name, expected_type) in expected_columns {
        match actual_columns.iter().find(|(name, _)| name == expected_name) {
            Some((_, actual_type)) if actual_type.eq_ignore_ascii_case(expected_type) => {}
            Some((_, actual_type)) => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Column '{expected_name}' has type '{actual_type}' but expected '{expected_type}'"
                )));
            }
            None => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Missing column '{expected_name}'"
                )));
            }
        }
    }

    for (actual_name, _) in actual_columns {
        if !expected_columns.iter().any(|(name, _)| name == actual_name) {
            tracing::warn!("Extra column '{}' found in table '{}'", actual_name, table_name);
        }
    }

    Ok(())
}

pub(crate) async fn validate_postgres_table_schema<E>(
    pool: &Pool<Postgres>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let rows = sqlx::query(
        "SELECT column_name, data_type FROM information_schema.columns
         WHERE table_name = $1 ORDER BY column_name",
    )
    .bind(table_name)
    .fetch_all(pool)
    .await
    .map_err(|e| error_mapper(e.to_string()))?;

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get("column_name"), row.get("data_type")))
        .collect();

    compare_columns(table_name, &actual_columns, expected_columns, &error_mapper)
}

pub(crate) async fn validate_sqlite_table_schema<E>(
    pool: &Pool<Sqlite>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table_name})"))
        .fetch_all(pool)
        .await
        .map_err(|e| error_mapper(e.to_string()))?;

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get("name"), row.get("type")))
        .collect();

    compare_columns(table_name, &actual_columns, expected_columns, &error_mapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn test_compare_columns_ok_with_extra() {
        let actual = cols(&[("id", "TEXT"), ("email", "TEXT"), ("legacy", "TEXT")]);
        let result = compare_columns("t", &actual, &[("id", "TEXT"), ("email", "text")], &|e: String| e);
        assert!(result.is_ok());
    }

    #[test]
    fn test_compare_columns_missing_table() {
        let result = compare_columns("t", &[], &[("id", "TEXT")], &|e: String| e);
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_compare_columns_missing_column() {
        let actual = cols(&[("id", "TEXT")]);
        let result = compare_columns("t", &actual, &[("id", "TEXT"), ("email", "TEXT")], &|e: String| e);
        assert!(result.unwrap_err().contains("Missing column 'email'"));
    }

    #[test]
    fn test_compare_columns_type_mismatch() {
        let actual = cols(&[("id", "INTEGER")]);
        let result = compare_columns("t", &actual, &[("id", "TEXT")], &|e: String| e);
        assert!(result.unwrap_err().contains("has type 'INTEGER'"));
    }
}
