use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

pub struct UserStore;

impl UserStore {
    /// Initialize the user database tables
    pub(crate) async fn init() -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Users whose full name contains `full_name_filter`, newest first
    pub async fn list_users(full_name_filter: Option<&str>) -> Result<Vec<User>, UserError> {
        let filter = full_name_filter.unwrap_or_default();
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            list_users_sqlite(pool, filter).await
        } else if let Some(pool) = store.as_postgres() {
            list_users_postgres(pool, filter).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by their ID
    #[tracing::instrument(fields(user_id = %id))]
    pub async fn get_user(id: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(UserSearchField::Id(id.to_string())).await
    }

    #[tracing::instrument(fields(user_field = %field))]
    pub async fn get_user_by(field: UserSearchField) -> Result<Option<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => tracing::info!(found = true, "User lookup completed"),
            Ok(None) => tracing::info!(found = false, "User lookup completed - not found"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Insert a new user. Fails with `DuplicateEmail` when the email is taken.
    #[tracing::instrument(skip(user), fields(user_id = %user.id))]
    pub async fn create_user(user: User) -> Result<User, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            insert_user_sqlite(pool, &user).await
        } else if let Some(pool) = store.as_postgres() {
            insert_user_postgres(pool, &user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(()) => tracing::info!(role = %user.role, "User created"),
            Err(e) => tracing::error!(error = %e, "User creation failed"),
        }

        result.map(|_| user)
    }

    /// Overwrite an existing user's mutable fields and bump `updated_at`
    #[tracing::instrument(skip(user), fields(user_id = %user.id))]
    pub async fn update_user(mut user: User) -> Result<User, UserError> {
        user.updated_at = chrono::Utc::now();
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            update_user_sqlite(pool, &user).await
        } else if let Some(pool) = store.as_postgres() {
            update_user_postgres(pool, &user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(()) => tracing::info!(role = %user.role, "User updated"),
            Err(e) => tracing::error!(error = %e, "User update failed"),
        }

        result.map(|_| user)
    }

    #[tracing::instrument(fields(user_id = %id))]
    pub async fn delete_user(id: &str) -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use crate::userdb::Role;
    use chrono::{Duration, Utc};
    use serial_test::serial;

    /// Helper function to create a test user with a unique email
    fn create_test_user(name: &str) -> User {
        let email = format!("{}-{}@example.com", name, uuid::Uuid::new_v4());
        User::new(
            email,
            name.to_string(),
            "0501234567".to_string(),
            "$argon2id$placeholder".to_string(),
        )
    }

    #[tokio::test]
    #[serial]
    async fn test_create_and_get_user() {
        init_test_environment().await;

        // Given a new user
        let user = create_test_user("Create Get");

        // When storing it
        let created = UserStore::create_user(user.clone()).await.unwrap();

        // Then it can be read back by id and by email
        let by_id = UserStore::get_user(&created.id).await.unwrap().unwrap();
        let by_email = UserStore::get_user_by(UserSearchField::Email(user.email.clone()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id.id, user.id);
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_id.password_hash, user.password_hash);
        assert_eq!(by_id.role, Role::Admin);

        UserStore::delete_user(&user.id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_duplicate_email_is_rejected() {
        init_test_environment().await;

        let first = create_test_user("Dup One");
        let mut second = create_test_user("Dup Two");
        second.email = first.email.clone();

        UserStore::create_user(first.clone()).await.unwrap();
        let result = UserStore::create_user(second).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == first.email));

        UserStore::delete_user(&first.id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_update_user() {
        init_test_environment().await;

        let user = UserStore::create_user(create_test_user("Before Update"))
            .await
            .unwrap();

        let mut changed = user.clone();
        changed.full_name = "After Update".to_string();
        changed.role = Role::SuperAdmin;
        changed.verified = true;
        let updated = UserStore::update_user(changed).await.unwrap();

        let stored = UserStore::get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.full_name, "After Update");
        assert_eq!(stored.role, Role::SuperAdmin);
        assert!(stored.verified);
        assert!(updated.updated_at >= user.updated_at);

        UserStore::delete_user(&user.id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_update_and_delete_missing_user() {
        init_test_environment().await;

        let ghost = create_test_user("Ghost");

        assert!(matches!(
            UserStore::update_user(ghost.clone()).await,
            Err(UserError::NotFound)
        ));
        assert!(matches!(
            UserStore::delete_user(&ghost.id).await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_users_filters_and_orders_newest_first() {
        init_test_environment().await;

        // Given three users with distinct creation times
        let tag = uuid::Uuid::new_v4().simple().to_string();
        let mut older = create_test_user(&format!("Older {tag}"));
        older.created_at = Utc::now() - Duration::hours(2);
        let mut newer = create_test_user(&format!("Newer {tag}"));
        newer.created_at = Utc::now() - Duration::hours(1);
        let other = create_test_user("Unrelated Person");

        for u in [&older, &newer, &other] {
            UserStore::create_user(u.clone()).await.unwrap();
        }

        // When filtering by the shared tag
        let listed = UserStore::list_users(Some(&tag)).await.unwrap();

        // Then only the tagged users are returned, newest first
        let ids: Vec<&str> = listed.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);

        // And no filter returns everyone
        let all = UserStore::list_users(None).await.unwrap();
        assert!(all.iter().any(|u| u.id == other.id));

        for u in [&older, &newer, &other] {
            UserStore::delete_user(&u.id).await.unwrap();
        }
    }
}
