use crate::forms::CreateUserForm;
use crate::userdb::{User, UserStore};

use super::errors::CoordinationError;
use super::users::insert_account;

const DEFAULT_BOOTSTRAP_NAME: &str = "Site Administrator";
const DEFAULT_BOOTSTRAP_PHONE: &str = "000000000";

/// Super admin account described by `BOOTSTRAP_ADMIN_*`, when email and password are both set
fn bootstrap_form_from_env() -> Option<CreateUserForm> {
    let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?;
    let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;

    Some(CreateUserForm {
        email: Some(email),
        password: Some(password),
        full_name: Some(
            std::env::var("BOOTSTRAP_ADMIN_NAME")
                .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_NAME.to_string()),
        ),
        phone_number: Some(
            std::env::var("BOOTSTRAP_ADMIN_PHONE")
                .unwrap_or_else(|_| DEFAULT_BOOTSTRAP_PHONE.to_string()),
        ),
        role: Some("superAdmin".to_string()),
        verified: Some("true".to_string()),
    })
}

/// Creates the configured super admin when the user table is empty.
///
/// Without this an empty deployment has nobody who can sign in to the dashboard.
pub(crate) async fn ensure_bootstrap_admin() -> Result<Option<User>, CoordinationError> {
    bootstrap_admin(bootstrap_form_from_env()).await
}

async fn bootstrap_admin(form: Option<CreateUserForm>) -> Result<Option<User>, CoordinationError> {
    let Some(form) = form else {
        return Ok(None);
    };

    if !UserStore::list_users(None).await?.is_empty() {
        tracing::debug!("Users already exist, skipping bootstrap admin");
        return Ok(None);
    }

    let input = form.validate()?;
    let user = insert_account(input).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "Created bootstrap super admin");
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::verify_password;
    use crate::test_utils::init_test_environment;
    use crate::userdb::Role;
    use serial_test::serial;

    fn form(email: &str) -> CreateUserForm {
        CreateUserForm {
            email: Some(email.to_string()),
            full_name: Some(DEFAULT_BOOTSTRAP_NAME.to_string()),
            phone_number: Some(DEFAULT_BOOTSTRAP_PHONE.to_string()),
            password: Some("bootstrap-secret".to_string()),
            role: Some("superAdmin".to_string()),
            verified: Some("true".to_string()),
        }
    }

    async fn clear_users() {
        for user in UserStore::list_users(None).await.unwrap() {
            UserStore::delete_user(&user.id).await.unwrap();
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_bootstrap_without_configuration_does_nothing() {
        init_test_environment().await;
        assert!(bootstrap_admin(None).await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_bootstrap_creates_super_admin_on_empty_table() {
        init_test_environment().await;

        // Given no accounts at all
        clear_users().await;

        // When bootstrapping
        let user = bootstrap_admin(Some(form("owner@example.com")))
            .await
            .unwrap()
            .unwrap();

        // Then a verified super admin exists with a hashed password
        assert_eq!(user.role, Role::SuperAdmin);
        assert!(user.verified);
        assert!(verify_password("bootstrap-secret", &user.password_hash));

        // And a second run leaves the table alone
        assert!(
            bootstrap_admin(Some(form("second-owner@example.com")))
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(UserStore::list_users(None).await.unwrap().len(), 1);

        UserStore::delete_user(&user.id).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_bootstrap_rejects_invalid_configuration() {
        init_test_environment().await;
        clear_users().await;

        let mut bad = form("not-an-email");
        bad.password = Some("123".to_string());

        assert!(matches!(
            bootstrap_admin(Some(bad)).await,
            Err(CoordinationError::Validation(fields)) if fields.len() == 2
        ));
    }
}
