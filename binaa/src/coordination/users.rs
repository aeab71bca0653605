use crate::forms::{CreateUserForm, DeleteForm, NewUserInput, UpdateUserForm};
use crate::i18n::Message;
use crate::password::hash_password;
use crate::session::SessionClaims;
use crate::storage::{get_or_fetch, invalidate_tag};
use crate::userdb::{User, UserStore};

use super::errors::CoordinationError;

const USERS_TAG: &str = "users";
const USERS_CACHE_TTL: usize = 30 * 24 * 60 * 60;

fn require_super_admin(actor: &SessionClaims) -> Result<(), CoordinationError> {
    if !actor.is_super_admin() {
        tracing::debug!(user_id = %actor.id, "User is not allowed to manage accounts");
        return Err(CoordinationError::Forbidden.log());
    }
    Ok(())
}

/// Accounts whose full name contains `full_name`, newest first
pub async fn list_users(
    actor: &SessionClaims,
    full_name: Option<&str>,
) -> Result<Vec<User>, CoordinationError> {
    require_super_admin(actor)?;

    let filter = full_name.unwrap_or_default();
    get_or_fetch(USERS_TAG, &format!("list:{filter}"), USERS_CACHE_TTL, move || async move {
        UserStore::list_users(Some(filter))
            .await
            .map_err(CoordinationError::from)
    })
    .await
}

#[tracing::instrument(skip(actor, form), fields(actor_id = %actor.id))]
pub async fn create_user(
    actor: &SessionClaims,
    form: CreateUserForm,
) -> Result<(User, Message), CoordinationError> {
    require_super_admin(actor)?;
    let input = form.validate()?;

    let user = insert_account(input).await?;
    Ok((user, Message::UserCreated))
}

/// Hashes the password, stores the account and drops cached listings
pub(super) async fn insert_account(input: NewUserInput) -> Result<User, CoordinationError> {
    let mut user = User::new(
        input.profile.email,
        input.profile.full_name,
        input.profile.phone_number,
        hash_password(&input.password)?,
    );
    user.role = input.profile.role;
    user.verified = input.profile.verified;

    let user = UserStore::create_user(user).await?;
    invalidate_tag(USERS_TAG).await;
    Ok(user)
}

#[tracing::instrument(skip(actor, form), fields(actor_id = %actor.id))]
pub async fn update_user(
    actor: &SessionClaims,
    form: UpdateUserForm,
) -> Result<(User, Message), CoordinationError> {
    require_super_admin(actor)?;
    let changes = form.validate()?;

    if changes.password_mismatch() {
        return Err(CoordinationError::PasswordMismatch.log());
    }

    let mut user = UserStore::get_user(&changes.id)
        .await?
        .ok_or_else(|| CoordinationError::NotFound.log())?;

    user.email = changes.profile.email;
    user.full_name = changes.profile.full_name;
    user.phone_number = changes.profile.phone_number;
    user.role = changes.profile.role;
    user.verified = changes.profile.verified;
    if let Some(password) = &changes.password {
        user.password_hash = hash_password(password)?;
    }

    let user = UserStore::update_user(user).await?;
    invalidate_tag(USERS_TAG).await;

    tracing::info!(
        user_id = %user.id,
        password_changed = changes.password.is_some(),
        "Account updated"
    );
    Ok((user, Message::UserUpdated))
}

#[tracing::instrument(skip(actor, form), fields(actor_id = %actor.id))]
pub async fn delete_user(
    actor: &SessionClaims,
    form: DeleteForm,
) -> Result<Message, CoordinationError> {
    require_super_admin(actor)?;
    let id = form.validate()?;

    if id == actor.id {
        tracing::warn!("Super admin attempted to delete their own account");
        return Err(CoordinationError::Forbidden);
    }

    UserStore::delete_user(&id).await?;
    invalidate_tag(USERS_TAG).await;

    Ok(Message::UserDeleted)
}
