//! binaa - Core library for the Binaa construction company site
//!
//! Provides password hashing, signed session cookies, the locale-aware route guard,
//! and the user and project stores behind the public site and the admin dashboard.

mod config;
mod coordination;
mod forms;
mod guard;
mod i18n;
mod password;
mod projectdb;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{DEFAULT_LOCALE, IS_PRODUCTION};

pub use coordination::{
    CoordinationError, create_project, create_user, delete_project, delete_user, get_project,
    list_projects, list_users, login, logout, submit_contact, submit_quote, update_project,
    update_user,
};

pub use forms::{
    ContactForm, CreateUserForm, DeleteForm, FieldError, FieldReason, LoginForm, ProjectForm,
    QuoteForm, UpdateUserForm,
};

pub use guard::{GuardDecision, GuardRequest, evaluate, is_public_asset_path, strip_locale};

pub use i18n::{Locale, Message};

pub use password::{PasswordError, hash_password, verify_password};

pub use projectdb::{Image, Localized, Milestone, Project, ProjectDetails};

pub use session::{
    SESSION_CODEC, SESSION_COOKIE_NAME, SessionClaims, SessionCodec, SessionError,
    get_session_from_headers, prepare_logout_response, read_session_cookie, refresh_session,
};

pub use userdb::{Role, User};

/// Initialize the stores and, when configured, the bootstrap super admin
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await;
    userdb::init().await?;
    projectdb::init().await?;
    coordination::ensure_bootstrap_admin().await?;
    Ok(())
}
