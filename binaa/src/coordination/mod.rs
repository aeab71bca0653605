//! Operations behind the site's forms and API.
//!
//! Each function validates its form, talks to the stores and returns the message to show.
//! Admin operations take the acting session so permission checks live next to the work.

mod auth;
mod bootstrap;
mod errors;
mod inquiry;
mod projects;
mod users;

pub use auth::{login, logout};
pub(crate) use bootstrap::ensure_bootstrap_admin;
pub use errors::CoordinationError;
pub use inquiry::{submit_contact, submit_quote};
pub use projects::{create_project, delete_project, get_project, list_projects, update_project};
pub use users::{create_user, delete_user, list_users, update_user};
