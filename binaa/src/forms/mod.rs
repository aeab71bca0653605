mod auth;
mod errors;
mod fields;
mod inquiry;
mod projects;
mod users;

pub use auth::{Credentials, LoginForm};
pub use errors::{FieldError, FieldReason};
pub use inquiry::{ContactForm, ContactRequest, QuoteForm, QuoteRequest};
pub use projects::ProjectForm;
pub use users::{
    CreateUserForm, DeleteForm, NewUserInput, UpdateUserForm, UserChanges, UserProfile,
};
