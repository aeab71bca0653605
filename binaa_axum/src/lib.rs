mod admin;
mod auth;
mod config;
mod contact;
mod error;
mod locale;
mod middleware;
mod pages;
mod projects;
mod router;
mod session;

#[cfg(test)]
mod test_utils;

pub use config::PUBLIC_DIR;
pub use error::{FieldMessage, MessageResponse};
pub use locale::ApiLocale;
pub use middleware::route_guard;
pub use router::{binaa_router, binaa_router_no_trace};
pub use session::{AuthRedirect, AuthUser};

// Re-export the locale type and initialization function from the binaa crate
pub use binaa::{Locale, init};
