mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_CODEC, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{
    SessionCodec, create_session, get_session_from_headers, prepare_logout_response,
    read_session_cookie, refresh_session,
};
pub use types::SessionClaims;
