mod codec;
mod cookie;
mod session;

pub use codec::SessionCodec;
pub use cookie::read_session_cookie;
pub use session::{
    create_session, get_session_from_headers, prepare_logout_response, refresh_session,
};
