mod errors;
mod storage;
mod types;

pub use errors::UserError;
pub use storage::UserStore;
pub use types::{Role, User, UserSearchField};

pub(crate) async fn init() -> Result<(), UserError> {
    UserStore::init().await
}
