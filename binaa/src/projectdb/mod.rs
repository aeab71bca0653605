mod errors;
mod storage;
mod types;

pub use errors::ProjectError;
pub use storage::ProjectStore;
pub use types::{
    Image, Localized, Milestone, NewMilestone, NewProject, Patch, Project, ProjectDetails,
    ProjectUpdate,
};

pub(crate) async fn init() -> Result<(), ProjectError> {
    ProjectStore::init().await
}
