mod projects;
mod users;

use axum::Router;

pub(super) fn router() -> Router<()> {
    Router::new()
        .nest("/users", users::router())
        .nest("/projects", projects::router())
}
