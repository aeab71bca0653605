//! The complete site router: API, pages, static files and the route guard around them

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::LatencyUnit;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::config::PUBLIC_DIR;
use super::middleware::route_guard;

fn site_routes() -> Router {
    Router::new()
        .nest("/api/auth", super::auth::router())
        .nest("/api/projects", super::projects::router())
        .nest("/api/admin", super::admin::router())
        .nest("/api", super::contact::router())
        .merge(super::pages::router())
        .fallback_service(ServeDir::new(PUBLIC_DIR.as_str()))
        .layer(from_fn(route_guard))
        .route("/healthz", get(|| async { "ok" }))
}

/// Create the router for the whole site
///
/// - `/api/auth/{login,logout}`, `/api/projects`, `/api/contact`, `/api/quote`
/// - `/api/admin/users/...` and `/api/admin/projects/...` for signed-in staff
/// - `/{lang}/...` public pages and the `/{lang}/dashboard` back office
/// - files under [`PUBLIC_DIR`](crate::PUBLIC_DIR) for anything else
///
/// Every route except `/healthz` goes through [`route_guard`](crate::route_guard).
pub fn binaa_router() -> Router {
    site_routes().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`binaa_router`] without the HTTP tracing layer
pub fn binaa_router_no_trace() -> Router {
    site_routes()
}
