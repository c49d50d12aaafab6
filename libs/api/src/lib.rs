use std::path::Path;

use axum::{
    extract::Request, handler::HandlerWithoutStateExt, routing::get,
    routing::post, Router,
};
use repository::Repository;
use tower::{
    util::{MapRequest, MapRequestLayer},
    Layer,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

pub mod healthz;
mod method_override;
pub mod not_found;
pub mod post;
mod response;
mod views;

pub use views::Views;

pub enum ApiError {
    NotFound,
    ServerError,
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Repository,
    views: Views,
}

/// The router wrapped in the pre-routing method override.
pub type App = MapRequest<Router, fn(Request) -> Request>;

pub fn serve(repository: Repository, public_dir: &Path) -> anyhow::Result<App> {
    info!(task = "start api serving", public_dir = %public_dir.display());

    let state = ApiState {
        repo: repository,
        views: Views::new()?,
    };

    let public = ServeDir::new(public_dir)
        .not_found_service(not_found::get_404.into_service());

    // a known path hit with an unrouted method is a plain 404, not a 405
    let router = Router::new()
        .route("/", get(post::get_posts).fallback(not_found::get_404))
        .route(
            "/healthz",
            get(healthz::get_health).fallback(not_found::get_404),
        )
        .route(
            "/posts",
            post(post::create_post).fallback(not_found::get_404),
        )
        .route(
            "/posts/new",
            get(post::new_post).fallback(not_found::get_404),
        )
        .route(
            "/posts/:id",
            get(post::get_post)
                .put(post::update_post)
                .delete(post::delete_post)
                .fallback(not_found::get_404),
        )
        .route(
            "/posts/:id/edit",
            get(post::edit_post).fallback(not_found::get_404),
        )
        .fallback_service(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let rewrite: fn(Request) -> Request = method_override::rewrite;

    Ok(MapRequestLayer::new(rewrite).layer(router))
}
