pub mod health;
pub mod works;

use axum::handler::HandlerWithoutStateExt;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::handlers::{self, files, index, users};
use crate::router::no_route;
use crate::state::AppState;

/// Build the site route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                    index (own works, others' public works)
/// /new                                 submission form, create work
/// /list                                not implemented (501)
/// /disclaimer                          disclaimer page contents
///
/// /work/{wid}                          view work with visible comments
/// /work/{wid}/update                   set flags (owner)
/// /work/{wid}/delete                   confirmation, confirmed delete (owner)
/// /work/{wid}/comment/new              comment form, create comment
/// /work/{wid}/comment/{cid}            view comment
/// /work/{wid}/comment/{cid}/update     set flags (author)
/// /work/{wid}/comment/{cid}/delete     confirmation, confirmed delete (author)
///
/// /user/{oid}                          profile
/// /file/{filename}                     download (no identity required)
/// /static/*                            files under STATIC_DIR
/// ```
pub fn site_routes(static_dir: &std::path::Path) -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route(
            "/new",
            get(handlers::works::new_work_form).post(handlers::works::create_work),
        )
        .route("/list", get(handlers::works::list_works))
        .route("/disclaimer", get(index::disclaimer))
        .nest("/work", works::router())
        .route("/user/{oid}", get(users::get_user))
        .route("/file/{filename}", get(files::download))
        .nest_service(
            "/static",
            ServeDir::new(static_dir).not_found_service(no_route.into_service()),
        )
}
