//! Route definitions for works and their whole-work comments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comments, works};
use crate::state::AppState;

/// Routes mounted at `/work`.
///
/// ```text
/// GET    /{wid}                             -> get_work
/// POST   /{wid}/update                      -> update_work
/// GET    /{wid}/delete                      -> confirm_delete_work
/// POST   /{wid}/delete                      -> delete_work
/// GET    /{wid}/comment/new                 -> new_comment_form
/// POST   /{wid}/comment/new                 -> create_comment
/// GET    /{wid}/comment/{cid}               -> get_comment
/// POST   /{wid}/comment/{cid}/update        -> update_comment
/// GET    /{wid}/comment/{cid}/delete        -> confirm_delete_comment
/// POST   /{wid}/comment/{cid}/delete        -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{wid}", get(works::get_work))
        .route("/{wid}/update", post(works::update_work))
        .route(
            "/{wid}/delete",
            get(works::confirm_delete_work).post(works::delete_work),
        )
        .route(
            "/{wid}/comment/new",
            get(comments::new_comment_form).post(comments::create_comment),
        )
        .route("/{wid}/comment/{cid}", get(comments::get_comment))
        .route("/{wid}/comment/{cid}/update", post(comments::update_comment))
        .route(
            "/{wid}/comment/{cid}/delete",
            get(comments::confirm_delete_comment).post(comments::delete_comment),
        )
}
