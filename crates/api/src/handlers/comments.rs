//! Handlers for whole-work comments.
//!
//! A comment is reachable only through a work the caller can see, and
//! only under the `wid` it belongs to.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Multipart, Path, State};
use axum::response::Redirect;
use axum::Json;
use fbfp_core::error::CoreError;
use fbfp_core::submission::validate_submission;
use fbfp_core::types::DbId;
use fbfp_core::upload::format_size;
use fbfp_core::visibility::{can_comment_on, can_modify, can_view_comment};
use fbfp_db::models::comment::{CreateComment, WholeWorkComment};
use fbfp_db::repositories::CommentRepo;
use sqlx::PgPool;

use super::works::load_visible_work;
use crate::error::{AppError, AppResult};
use crate::forms::{self, ConfirmForm, FlagsForm};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads;
use crate::views::{CommentView, DeleteConfirmation, SubmissionFormView, WorkSummary};

const COMMENT_FIELDS: &[&str] = &["title", "text", "file", "anonymous", "public"];

fn comment_not_found(cid: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Comment", cid))
}

/// Load a comment on `wid` that `viewer` is allowed to see.
async fn load_visible_comment(
    pool: &PgPool,
    viewer: &str,
    wid: DbId,
    cid: DbId,
) -> AppResult<WholeWorkComment> {
    let work = load_visible_work(pool, viewer, wid).await?;
    CommentRepo::find_by_id(pool, cid)
        .await?
        .filter(|c| c.wid == wid)
        .filter(|c| can_view_comment(viewer, &c.oid, &work.oid, c.public))
        .ok_or_else(|| comment_not_found(cid))
}

/// Load a comment the caller may see and also modify.
async fn load_owned_comment(
    pool: &PgPool,
    viewer: &str,
    wid: DbId,
    cid: DbId,
) -> AppResult<WholeWorkComment> {
    let comment = load_visible_comment(pool, viewer, wid, cid).await?;
    if !can_modify(viewer, &comment.oid) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can change this comment.".into(),
        )));
    }
    Ok(comment)
}

fn comments_closed() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "This submission is not accepting comments.".into(),
    ))
}

/// GET /work/{wid}/comment/new
pub async fn new_comment_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<SubmissionFormView>>> {
    let wid = forms::decode_path(path)?;
    let work = load_visible_work(&state.pool, &user.oid, wid).await?;
    if !can_comment_on(&user.oid, &work.oid, work.active) {
        return Err(comments_closed());
    }

    let config = &state.config;
    Ok(Json(DataResponse {
        data: SubmissionFormView {
            site_title: config.site_title.clone(),
            action: format!("/work/{wid}/comment/new"),
            work: Some(WorkSummary::new(&work, &user.oid)),
            fields: COMMENT_FIELDS,
            max_file_size: config.uploads.max_file_size,
            max_file_size_human: format_size(config.uploads.max_file_size),
            max_request_size: config.max_request_size as u64,
            max_request_size_human: format_size(config.max_request_size as u64),
        },
    }))
}

/// POST /work/{wid}/comment/new
///
/// Same form as a work submission minus `active`. Only active works take
/// comments from users other than their owner.
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<DbId>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Redirect> {
    let wid = forms::decode_path(path)?;
    if !user.can_comment {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not allowed to comment.".into(),
        )));
    }

    let work = load_visible_work(&state.pool, &user.oid, wid).await?;
    if !can_comment_on(&user.oid, &work.oid, work.active) {
        return Err(comments_closed());
    }

    let form = forms::read_submission(multipart, state.config.uploads.max_file_size).await?;
    let valid = validate_submission(form.title.as_deref(), form.text.as_deref(), form.file.is_some())?;

    let filename = match &form.file {
        Some(file) => Some(uploads::store(&state.config.uploads, file).await?),
        None => None,
    };

    let input = CreateComment {
        wid,
        oid: user.oid.clone(),
        title: valid.title,
        text: valid.text,
        filename,
        anonymous: form.anonymous,
        public: form.public,
    };

    let comment = match CommentRepo::create(&state.pool, &input).await {
        Ok(comment) => comment,
        Err(e) => {
            if let Some(name) = &input.filename {
                uploads::remove(&state.config.uploads.upload_path, name).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        wid,
        cid = comment.cid,
        oid = %user.oid,
        has_file = comment.filename.is_some(),
        "Comment created"
    );
    Ok(Redirect::to(&format!(
        "/work/{wid}/comment/{}",
        comment.cid
    )))
}

/// GET /work/{wid}/comment/{cid}
pub async fn get_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<(DbId, DbId)>, PathRejection>,
) -> AppResult<Json<DataResponse<CommentView>>> {
    let (wid, cid) = forms::decode_path(path)?;
    let comment = load_visible_comment(&state.pool, &user.oid, wid, cid).await?;
    Ok(Json(DataResponse {
        data: CommentView::new(comment, &user.oid),
    }))
}

/// POST /work/{wid}/comment/{cid}/update
///
/// Replace the comment's `anonymous`/`public` flags. Author only.
pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<(DbId, DbId)>, PathRejection>,
    form: Result<Form<FlagsForm>, FormRejection>,
) -> AppResult<Redirect> {
    let (wid, cid) = forms::decode_path(path)?;
    load_owned_comment(&state.pool, &user.oid, wid, cid).await?;
    let flags = forms::decode_form(form)?.comment_flags();

    CommentRepo::update_flags(&state.pool, cid, flags)
        .await?
        .ok_or_else(|| comment_not_found(cid))?;

    tracing::info!(wid, cid, anonymous = flags.anonymous, public = flags.public, "Comment flags updated");
    Ok(Redirect::to(&format!("/work/{wid}/comment/{cid}")))
}

/// GET /work/{wid}/comment/{cid}/delete
pub async fn confirm_delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<(DbId, DbId)>, PathRejection>,
) -> AppResult<Json<DataResponse<DeleteConfirmation>>> {
    let (wid, cid) = forms::decode_path(path)?;
    let comment = load_owned_comment(&state.pool, &user.oid, wid, cid).await?;
    Ok(Json(DataResponse {
        data: DeleteConfirmation {
            title: comment.title,
            filename: comment.filename,
            comment_count: 0,
            confirm_field: "confirm",
            action: format!("/work/{wid}/comment/{cid}/delete"),
        },
    }))
}

/// POST /work/{wid}/comment/{cid}/delete
///
/// Needs the `confirm` field; without it the caller is sent back to the
/// comment. A confirmed delete also removes the comment's file.
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<(DbId, DbId)>, PathRejection>,
    form: Result<Form<ConfirmForm>, FormRejection>,
) -> AppResult<Redirect> {
    let (wid, cid) = forms::decode_path(path)?;
    load_owned_comment(&state.pool, &user.oid, wid, cid).await?;

    if !forms::decode_form(form)?.confirmed() {
        return Ok(Redirect::to(&format!(
            "/work/{wid}/comment/{cid}"
        )));
    }

    let comment = CommentRepo::delete(&state.pool, cid)
        .await?
        .ok_or_else(|| comment_not_found(cid))?;
    if let Some(filename) = &comment.filename {
        uploads::remove(&state.config.uploads.upload_path, filename).await;
    }

    tracing::info!(wid, cid, oid = %user.oid, "Comment deleted");
    Ok(Redirect::to(&format!("/work/{wid}")))
}
