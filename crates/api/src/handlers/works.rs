//! Handlers for works: creation, viewing, flag updates and confirmed deletes.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Multipart, Path, State};
use axum::response::Redirect;
use axum::Json;
use fbfp_core::error::CoreError;
use fbfp_core::submission::validate_submission;
use fbfp_core::types::DbId;
use fbfp_core::upload::format_size;
use fbfp_core::visibility::{can_modify, can_view_comment, can_view_work};
use fbfp_db::models::work::{CreateWork, DeletedWork, Work};
use fbfp_db::repositories::{CommentRepo, WorkRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::forms::{self, ConfirmForm, FlagsForm};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads;
use crate::views::{CommentSummary, DeleteConfirmation, SubmissionFormView, WorkView};

/// Fields accepted by the work submission form.
const WORK_FIELDS: &[&str] = &["title", "text", "file", "anonymous", "public", "active"];

/// Load a work that `viewer` is allowed to see.
///
/// Missing and invisible works are indistinguishable to the caller.
pub(crate) async fn load_visible_work(pool: &PgPool, viewer: &str, wid: DbId) -> AppResult<Work> {
    WorkRepo::find_by_id(pool, wid)
        .await?
        .filter(|work| can_view_work(viewer, &work.oid, work.public))
        .ok_or_else(|| AppError::Core(CoreError::not_found("Submission", wid)))
}

/// Load a work the caller may see and also modify.
async fn load_owned_work(pool: &PgPool, viewer: &str, wid: DbId) -> AppResult<Work> {
    let work = load_visible_work(pool, viewer, wid).await?;
    if !can_modify(viewer, &work.oid) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can change this submission.".into(),
        )));
    }
    Ok(work)
}

/// GET /new
///
/// Describe the submission form and its limits.
pub async fn new_work_form(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<DataResponse<SubmissionFormView>>> {
    let config = &state.config;
    Ok(Json(DataResponse {
        data: SubmissionFormView {
            site_title: config.site_title.clone(),
            action: "/new".into(),
            work: None,
            fields: WORK_FIELDS,
            max_file_size: config.uploads.max_file_size,
            max_file_size_human: format_size(config.uploads.max_file_size),
            max_request_size: config.max_request_size as u64,
            max_request_size_human: format_size(config.max_request_size as u64),
        },
    }))
}

/// POST /new
///
/// Accepts a multipart form with `title`, `text`, an optional `file` and
/// the `anonymous`/`public`/`active` checkboxes. Redirects to the new work.
pub async fn create_work(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Redirect> {
    if !user.can_submit {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not allowed to submit works.".into(),
        )));
    }

    let form = forms::read_submission(multipart, state.config.uploads.max_file_size).await?;
    let valid = validate_submission(form.title.as_deref(), form.text.as_deref(), form.file.is_some())?;

    let filename = match &form.file {
        Some(file) => Some(uploads::store(&state.config.uploads, file).await?),
        None => None,
    };

    let input = CreateWork {
        oid: user.oid.clone(),
        title: valid.title,
        text: valid.text,
        filename,
        anonymous: form.anonymous,
        public: form.public,
        active: form.active,
    };

    let work = match WorkRepo::create(&state.pool, &input).await {
        Ok(work) => work,
        Err(e) => {
            if let Some(name) = &input.filename {
                uploads::remove(&state.config.uploads.upload_path, name).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        wid = work.wid,
        oid = %user.oid,
        has_file = work.filename.is_some(),
        public = work.public,
        "Work created"
    );
    Ok(Redirect::to(&format!("/work/{}", work.wid)))
}

/// GET /list
pub async fn list_works(CurrentUser(_user): CurrentUser) -> AppResult<()> {
    Err(AppError::Core(CoreError::NotImplemented(
        "/list not implemented".into(),
    )))
}

/// GET /work/{wid}
///
/// Returns the work with the comments visible to the caller. Private works
/// of other users answer 404.
pub async fn get_work(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<WorkView>>> {
    let wid = forms::decode_path(path)?;
    let work = load_visible_work(&state.pool, &user.oid, wid).await?;

    let comments = CommentRepo::list_by_work(&state.pool, wid)
        .await?
        .iter()
        .filter(|c| can_view_comment(&user.oid, &c.oid, &work.oid, c.public))
        .map(|c| CommentSummary::new(c, &user.oid))
        .collect();

    Ok(Json(DataResponse {
        data: WorkView::new(work, &user.oid, comments),
    }))
}

/// POST /work/{wid}/update
///
/// Replace the work's `anonymous`/`public`/`active` flags from a checkbox
/// form (an absent box means off). Owner only.
pub async fn update_work(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<DbId>, PathRejection>,
    form: Result<Form<FlagsForm>, FormRejection>,
) -> AppResult<Redirect> {
    let wid = forms::decode_path(path)?;
    load_owned_work(&state.pool, &user.oid, wid).await?;
    let flags = forms::decode_form(form)?.work_flags();

    WorkRepo::update_flags(&state.pool, wid, flags)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Submission", wid)))?;

    tracing::info!(
        wid,
        anonymous = flags.anonymous,
        public = flags.public,
        active = flags.active,
        "Work flags updated"
    );
    Ok(Redirect::to(&format!("/work/{wid}")))
}

/// GET /work/{wid}/delete
///
/// Describe what a confirmed delete would remove. Owner only.
pub async fn confirm_delete_work(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<DeleteConfirmation>>> {
    let wid = forms::decode_path(path)?;
    let work = load_owned_work(&state.pool, &user.oid, wid).await?;
    let comment_count = CommentRepo::count_by_work(&state.pool, wid).await?;

    Ok(Json(DataResponse {
        data: DeleteConfirmation {
            title: work.title,
            filename: work.filename,
            comment_count,
            confirm_field: "confirm",
            action: format!("/work/{wid}/delete"),
        },
    }))
}

/// POST /work/{wid}/delete
///
/// Without the `confirm` field nothing happens and the caller is sent back
/// to the work. With it, the work, its comments and every file they
/// reference are removed. Owner only.
pub async fn delete_work(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<DbId>, PathRejection>,
    form: Result<Form<ConfirmForm>, FormRejection>,
) -> AppResult<Redirect> {
    let wid = forms::decode_path(path)?;
    load_owned_work(&state.pool, &user.oid, wid).await?;

    if !forms::decode_form(form)?.confirmed() {
        tracing::debug!(wid, "Delete not confirmed");
        return Ok(Redirect::to(&format!("/work/{wid}")));
    }

    let DeletedWork {
        work,
        comment_files,
    } = WorkRepo::delete(&state.pool, wid)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Submission", wid)))?;

    let upload_path = &state.config.uploads.upload_path;
    for filename in work.filename.iter().chain(comment_files.iter()) {
        uploads::remove(upload_path, filename).await;
    }

    tracing::info!(wid, oid = %user.oid, comment_files = comment_files.len(), "Work deleted");
    Ok(Redirect::to("/"))
}
