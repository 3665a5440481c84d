use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use fbfp_core::error::CoreError;
use fbfp_db::repositories::{UserRepo, WorkRepo};

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{UserProfile, WorkSummary};

/// GET /user/{oid}
///
/// Profile of any user. The owner sees every work they own; everyone else
/// sees only works that are public and not anonymous, so anonymous works
/// can never be tied back to a profile.
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let oid = forms::decode_path(path)?;
    let user = UserRepo::find_by_oid(&state.pool, &oid)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", &oid)))?;

    let is_self = viewer.oid == user.oid;
    let works = WorkRepo::list_by_owner(&state.pool, &user.oid)
        .await?
        .iter()
        .filter(|w| is_self || (w.public && !w.anonymous))
        .map(|w| WorkSummary::new(w, &viewer.oid))
        .collect();

    Ok(Json(DataResponse {
        data: UserProfile {
            oid: user.oid,
            name: user.name,
            email: user.email,
            works,
        },
    }))
}
