use axum::extract::State;
use axum::Json;
use fbfp_db::repositories::WorkRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{AccountView, WorkSummary};

/// Landing page contents for the signed-in user.
#[derive(Debug, Serialize)]
pub struct IndexView {
    pub site_title: String,
    pub account: AccountView,
    /// The caller's own works, newest first.
    pub yours: Vec<WorkSummary>,
    /// Public works of everyone else, newest first.
    pub others: Vec<WorkSummary>,
}

/// Contents of the disclaimer page.
#[derive(Debug, Serialize)]
pub struct DisclaimerView {
    pub site_title: String,
    pub account: AccountView,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<DataResponse<IndexView>>> {
    let yours = WorkRepo::list_by_owner(&state.pool, &user.oid).await?;
    let others = WorkRepo::list_public_by_others(&state.pool, &user.oid).await?;

    Ok(Json(DataResponse {
        data: IndexView {
            site_title: state.config.site_title.clone(),
            account: AccountView::from(&user),
            yours: yours.iter().map(|w| WorkSummary::new(w, &user.oid)).collect(),
            others: others.iter().map(|w| WorkSummary::new(w, &user.oid)).collect(),
        },
    }))
}

/// GET /disclaimer
pub async fn disclaimer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<DataResponse<DisclaimerView>> {
    Json(DataResponse {
        data: DisclaimerView {
            site_title: state.config.site_title.clone(),
            account: AccountView::from(&user),
        },
    })
}
