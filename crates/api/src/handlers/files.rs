use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use fbfp_core::error::CoreError;
use fbfp_core::upload::is_safe_filename;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::state::AppState;

/// GET /file/{filename}
///
/// Unauthenticated download of a stored upload, streamed from disk as an
/// attachment. The random token in stored names is what keeps private
/// files from being guessed. Names that could leave the upload directory
/// are answered like missing files.
pub async fn download(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    request: Request,
) -> AppResult<Response> {
    let filename = forms::decode_path(path)?;
    let not_found = || AppError::Core(CoreError::not_found("File", &filename));

    if !is_safe_filename(&filename) {
        tracing::warn!(%filename, "Rejected unsafe download name");
        return Err(not_found());
    }

    let file_path = state.config.uploads.upload_path.join(&filename);
    let response = match ServeFile::new(&file_path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    if response.status() == StatusCode::NOT_FOUND {
        return Err(not_found());
    }

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let mut response = response.map(Body::new);
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(CONTENT_DISPOSITION, disposition);
    Ok(response)
}
