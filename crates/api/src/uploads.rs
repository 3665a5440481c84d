//! Upload directory management.

use std::io::ErrorKind;
use std::path::Path;

use fbfp_core::storage::ensure_free_space;
use fbfp_core::upload::stored_filename;
use tokio::io::AsyncWriteExt;

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::forms::UploadedFile;

/// Attempts at finding an unused random filename before giving up.
const MAX_NAME_ATTEMPTS: usize = 5;

/// Store an uploaded file and return the name it was stored under.
///
/// Refuses the upload when the disk is close to full. Files are created
/// with create-new semantics so an existing upload is never overwritten.
pub async fn store(config: &UploadConfig, file: &UploadedFile) -> AppResult<String> {
    let dir = config.upload_path.clone();
    let required = config.require_free_space;
    tokio::task::spawn_blocking(move || ensure_free_space(&dir, required))
        .await
        .map_err(|e| AppError::InternalError(format!("Free space check failed: {e}")))??;

    for _ in 0..MAX_NAME_ATTEMPTS {
        let name = stored_filename(&file.original_name);
        let path = config.upload_path.join(&name);

        let mut out = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(AppError::InternalError(e.to_string())),
        };

        let written = async {
            out.write_all(&file.data).await?;
            out.flush().await
        }
        .await;
        if let Err(e) = written {
            remove(&config.upload_path, &name).await;
            return Err(AppError::InternalError(e.to_string()));
        }

        tracing::info!(
            filename = %name,
            original = %file.original_name,
            bytes = file.data.len(),
            "Stored upload"
        );
        return Ok(name);
    }

    Err(AppError::InternalError(
        "Could not allocate a unique upload filename".into(),
    ))
}

/// Remove a stored upload. Failures are logged, never raised.
pub async fn remove(upload_path: &Path, filename: &str) {
    match tokio::fs::remove_file(upload_path.join(filename)).await {
        Ok(()) => tracing::info!(%filename, "Removed upload"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%filename, "Upload already missing from disk");
        }
        Err(e) => tracing::error!(%filename, error = %e, "Failed to remove upload"),
    }
}
