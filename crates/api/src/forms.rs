//! Request decoding for submissions, flag updates, delete confirmations
//! and path parameters.
//!
//! Works and comments are submitted as `multipart/form-data` with the
//! fields `title`, `text`, `file` and the checkboxes `anonymous`, `public`
//! and `active`. Flag updates and confirmations are plain urlencoded forms.

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Multipart, Path};
use axum::http::StatusCode;
use fbfp_core::error::CoreError;
use fbfp_core::submission::checkbox;
use fbfp_core::upload::format_size;
use fbfp_db::models::comment::CommentFlags;
use fbfp_db::models::work::WorkFlags;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// A file received in a submission, held in memory until stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client (untrusted).
    pub original_name: String,
    pub data: Bytes,
}

/// Raw fields of a work or comment submission.
///
/// `title` and `text` stay `None` when the field was absent so validation
/// can tell "missing" from "blank".
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub title: Option<String>,
    pub text: Option<String>,
    pub file: Option<UploadedFile>,
    pub anonymous: bool,
    pub public: bool,
    pub active: bool,
}

/// Drain a submission multipart stream.
///
/// A `file` part without a client filename is what browsers send for an
/// empty file input and counts as no file. Files over `max_file_size` are
/// rejected as soon as the limit is crossed. Unknown fields are ignored.
pub async fn read_submission(
    multipart: Result<Multipart, MultipartRejection>,
    max_file_size: u64,
) -> AppResult<SubmissionForm> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut form = SubmissionForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original_name = match field.file_name() {
                    Some(f) if !f.is_empty() => f.to_string(),
                    _ => continue,
                };

                let mut data = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    data.extend_from_slice(&chunk);
                    if data.len() as u64 > max_file_size {
                        return Err(AppError::Core(CoreError::PayloadTooLarge(format!(
                            "File size exceeds {}. Either submit a smaller file, or use a \
                             file hosting service and submit the URL.",
                            format_size(max_file_size)
                        ))));
                    }
                }

                form.file = Some(UploadedFile {
                    original_name,
                    data: Bytes::from(data),
                });
            }
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "text" => form.text = Some(field.text().await.map_err(multipart_error)?),
            "anonymous" => form.anonymous = true,
            "public" => form.public = true,
            "active" => form.active = true,
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::PayloadTooLarge(e.body_text()))
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Checkbox form posted to the `update` endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FlagsForm {
    pub anonymous: Option<String>,
    pub public: Option<String>,
    pub active: Option<String>,
}

impl FlagsForm {
    pub fn work_flags(&self) -> WorkFlags {
        WorkFlags {
            anonymous: checkbox(self.anonymous.as_deref()),
            public: checkbox(self.public.as_deref()),
            active: checkbox(self.active.as_deref()),
        }
    }

    pub fn comment_flags(&self) -> CommentFlags {
        CommentFlags {
            anonymous: checkbox(self.anonymous.as_deref()),
            public: checkbox(self.public.as_deref()),
        }
    }
}

/// Form posted to the `delete` endpoints; deletion needs the `confirm` box.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    pub confirm: Option<String>,
}

impl ConfirmForm {
    pub fn confirmed(&self) -> bool {
        checkbox(self.confirm.as_deref())
    }
}

/// Unwrap a urlencoded form, rendering rejections through [`AppError`].
pub fn decode_form<T>(form: Result<Form<T>, FormRejection>) -> AppResult<T> {
    form.map(|Form(inner)| inner)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Unwrap path parameters, turning an undecodable segment into a 400.
pub fn decode_path<T>(path: Result<Path<T>, PathRejection>) -> AppResult<T> {
    path.map(|Path(inner)| inner)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}
