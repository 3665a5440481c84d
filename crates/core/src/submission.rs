//! Validation of work and comment submissions.
//!
//! Works and comments share the same form shape: a required title, a text
//! field that may be blank when a file is attached, and checkbox flags.

use crate::error::CoreError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 256;

/// A submission that passed validation, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    /// Trimmed, non-empty title.
    pub title: String,
    /// `None` when the text field was blank (a file carries the content).
    pub text: Option<String>,
}

/// Validate the raw form fields of a submission.
///
/// `title` and `text` are `None` when the field was absent from the form,
/// which is rejected outright; blank values are handled separately.
pub fn validate_submission(
    title: Option<&str>,
    text: Option<&str>,
    has_file: bool,
) -> Result<ValidatedSubmission, CoreError> {
    let title = title.ok_or_else(|| missing_field("title"))?;
    let text = text.ok_or_else(|| missing_field("text"))?;

    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("You didn't include a title.".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Your title is too long; keep it under {MAX_TITLE_LEN} characters."
        )));
    }

    let text = if text.trim().is_empty() {
        if !has_file {
            return Err(CoreError::Validation(
                "Your submission is basically empty. You need to upload a file or insert some text."
                    .into(),
            ));
        }
        None
    } else {
        Some(text.to_string())
    };

    Ok(ValidatedSubmission {
        title: title.to_string(),
        text,
    })
}

/// Checkbox semantics: a flag is set iff its field was submitted at all.
pub fn checkbox(value: Option<&str>) -> bool {
    value.is_some()
}

fn missing_field(name: &str) -> CoreError {
    CoreError::Validation(format!("Form does not include {name}"))
}
