//! JSON documents returned by the read endpoints.
//!
//! Each view is built for a specific viewer: owner identities of anonymous
//! items are withheld from everyone but the owner.

use fbfp_core::types::{DbId, Timestamp};
use fbfp_core::visibility::visible_owner;
use fbfp_db::models::comment::WholeWorkComment;
use fbfp_db::models::user::User;
use fbfp_db::models::work::Work;
use serde::Serialize;

/// Download URL for a stored upload.
pub fn file_url(filename: &str) -> String {
    format!("/file/{filename}")
}

/// A work as listed on the index and profile pages.
#[derive(Debug, Serialize)]
pub struct WorkSummary {
    pub wid: DbId,
    pub title: String,
    pub owner: Option<String>,
    pub has_file: bool,
    pub anonymous: bool,
    pub public: bool,
    pub active: bool,
    pub created_at: Timestamp,
}

impl WorkSummary {
    pub fn new(work: &Work, viewer: &str) -> Self {
        Self {
            wid: work.wid,
            title: work.title.clone(),
            owner: visible_owner(viewer, &work.oid, work.anonymous).map(str::to_string),
            has_file: work.filename.is_some(),
            anonymous: work.anonymous,
            public: work.public,
            active: work.active,
            created_at: work.created_at,
        }
    }
}

/// A comment as listed under its work.
#[derive(Debug, Serialize)]
pub struct CommentSummary {
    pub cid: DbId,
    pub title: String,
    pub owner: Option<String>,
    pub has_file: bool,
    pub anonymous: bool,
    pub public: bool,
    pub created_at: Timestamp,
}

impl CommentSummary {
    pub fn new(comment: &WholeWorkComment, viewer: &str) -> Self {
        Self {
            cid: comment.cid,
            title: comment.title.clone(),
            owner: visible_owner(viewer, &comment.oid, comment.anonymous).map(str::to_string),
            has_file: comment.filename.is_some(),
            anonymous: comment.anonymous,
            public: comment.public,
            created_at: comment.created_at,
        }
    }
}

/// Full view of a single work with the comments the viewer may see.
#[derive(Debug, Serialize)]
pub struct WorkView {
    pub wid: DbId,
    pub title: String,
    pub text: Option<String>,
    pub filename: Option<String>,
    pub file_url: Option<String>,
    pub owner: Option<String>,
    pub is_owner: bool,
    pub anonymous: bool,
    pub public: bool,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub comments: Vec<CommentSummary>,
}

impl WorkView {
    pub fn new(work: Work, viewer: &str, comments: Vec<CommentSummary>) -> Self {
        Self {
            wid: work.wid,
            owner: visible_owner(viewer, &work.oid, work.anonymous).map(str::to_string),
            is_owner: viewer == work.oid,
            file_url: work.filename.as_deref().map(file_url),
            title: work.title,
            text: work.text,
            filename: work.filename,
            anonymous: work.anonymous,
            public: work.public,
            active: work.active,
            created_at: work.created_at,
            updated_at: work.updated_at,
            comments,
        }
    }
}

/// Full view of a single comment.
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub cid: DbId,
    pub wid: DbId,
    pub title: String,
    pub text: Option<String>,
    pub filename: Option<String>,
    pub file_url: Option<String>,
    pub owner: Option<String>,
    pub is_owner: bool,
    pub anonymous: bool,
    pub public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CommentView {
    pub fn new(comment: WholeWorkComment, viewer: &str) -> Self {
        Self {
            cid: comment.cid,
            wid: comment.wid,
            owner: visible_owner(viewer, &comment.oid, comment.anonymous).map(str::to_string),
            is_owner: viewer == comment.oid,
            file_url: comment.filename.as_deref().map(file_url),
            title: comment.title,
            text: comment.text,
            filename: comment.filename,
            anonymous: comment.anonymous,
            public: comment.public,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Public profile of a user.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub oid: String,
    pub name: String,
    pub email: String,
    pub works: Vec<WorkSummary>,
}

/// The caller's own account, shown on the index.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub oid: String,
    pub name: String,
    pub email: String,
    pub can_submit: bool,
    pub can_comment: bool,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        Self {
            oid: user.oid.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            can_submit: user.can_submit,
            can_comment: user.can_comment,
        }
    }
}

/// Description of a submission form (what a template would have rendered).
#[derive(Debug, Serialize)]
pub struct SubmissionFormView {
    pub site_title: String,
    /// Where the form posts to.
    pub action: String,
    /// Set when commenting: the work being commented on.
    pub work: Option<WorkSummary>,
    pub fields: &'static [&'static str],
    pub max_file_size: u64,
    pub max_file_size_human: String,
    pub max_request_size: u64,
    pub max_request_size_human: String,
}

/// What a confirmed delete would remove.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub title: String,
    pub filename: Option<String>,
    /// Comments removed along with a work; always zero for comments.
    pub comment_count: i64,
    /// Form field that must be present for the delete to happen.
    pub confirm_field: &'static str,
    /// Where the confirmation posts to.
    pub action: String,
}
