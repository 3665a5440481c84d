//! Whole-work comment entity model and DTOs.

use fbfp_core::types::{DbId, Oid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `whole_work_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WholeWorkComment {
    pub cid: DbId,
    pub wid: DbId,
    pub oid: Oid,
    pub title: String,
    pub text: Option<String>,
    pub filename: Option<String>,
    pub anonymous: bool,
    pub public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub wid: DbId,
    pub oid: Oid,
    pub title: String,
    pub text: Option<String>,
    pub filename: Option<String>,
    pub anonymous: bool,
    pub public: bool,
}

/// Replacement values for a comment's visibility flags.
#[derive(Debug, Clone, Copy)]
pub struct CommentFlags {
    pub anonymous: bool,
    pub public: bool,
}
