//! Work entity model and DTOs.

use fbfp_core::types::{DbId, Oid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `works` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Work {
    pub wid: DbId,
    pub oid: Oid,
    pub title: String,
    pub text: Option<String>,
    pub filename: Option<String>,
    pub anonymous: bool,
    pub public: bool,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new work.
#[derive(Debug, Clone)]
pub struct CreateWork {
    pub oid: Oid,
    pub title: String,
    pub text: Option<String>,
    pub filename: Option<String>,
    pub anonymous: bool,
    pub public: bool,
    pub active: bool,
}

/// Replacement values for a work's visibility flags.
#[derive(Debug, Clone, Copy)]
pub struct WorkFlags {
    pub anonymous: bool,
    pub public: bool,
    pub active: bool,
}

/// A deleted work together with the files its comments referenced.
#[derive(Debug, Clone)]
pub struct DeletedWork {
    pub work: Work,
    pub comment_files: Vec<String>,
}
