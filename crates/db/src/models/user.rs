//! User entity model.

use fbfp_core::types::{Oid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Rows are created and refreshed from the caller's identity on every
/// authenticated request; the capability flags are managed out of band.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub oid: Oid,
    pub name: String,
    pub email: String,
    pub can_submit: bool,
    pub can_comment: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
