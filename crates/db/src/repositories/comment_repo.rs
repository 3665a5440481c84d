//! Repository for the `whole_work_comments` table.

use fbfp_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{CommentFlags, CreateComment, WholeWorkComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "cid, wid, oid, title, text, filename, anonymous, public, \
                       created_at, updated_at";

/// Provides CRUD operations for whole-work comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComment,
    ) -> Result<WholeWorkComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO whole_work_comments (wid, oid, title, text, filename, anonymous, public)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WholeWorkComment>(&query)
            .bind(input.wid)
            .bind(&input.oid)
            .bind(&input.title)
            .bind(&input.text)
            .bind(&input.filename)
            .bind(input.anonymous)
            .bind(input.public)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by id.
    pub async fn find_by_id(
        pool: &PgPool,
        cid: DbId,
    ) -> Result<Option<WholeWorkComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM whole_work_comments WHERE cid = $1");
        sqlx::query_as::<_, WholeWorkComment>(&query)
            .bind(cid)
            .fetch_optional(pool)
            .await
    }

    /// List all comments on a work, oldest first.
    pub async fn list_by_work(
        pool: &PgPool,
        wid: DbId,
    ) -> Result<Vec<WholeWorkComment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM whole_work_comments WHERE wid = $1 ORDER BY cid");
        sqlx::query_as::<_, WholeWorkComment>(&query)
            .bind(wid)
            .fetch_all(pool)
            .await
    }

    /// Number of comments on a work.
    pub async fn count_by_work(pool: &PgPool, wid: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM whole_work_comments WHERE wid = $1")
            .bind(wid)
            .fetch_one(pool)
            .await
    }

    /// Replace the visibility flags of a comment.
    ///
    /// Returns `None` if no row with the given `cid` exists.
    pub async fn update_flags(
        pool: &PgPool,
        cid: DbId,
        flags: CommentFlags,
    ) -> Result<Option<WholeWorkComment>, sqlx::Error> {
        let query = format!(
            "UPDATE whole_work_comments SET anonymous = $2, public = $3
             WHERE cid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WholeWorkComment>(&query)
            .bind(cid)
            .bind(flags.anonymous)
            .bind(flags.public)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a comment, returning the deleted row.
    pub async fn delete(
        pool: &PgPool,
        cid: DbId,
    ) -> Result<Option<WholeWorkComment>, sqlx::Error> {
        let query = format!("DELETE FROM whole_work_comments WHERE cid = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, WholeWorkComment>(&query)
            .bind(cid)
            .fetch_optional(pool)
            .await
    }
}
