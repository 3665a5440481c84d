//! Repository for the `works` table.

use fbfp_core::types::DbId;
use sqlx::PgPool;

use crate::models::work::{CreateWork, DeletedWork, Work, WorkFlags};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "wid, oid, title, text, filename, anonymous, public, active, \
                       created_at, updated_at";

/// Provides CRUD operations for works.
pub struct WorkRepo;

impl WorkRepo {
    /// Insert a new work, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWork) -> Result<Work, sqlx::Error> {
        let query = format!(
            "INSERT INTO works (oid, title, text, filename, anonymous, public, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(&input.oid)
            .bind(&input.title)
            .bind(&input.text)
            .bind(&input.filename)
            .bind(input.anonymous)
            .bind(input.public)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find a work by id.
    pub async fn find_by_id(pool: &PgPool, wid: DbId) -> Result<Option<Work>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE wid = $1");
        sqlx::query_as::<_, Work>(&query)
            .bind(wid)
            .fetch_optional(pool)
            .await
    }

    /// List every work owned by `oid`, newest first.
    pub async fn list_by_owner(pool: &PgPool, oid: &str) -> Result<Vec<Work>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE oid = $1 ORDER BY wid DESC");
        sqlx::query_as::<_, Work>(&query)
            .bind(oid)
            .fetch_all(pool)
            .await
    }

    /// List public works owned by anyone other than `viewer`, newest first.
    pub async fn list_public_by_others(
        pool: &PgPool,
        viewer: &str,
    ) -> Result<Vec<Work>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM works WHERE public AND oid <> $1 ORDER BY wid DESC"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(viewer)
            .fetch_all(pool)
            .await
    }

    /// Replace the visibility flags of a work.
    ///
    /// Returns `None` if no row with the given `wid` exists.
    pub async fn update_flags(
        pool: &PgPool,
        wid: DbId,
        flags: WorkFlags,
    ) -> Result<Option<Work>, sqlx::Error> {
        let query = format!(
            "UPDATE works SET anonymous = $2, public = $3, active = $4
             WHERE wid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(wid)
            .bind(flags.anonymous)
            .bind(flags.public)
            .bind(flags.active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a work and its comments in one transaction.
    ///
    /// The work row is locked first so no comment can be added between
    /// collecting the comment filenames and removing the rows.
    pub async fn delete(pool: &PgPool, wid: DbId) -> Result<Option<DeletedWork>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>("SELECT wid FROM works WHERE wid = $1 FOR UPDATE")
            .bind(wid)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let comment_files: Vec<String> = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM whole_work_comments WHERE wid = $1 RETURNING filename",
        )
        .bind(wid)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .flatten()
        .collect();

        let query = format!("DELETE FROM works WHERE wid = $1 RETURNING {COLUMNS}");
        let work = sqlx::query_as::<_, Work>(&query)
            .bind(wid)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(DeletedWork {
            work,
            comment_files,
        }))
    }
}
