//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "oid, name, email, can_submit, can_comment, created_at, updated_at";

/// Provides lookups and identity sync for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user on first sight, otherwise refresh name and email.
    ///
    /// The identity provider is the source of truth for both, so they are
    /// overwritten on every call. Capability flags are left untouched.
    pub async fn upsert_identity(
        pool: &PgPool,
        oid: &str,
        name: &str,
        email: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (oid, name, email)
             VALUES ($1, $2, $3)
             ON CONFLICT (oid) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(oid)
            .bind(name)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by oid.
    pub async fn find_by_oid(pool: &PgPool, oid: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE oid = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(oid)
            .fetch_optional(pool)
            .await
    }
}
