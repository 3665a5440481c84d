/// Work and comment primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User identifiers are opaque strings handed to us by the identity provider.
pub type Oid = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
