//! Request extractors.
//!
//! - [`auth::CurrentUser`] -- Resolves the caller's identity and syncs their user row.

pub mod auth;
