//! Request handlers.
//!
//! Handlers resolve the caller through [`CurrentUser`](crate::middleware::auth::CurrentUser),
//! apply the rules in `fbfp_core::visibility`, delegate persistence to the
//! repositories in `fbfp_db` and map errors via [`AppError`](crate::error::AppError).
//! Read endpoints answer JSON; form posts answer `303 See Other`.

pub mod comments;
pub mod files;
pub mod index;
pub mod users;
pub mod works;
