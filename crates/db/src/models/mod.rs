//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - A flags DTO for the only mutation path the portal allows

pub mod comment;
pub mod user;
pub mod work;
