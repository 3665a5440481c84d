//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod user_repo;
pub mod work_repo;

pub use comment_repo::CommentRepo;
pub use user_repo::UserRepo;
pub use work_repo::WorkRepo;
