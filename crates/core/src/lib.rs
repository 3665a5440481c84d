//! Domain rules for the fbfp submission portal.
//!
//! Nothing in this crate talks to the database or HTTP layer, so the rules
//! can be unit-tested in isolation and shared by the repository and API
//! crates.

pub mod error;
pub mod storage;
pub mod submission;
pub mod types;
pub mod upload;
pub mod visibility;
