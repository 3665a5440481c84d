//! Identity primitives.
//!
//! - [`Identity`] -- who the caller is, as asserted by the login front end.
//! - [`jwt`] -- HS256 identity token minting and validation.

pub mod jwt;

/// The caller's identity as handed to us by the external login mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub oid: String,
    pub name: String,
    pub email: String,
}

impl Identity {
    /// The fixed identity used when `AUTH_MODE=dev`.
    pub fn dev() -> Self {
        Self {
            oid: "00000000-0000-0000-0000-000000000000".into(),
            name: "Test User".into(),
            email: "test@example.org".into(),
        }
    }
}
