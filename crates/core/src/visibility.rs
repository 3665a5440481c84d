//! Ownership and visibility rules for works and comments.
//!
//! Handlers never compare owners inline; they ask these functions. A read
//! that fails a rule is reported as "not found" so private items stay
//! undiscoverable, while a mutation of a readable item by someone else is
//! reported as forbidden.

/// Whether `viewer` may read a work owned by `owner`.
pub fn can_view_work(viewer: &str, owner: &str, public: bool) -> bool {
    public || viewer == owner
}

/// Whether `viewer` may update flags on, or delete, an item owned by `owner`.
pub fn can_modify(viewer: &str, owner: &str) -> bool {
    viewer == owner
}

/// Whether `viewer` may read a comment.
///
/// Assumes the parent work is already visible to `viewer`. The author of
/// the work always sees feedback left on it, even private feedback.
pub fn can_view_comment(
    viewer: &str,
    comment_owner: &str,
    work_owner: &str,
    comment_public: bool,
) -> bool {
    comment_public || viewer == comment_owner || viewer == work_owner
}

/// Whether `viewer` may attach a new comment to a (visible) work.
///
/// Inactive works are closed for feedback from everyone but their owner.
pub fn can_comment_on(viewer: &str, owner: &str, active: bool) -> bool {
    active || viewer == owner
}

/// The owner identity to disclose to `viewer`, or `None` for anonymous items.
pub fn visible_owner<'a>(viewer: &str, owner: &'a str, anonymous: bool) -> Option<&'a str> {
    if anonymous && viewer != owner {
        None
    } else {
        Some(owner)
    }
}
