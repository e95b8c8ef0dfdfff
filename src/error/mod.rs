//! Error types for tree building.
//!
//! Building a tree from a well-formed value cannot fail; the only error
//! condition is a member whose value could not be read. The builder
//! propagates the first such member and abandons the whole build, so a
//! returned tree never silently misses an unreadable member.

use thiserror::Error;

/// The error type returned when tree building fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A member's value could not be read (e.g. a visibility restriction).
    ///
    /// `path` locates the member from the root: member names joined with
    /// `/`, with sequence elements contributing their zero-based index
    /// (e.g. `Orders/2/Total`).
    #[error("member `{path}` is unreadable: {reason}")]
    MemberUnreadable {
        /// Slash-joined path from the root to the offending member.
        path: String,
        /// Why the member could not be read.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_unreadable_display() {
        let err = BuildError::MemberUnreadable {
            path: "Orders/2/Total".to_string(),
            reason: "access denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "member `Orders/2/Total` is unreadable: access denied"
        );
    }

    #[test]
    fn test_build_error_is_error_trait() {
        let err = BuildError::MemberUnreadable {
            path: "X".to_string(),
            reason: "test".to_string(),
        };
        let _: &dyn std::error::Error = &err;
    }
}
