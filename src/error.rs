//! Error types shared by the path and merge engines.

use thiserror::Error;

/// Error represents a failure reported by any array helper operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller supplied a structurally invalid parameter.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Traversal reached an object that could not resolve a named member.
    #[error("unable to resolve `{property}` on object of class {class}")]
    PropertyResolution { class: String, property: String },

    /// An immutable container rejected a mutation.
    #[error("cannot {operation}: collection is immutable")]
    ImmutableMutation { operation: String },
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a property resolution error.
    pub fn property_resolution(class: impl Into<String>, property: impl Into<String>) -> Self {
        Error::PropertyResolution {
            class: class.into(),
            property: property.into(),
        }
    }

    /// Creates an immutable mutation error.
    pub fn immutable_mutation(operation: impl Into<String>) -> Self {
        Error::ImmutableMutation {
            operation: operation.into(),
        }
    }

    /// Returns true if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("Only 1 character is allowed for delimiter.");
        assert!(format!("{}", err).contains("delimiter"));

        let err = Error::property_resolution("Post", "title");
        assert_eq!(
            format!("{}", err),
            "unable to resolve `title` on object of class Post"
        );

        let err = Error::immutable_mutation("set value");
        assert!(format!("{}", err).contains("immutable"));
    }

    #[test]
    fn test_error_kind() {
        assert!(Error::invalid_argument("x").is_invalid_argument());
        assert!(!Error::immutable_mutation("x").is_invalid_argument());
    }
}
