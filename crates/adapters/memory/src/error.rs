//! Registry-specific error type.

use thingbridge_domain::error::{NotFoundError, ThingError};
use thingbridge_domain::id::ThingId;

/// Errors originating from the in-memory registry.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// No record exists for the thing.
    #[error("thing {0} not found")]
    NotFound(ThingId),

    /// The record exists but belongs to another token.
    #[error("thing {0} is not accessible with this token")]
    Forbidden(ThingId),

    /// A record with the same id already exists.
    #[error("thing {0} is already registered")]
    AlreadyRegistered(ThingId),

    /// The store lock was poisoned by a panicking writer.
    #[error("registry store is poisoned")]
    Poisoned,
}

impl From<MemoryError> for ThingError {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::NotFound(id) => NotFoundError {
                entity: "Thing",
                id: id.to_string(),
            }
            .into(),
            other => Self::Registry(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing_id() -> ThingId {
        ThingId::new("abc").unwrap()
    }

    #[test]
    fn should_convert_not_found_to_domain_not_found() {
        let err: ThingError = MemoryError::NotFound(thing_id()).into();
        assert!(matches!(err, ThingError::NotFound(_)));
        assert_eq!(err.to_string(), "Thing abc not found");
    }

    #[test]
    fn should_convert_forbidden_to_registry_error() {
        let err: ThingError = MemoryError::Forbidden(thing_id()).into();
        assert!(matches!(err, ThingError::Registry(_)));
        assert_eq!(
            err.to_string(),
            "registry error: thing abc is not accessible with this token"
        );
    }

    #[test]
    fn should_display_already_registered_error() {
        let err = MemoryError::AlreadyRegistered(thing_id());
        assert_eq!(err.to_string(), "thing abc is already registered");
    }
}
