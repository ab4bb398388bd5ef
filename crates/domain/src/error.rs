//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ThingError`]
//! via `From`. Registry and publisher adapters box their transport errors
//! into [`ThingError::Registry`] / [`ThingError::Publish`] so the
//! orchestration layer can pass them through without interpreting them.

use std::fmt;

use crate::id::ThingId;

/// Boxed transport error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by every thingbridge operation.
#[derive(Debug, thiserror::Error)]
pub enum ThingError {
    /// A required input was absent or malformed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A schema entry violates the typing rule table.
    #[error("invalid schema")]
    SchemaInvalid,

    /// A requested sensor is not part of the registered schema.
    #[error("invalid sensor id {0}")]
    SensorInvalid(u32),

    /// A data value does not match the value type of its sensor.
    #[error("invalid value for sensor id {0}")]
    DataInvalid(u32),

    /// The thing has not published a schema yet.
    #[error("thing {0} has no schema yet")]
    NoSchema(ThingId),

    /// The registry has no record for the requested thing.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The registry reported a failure.
    #[error("registry error: {0}")]
    Registry(#[source] BoxError),

    /// A message could not be handed to the bus.
    #[error("publish error: {0}")]
    Publish(#[source] BoxError),

    /// Sending a response to the client failed.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// Input-level failures detected before any collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("authorization token not provided")]
    MissingAuthorization,

    #[error("thing id not provided")]
    MissingThingId,

    #[error("thing id must be at most 16 hexadecimal characters")]
    InvalidThingId,

    #[error("thing name not provided")]
    MissingName,

    #[error("schema not provided")]
    MissingSchema,

    #[error("sensor ids not provided")]
    MissingSensors,

    #[error("data not provided")]
    MissingData,
}

/// The registry does not know the requested record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A client notification could not be sent.
///
/// When the notification was describing an earlier failure, that failure is
/// kept alongside the send error so neither is lost.
#[derive(Debug)]
pub struct NotificationError {
    send: Box<ThingError>,
    original: Option<Box<ThingError>>,
}

impl NotificationError {
    /// Combine a send failure with the error the notification was carrying.
    #[must_use]
    pub fn new(send: ThingError, original: Option<ThingError>) -> Self {
        Self {
            send: Box::new(send),
            original: original.map(Box::new),
        }
    }

    /// The error returned by the publisher.
    #[must_use]
    pub fn send_error(&self) -> &ThingError {
        &self.send
    }

    /// The operation error the notification was reporting, if any.
    #[must_use]
    pub fn original(&self) -> Option<&ThingError> {
        self.original.as_deref()
    }
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error sending response to client: {}", self.send)?;
        if let Some(original) = &self.original {
            write!(f, ": {original}")?;
        }
        Ok(())
    }
}

impl std::error::Error for NotificationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.send.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_validation_error_with_reason() {
        let err: ThingError = ValidationError::MissingAuthorization.into();
        assert_eq!(
            err.to_string(),
            "validation error: authorization token not provided"
        );
    }

    #[test]
    fn should_display_not_found_transparently() {
        let err: ThingError = NotFoundError {
            entity: "Thing",
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Thing abc not found");
    }

    #[test]
    fn should_display_notification_error_without_original() {
        let send = ThingError::Publish("bus closed".into());
        let err = NotificationError::new(send, None);
        assert_eq!(
            err.to_string(),
            "error sending response to client: publish error: bus closed"
        );
        assert!(err.original().is_none());
    }

    #[test]
    fn should_display_notification_error_with_original() {
        let send = ThingError::Publish("bus closed".into());
        let err = NotificationError::new(send, Some(ThingError::SchemaInvalid));
        assert_eq!(
            err.to_string(),
            "error sending response to client: publish error: bus closed: invalid schema"
        );
        assert!(matches!(err.original(), Some(ThingError::SchemaInvalid)));
        assert!(matches!(err.send_error(), ThingError::Publish(_)));
    }

    #[test]
    fn should_expose_send_error_as_source() {
        use std::error::Error;

        let err = NotificationError::new(ThingError::Publish("down".into()), None);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "publish error: down");
    }
}
