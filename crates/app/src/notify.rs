//! Notification outcome helpers shared by the orchestrators.
//!
//! Client notifications are fatal: their failure is folded together with the
//! error they were reporting so exactly one error leaves each step.
//! Connector notifications sent after a committed registry change are
//! best-effort and surface as a [`Delivery`] instead of an error.

use thingbridge_domain::error::{NotificationError, ThingError};
use thingbridge_domain::id::ThingId;

/// Combine the error a notification was reporting with the result of
/// sending it.
///
/// - send failed, original present: one combined error carrying both
/// - send failed, no original: the send failure
/// - send succeeded: the original, if any
#[must_use]
pub fn fold(original: Option<ThingError>, sent: Result<(), ThingError>) -> Option<ThingError> {
    match original {
        Some(original) => Some(fold_failure(original, sent)),
        None => sent.err().map(|send| {
            tracing::error!(%send, "failed to send response to client");
            NotificationError::new(send, None).into()
        }),
    }
}

/// [`fold`] for a step that already failed: the result is always an error.
#[must_use]
pub fn fold_failure(original: ThingError, sent: Result<(), ThingError>) -> ThingError {
    match sent {
        Ok(()) => original,
        Err(send) => {
            tracing::error!(%send, %original, "failed to send failure response to client");
            NotificationError::new(send, Some(original)).into()
        }
    }
}

/// [`fold`] for a success notification.
///
/// # Errors
///
/// Returns [`ThingError::Notification`] when the send failed.
pub fn fold_success(sent: Result<(), ThingError>) -> Result<(), ThingError> {
    fold(None, sent).map_or(Ok(()), Err)
}

/// Outcome of a best-effort notification.
///
/// A degraded delivery never changes the outcome reported by the
/// orchestrator; it is logged and handed back for inspection.
#[derive(Debug)]
#[must_use]
pub enum Delivery {
    Sent,
    Degraded(ThingError),
}

impl Delivery {
    /// Classify the result of a best-effort send, logging failures.
    pub fn from_send(step: &'static str, id: &ThingId, sent: Result<(), ThingError>) -> Self {
        match sent {
            Ok(()) => Self::Sent,
            Err(err) => {
                tracing::warn!(%err, thing_id = %id, step, "best-effort notification failed");
                Self::Degraded(err)
            }
        }
    }

    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send_error() -> ThingError {
        ThingError::Publish("bus unavailable".into())
    }

    #[test]
    fn should_return_nothing_when_send_succeeds_without_original() {
        assert!(fold(None, Ok(())).is_none());
    }

    #[test]
    fn should_return_original_when_send_succeeds() {
        let result = fold(Some(ThingError::SchemaInvalid), Ok(()));
        assert!(matches!(result, Some(ThingError::SchemaInvalid)));
    }

    #[test]
    fn should_wrap_send_failure_without_original() {
        let result = fold(None, Err(send_error()));
        let Some(ThingError::Notification(err)) = &result else {
            panic!("expected notification error, got {result:?}");
        };
        assert!(err.original().is_none());
        assert!(matches!(err.send_error(), ThingError::Publish(_)));
    }

    #[test]
    fn should_combine_send_failure_with_original() {
        let result = fold_failure(ThingError::SensorInvalid(3), Err(send_error()));
        let ThingError::Notification(err) = &result else {
            panic!("expected notification error, got {result:?}");
        };
        assert!(matches!(err.original(), Some(ThingError::SensorInvalid(3))));
        assert_eq!(
            err.to_string(),
            "error sending response to client: publish error: bus unavailable: invalid sensor id 3"
        );
    }

    #[test]
    fn should_succeed_when_success_notification_sent() {
        assert!(fold_success(Ok(())).is_ok());
    }

    #[test]
    fn should_fail_when_success_notification_not_sent() {
        assert!(matches!(
            fold_success(Err(send_error())),
            Err(ThingError::Notification(_))
        ));
    }

    #[test]
    fn should_classify_best_effort_delivery() {
        let id = ThingId::new("abc").unwrap();
        assert!(Delivery::from_send("test", &id, Ok(())).is_sent());
        assert!(Delivery::from_send("test", &id, Err(send_error())).is_degraded());
    }
}
