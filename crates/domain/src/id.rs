//! Opaque string identifiers for things and credentials.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_token {
    ($(#[doc = $doc:expr])* $name:ident, $missing:expr) => {
        $(#[doc = $doc])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a non-empty value.
            ///
            /// # Errors
            ///
            /// Returns a validation error when `value` is empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.is_empty() {
                    return Err($missing);
                }
                Ok(Self(value))
            }

            /// Borrow the inner string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_token!(
    /// Identity of a single physical thing.
    ThingId,
    ValidationError::MissingThingId
);

define_token!(
    /// Credential proving the caller may act on a registry entry.
    ///
    /// Never interpreted by the core; `Debug` output is redacted.
    AuthToken,
    ValidationError::MissingAuthorization
);

/// Longest hardware id a thing may register with.
pub const MAX_THING_ID_LEN: usize = 16;

impl ThingId {
    /// Check the id follows the hardware format required at registration:
    /// at most 16 hexadecimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThingId`] otherwise.
    pub fn validate_hardware_format(&self) -> Result<(), ValidationError> {
        if self.0.len() > MAX_THING_ID_LEN || !self.0.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidThingId);
        }
        Ok(())
    }
}

impl fmt::Debug for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ThingId").field(&self.0).finish()
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}
