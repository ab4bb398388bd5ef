//! Messages handed to the two downstream audiences.
//!
//! [`ClientMessage`]s report operation outcomes and forward commands toward
//! the application layer; [`ConnectorMessage`]s announce thing lifecycle
//! changes to the field connector. Errors travel as their display string.

use serde::{Deserialize, Serialize};

use crate::error::ThingError;
use crate::id::{AuthToken, ThingId};
use crate::schema::SchemaEntry;
use crate::thing::{Data, Thing};

/// Message destined for the client-facing channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Registered {
        id: ThingId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<AuthToken>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Unregistered {
        id: ThingId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    SchemaUpdated {
        id: ThingId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    AuthStatus {
        id: ThingId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    ThingsList {
        things: Vec<Thing>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    RequestData {
        id: ThingId,
        sensor_ids: Vec<u32>,
    },
    UpdateData {
        id: ThingId,
        data: Vec<Data>,
    },
}

/// Message destined for the connector-facing channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectorMessage {
    Registered { id: ThingId, name: String },
    SchemaChanged { id: ThingId, schema: Vec<SchemaEntry> },
    Unregistered { id: ThingId },
}

/// Render an optional error the way it is carried on the wire.
#[must_use]
pub fn error_text(err: Option<&ThingError>) -> Option<String> {
    err.map(ToString::to_string)
}
