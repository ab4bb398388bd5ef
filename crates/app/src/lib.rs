//! # thingbridge-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ThingRegistry`: authoritative thing records and schemas
//!   - `ClientPublisher`: outcomes and commands toward the application layer
//!   - `ConnectorPublisher`: lifecycle announcements toward field connectors
//! - Define the **driving/inbound port** as a use-case struct:
//!   - `ThingService`: register, update schema, request/update data,
//!     authenticate, list, unregister
//! - Provide **in-process infrastructure** (message bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `thingbridge-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod message_bus;
pub mod notify;
pub mod ports;
pub mod services;
