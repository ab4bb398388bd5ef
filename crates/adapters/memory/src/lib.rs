//! # thingbridge-adapter-memory
//!
//! In-memory implementation of the registry port.
//!
//! ## Responsibilities
//! - Implement `ThingRegistry` from `thingbridge-app::ports`
//! - Scope every record to the token that created it
//! - Issue a fresh credential to each registered thing
//!
//! ## Dependency rule
//! Depends on `thingbridge-app` (for port traits) and `thingbridge-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod registry;

pub use registry::InMemoryThingRegistry;
