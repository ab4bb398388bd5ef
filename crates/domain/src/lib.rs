//! # thingbridge-domain
//!
//! Pure domain model for the thingbridge command core.
//!
//! ## Responsibilities
//! - Foundational types: opaque identifiers, error conventions
//! - Define **Things** (registry records of physical devices)
//! - Define **Schemas** (the typed channels a thing declares) and the
//!   typing **rule table** every schema entry must satisfy
//! - Define the **messages** published to clients and connectors
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod message;
pub mod schema;
pub mod thing;
