//! Domain model for the client roster.
//!
//! # Responsibility
//! - Define the records persisted and returned by the repository layer.
//!
//! # Invariants
//! - Identifiers are store-generated and never reused.
//! - A phone belongs to exactly one client.

pub mod client;
