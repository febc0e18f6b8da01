//! Repository layer contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define data-access contracts for the client roster.
//! - Keep SQL details out of the service and CLI layers.
//!
//! # Invariants
//! - Every mutating operation runs inside its own immediate transaction.
//! - Repository APIs return semantic errors (constraint violations, phone
//!   index misses) in addition to transport errors.

pub mod client_repo;
