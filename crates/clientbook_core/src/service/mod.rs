//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Orchestrate repository calls into menu-level operations.
//! - Keep the CLI decoupled from storage details.

pub mod client_service;
