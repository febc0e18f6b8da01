//! Core domain logic for ClientBook.
//! This crate is the single source of truth for storage and roster rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, ClientId, ClientMatch, ClientProfile, Phone, PhoneId};
pub use repo::client_repo::{ClientRepository, RepoError, RepoResult, SqliteClientRepository};
pub use service::client_service::{ClientService, ClientServiceError};
