//! Client roster use-case service.
//!
//! # Responsibility
//! - Provide the menu-facing API over a [`ClientRepository`].
//! - Read newly created rows back so callers get full records.
//!
//! # Invariants
//! - Log events carry ids and counts only, never names, emails, or phone
//!   numbers.

use crate::model::client::{Client, ClientId, ClientMatch, ClientProfile};
use crate::repo::client_repo::{ClientRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for client roster use-cases.
#[derive(Debug)]
pub enum ClientServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write/read-back mismatch inside one operation.
    InconsistentState(&'static str),
}

impl Display for ClientServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent roster state: {details}")
            }
        }
    }
}

impl Error for ClientServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for ClientServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Menu-facing facade over repository implementations.
pub struct ClientService<R: ClientRepository> {
    repo: R,
}

impl<R: ClientRepository> ClientService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one client and returns the stored record.
    pub fn add_client(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Client, ClientServiceError> {
        let client_id = self.repo.add_client(first_name, last_name, email)?;
        info!("event=client_add module=service status=ok client_id={client_id}");
        self.repo
            .get_client(client_id)?
            .ok_or(ClientServiceError::InconsistentState(
                "created client not found in read-back",
            ))
    }

    /// Adds one phone number for an existing client.
    pub fn add_phone_number(
        &mut self,
        client_id: ClientId,
        phone_number: &str,
    ) -> Result<(), ClientServiceError> {
        self.repo.add_phone_number(client_id, phone_number)?;
        info!("event=phone_add module=service status=ok client_id={client_id}");
        Ok(())
    }

    /// Overwrites all three client fields. Unknown ids affect nothing.
    pub fn update_client(
        &mut self,
        client_id: ClientId,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<(), ClientServiceError> {
        self.repo
            .update_client(client_id, first_name, last_name, email)?;
        info!("event=client_update module=service status=ok client_id={client_id}");
        Ok(())
    }

    /// Deletes one client and, via cascade, all of its phones.
    pub fn remove_client(&mut self, client_id: ClientId) -> Result<(), ClientServiceError> {
        self.repo.remove_client(client_id)?;
        info!("event=client_remove module=service status=ok client_id={client_id}");
        Ok(())
    }

    /// Deletes the 1-based `phone_index`-th phone of a client.
    pub fn remove_phone_number(
        &mut self,
        client_id: ClientId,
        phone_index: i64,
    ) -> Result<(), ClientServiceError> {
        self.repo.remove_phone_number(client_id, phone_index)?;
        info!(
            "event=phone_remove module=service status=ok client_id={client_id} \
             phone_index={phone_index}"
        );
        Ok(())
    }

    /// Replaces the number of the 1-based `phone_index`-th phone.
    pub fn update_phone_number(
        &mut self,
        client_id: ClientId,
        phone_index: i64,
        phone_number: &str,
    ) -> Result<(), ClientServiceError> {
        self.repo
            .update_phone_number(client_id, phone_index, phone_number)?;
        info!(
            "event=phone_update module=service status=ok client_id={client_id} \
             phone_index={phone_index}"
        );
        Ok(())
    }

    /// Gets one client together with its ordered phone list.
    pub fn client_profile(
        &mut self,
        client_id: ClientId,
    ) -> Result<Option<ClientProfile>, ClientServiceError> {
        let Some(client) = self.repo.get_client(client_id)? else {
            return Ok(None);
        };
        let phones = self.repo.list_phones(client_id)?;
        Ok(Some(ClientProfile { client, phones }))
    }

    /// Finds every (client, phone) pairing matching the search term.
    pub fn find_clients(
        &mut self,
        search_term: &str,
    ) -> Result<Vec<ClientMatch>, ClientServiceError> {
        let matches = self.repo.find_clients(search_term)?;
        info!(
            "event=client_find module=service status=ok match_count={}",
            matches.len()
        );
        Ok(matches)
    }
}
