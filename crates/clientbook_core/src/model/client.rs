//! Client and phone record types.

use serde::{Deserialize, Serialize};

/// Store-generated identifier for a client row.
pub type ClientId = i64;

/// Store-generated identifier for a phone row.
pub type PhoneId = i64;

/// A person record with a name and a unique email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Client {
    /// Display name in "First Last" form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A phone number belonging to exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    pub client_id: ClientId,
    pub phone_number: String,
}

/// One (client, phone) pairing returned by the search operation.
///
/// `phone_number` is `None` when the matching client has no phones at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMatch {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

/// A client together with its phones ordered by ascending phone id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub client: Client,
    pub phones: Vec<Phone>,
}

#[cfg(test)]
mod tests {
    use super::{Client, ClientMatch};

    fn sample_client() -> Client {
        Client {
            id: 7,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
        }
    }

    #[test]
    fn client_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(sample_client()).unwrap();
        assert_eq!(json["first_name"], "Ann");
        assert_eq!(json["last_name"], "Lee");
        assert_eq!(json["email"], "ann@x.com");
    }

    #[test]
    fn match_without_phone_serializes_null_phone() {
        let hit = ClientMatch {
            client_id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            phone_number: None,
        };
        let json = serde_json::to_value(hit).unwrap();
        assert!(json["phone_number"].is_null());
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(sample_client().full_name(), "Ann Lee");
    }
}
