use clientbook_core::db::open_db_in_memory;
use clientbook_core::{ClientRepository, ClientService, RepoError, SqliteClientRepository};
use rusqlite::Connection;

#[test]
fn add_and_find_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let client_id = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();

    let matches = repo.find_clients("ann@x.com").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].client_id, client_id);
    assert_eq!(matches[0].first_name, "Ann");
    assert_eq!(matches[0].last_name, "Lee");
    assert_eq!(matches[0].phone_number, None);
}

#[test]
fn generated_ids_are_not_reissued_after_delete() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let id_a = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    let id_b = repo.add_client("Bo", "Ek", "bo@x.com").unwrap();
    assert!(id_b > id_a);

    repo.remove_client(id_b).unwrap();
    let id_c = repo.add_client("Cy", "Fox", "cy@x.com").unwrap();
    assert!(id_c > id_b);
}

#[test]
fn duplicate_email_is_rejected_without_creating_a_row() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    let err = repo.add_client("Bob", "Roy", "ann@x.com").unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));

    assert!(repo.find_clients("Roy").unwrap().is_empty());
}

#[test]
fn update_overwrites_all_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let client_id = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    repo.update_client(client_id, "Anna", "Leigh", "anna@x.com")
        .unwrap();

    let client = repo.get_client(client_id).unwrap().unwrap();
    assert_eq!(client.first_name, "Anna");
    assert_eq!(client.last_name, "Leigh");
    assert_eq!(client.email, "anna@x.com");
}

#[test]
fn update_unknown_id_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let client_id = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();

    repo.update_client(client_id + 41, "Ghost", "Row", "ghost@x.com")
        .unwrap();

    let client = repo.get_client(client_id).unwrap().unwrap();
    assert_eq!(client.first_name, "Ann");
    assert!(repo.find_clients("ghost@x.com").unwrap().is_empty());
}

#[test]
fn update_to_taken_email_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    let id_b = repo.add_client("Bo", "Ek", "bo@x.com").unwrap();

    let err = repo.update_client(id_b, "Bo", "Ek", "ann@x.com").unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));

    let client = repo.get_client(id_b).unwrap().unwrap();
    assert_eq!(client.email, "bo@x.com");
}

#[test]
fn remove_client_cascades_to_phones() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let client_id = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    repo.add_phone_number(client_id, "555-0101").unwrap();
    repo.add_phone_number(client_id, "555-0202").unwrap();

    repo.remove_client(client_id).unwrap();

    assert!(repo.find_clients("ann@x.com").unwrap().is_empty());
    assert!(repo.find_clients("555-0101").unwrap().is_empty());
    assert!(repo.find_clients("555-0202").unwrap().is_empty());
    assert!(repo.list_phones(client_id).unwrap().is_empty());
}

#[test]
fn remove_unknown_client_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    repo.remove_client(404).unwrap();
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let result = SqliteClientRepository::try_new(&mut conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tables() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        clientbook_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteClientRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("clients"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        );
        CREATE TABLE phones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id INTEGER NOT NULL,
            phone_number TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        clientbook_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteClientRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "clients",
            column: "email"
        })
    ));
}

#[test]
fn service_reads_back_created_client() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::try_new(&mut conn).unwrap();
    let mut service = ClientService::new(repo);

    let client = service.add_client("Ann", "Lee", "ann@x.com").unwrap();
    assert!(client.id > 0);
    assert_eq!(client.full_name(), "Ann Lee");
    assert_eq!(client.email, "ann@x.com");
}

#[test]
fn service_profile_aggregates_ordered_phones() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::try_new(&mut conn).unwrap();
    let mut service = ClientService::new(repo);

    let client = service.add_client("Ann", "Lee", "ann@x.com").unwrap();
    service.add_phone_number(client.id, "555-0101").unwrap();
    service.add_phone_number(client.id, "555-0202").unwrap();

    let profile = service.client_profile(client.id).unwrap().unwrap();
    assert_eq!(profile.client.id, client.id);
    let numbers: Vec<&str> = profile
        .phones
        .iter()
        .map(|phone| phone.phone_number.as_str())
        .collect();
    assert_eq!(numbers, ["555-0101", "555-0202"]);

    assert!(service.client_profile(client.id + 99).unwrap().is_none());
}
