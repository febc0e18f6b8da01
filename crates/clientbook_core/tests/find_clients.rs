use clientbook_core::db::open_db_in_memory;
use clientbook_core::{ClientRepository, SqliteClientRepository};

#[test]
fn search_is_case_insensitive_substring_match() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    repo.add_client("Ann", "Lee", "ann@x.com").unwrap();

    assert_eq!(repo.find_clients("ann").unwrap().len(), 1);
    assert_eq!(repo.find_clients("LEE").unwrap().len(), 1);
    assert_eq!(repo.find_clients("nn@X.c").unwrap().len(), 1);
    assert!(repo.find_clients("zara").unwrap().is_empty());
}

#[test]
fn search_matches_email_and_phone_number() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let id_a = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    let id_b = repo.add_client("Bo", "Ek", "bo@y.org").unwrap();
    repo.add_phone_number(id_a, "555-0101").unwrap();

    let by_email = repo.find_clients("y.org").unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].client_id, id_b);
    assert_eq!(by_email[0].phone_number, None);

    let by_phone = repo.find_clients("0101").unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].client_id, id_a);
    assert_eq!(by_phone[0].phone_number.as_deref(), Some("555-0101"));
}

#[test]
fn clients_without_phones_appear_once_with_null_phone() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    repo.add_client("Ann", "Lee", "ann@x.com").unwrap();

    let matches = repo.find_clients("Ann").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].phone_number, None);
}

#[test]
fn matching_client_yields_one_row_per_phone_pairing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let client_id = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    repo.add_phone_number(client_id, "555-0101").unwrap();
    repo.add_phone_number(client_id, "555-0202").unwrap();

    let matches = repo.find_clients("Lee").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|hit| hit.client_id == client_id));
    let numbers: Vec<&str> = matches
        .iter()
        .map(|hit| hit.phone_number.as_deref().unwrap())
        .collect();
    assert_eq!(numbers, ["555-0101", "555-0202"]);
}

#[test]
fn results_are_ordered_by_client_id() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    repo.add_client("Cy", "Shared", "cy@x.com").unwrap();
    repo.add_client("Ann", "Shared", "ann@x.com").unwrap();
    repo.add_client("Bo", "Shared", "bo@x.com").unwrap();

    let matches = repo.find_clients("Shared").unwrap();
    assert_eq!(matches.len(), 3);
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].client_id < pair[1].client_id));
}

#[test]
fn like_metacharacters_in_the_term_match_literally() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let literal = repo.add_client("100%", "Discount", "pct@x.com").unwrap();
    repo.add_client("1000", "Discount", "num@x.com").unwrap();
    let underscored = repo.add_client("a_c", "Scores", "u1@x.com").unwrap();
    repo.add_client("abc", "Scores", "u2@x.com").unwrap();

    let percent_hits = repo.find_clients("0%").unwrap();
    assert_eq!(percent_hits.len(), 1);
    assert_eq!(percent_hits[0].client_id, literal);

    let underscore_hits = repo.find_clients("a_c").unwrap();
    assert_eq!(underscore_hits.len(), 1);
    assert_eq!(underscore_hits[0].client_id, underscored);
}

#[test]
fn empty_term_matches_every_pairing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteClientRepository::try_new(&mut conn).unwrap();

    let id_a = repo.add_client("Ann", "Lee", "ann@x.com").unwrap();
    repo.add_client("Bo", "Ek", "bo@x.com").unwrap();
    repo.add_phone_number(id_a, "555-0101").unwrap();

    let matches = repo.find_clients("").unwrap();
    assert_eq!(matches.len(), 2);
}
