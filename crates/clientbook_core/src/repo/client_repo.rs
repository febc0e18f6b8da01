//! Client/phone repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `clients` and `phones` tables.
//! - Map 1-based phone indexes to stable phone ids before mutating.
//!
//! # Invariants
//! - Each mutating operation is one immediate transaction: commit on
//!   success, rollback on drop after any failure.
//! - Phone lists are ordered by ascending id wherever an index is exposed.
//! - Search terms match literally: `LIKE` metacharacters are escaped.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::client::{Client, ClientId, ClientMatch, Phone, PhoneId};
use rusqlite::{params, Connection, ErrorCode, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for client/phone persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Transport-level store failure.
    Db(DbError),
    /// Unique-email or foreign-key violation reported by the store.
    ConstraintViolation(String),
    /// A 1-based phone index did not resolve to a row.
    PhoneIndexOutOfRange {
        client_id: ClientId,
        phone_index: i64,
        phone_count: usize,
    },
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::PhoneIndexOutOfRange {
                client_id,
                phone_index,
                phone_count,
            } => write!(
                f,
                "phone index {phone_index} is out of range for client {client_id} \
                 ({phone_count} phone(s) on record)"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the client roster.
pub trait ClientRepository {
    /// Inserts one client and returns the generated id.
    fn add_client(&mut self, first_name: &str, last_name: &str, email: &str)
        -> RepoResult<ClientId>;
    /// Inserts one phone number for an existing client.
    fn add_phone_number(&mut self, client_id: ClientId, phone_number: &str) -> RepoResult<()>;
    /// Overwrites all three client fields unconditionally.
    ///
    /// Affecting zero rows (unknown id) is not an error; callers that care
    /// must check existence beforehand.
    fn update_client(
        &mut self,
        client_id: ClientId,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> RepoResult<()>;
    /// Deletes one client; the store cascade removes its phones. No-op for
    /// an unknown id.
    fn remove_client(&mut self, client_id: ClientId) -> RepoResult<()>;
    /// Deletes the `phone_index`-th phone (1-based, ascending id order).
    fn remove_phone_number(&mut self, client_id: ClientId, phone_index: i64) -> RepoResult<()>;
    /// Replaces the number of the `phone_index`-th phone (1-based).
    fn update_phone_number(
        &mut self,
        client_id: ClientId,
        phone_index: i64,
        phone_number: &str,
    ) -> RepoResult<()>;
    /// Gets one client by id.
    fn get_client(&mut self, client_id: ClientId) -> RepoResult<Option<Client>>;
    /// Lists one client's phones ordered by ascending id.
    fn list_phones(&mut self, client_id: ClientId) -> RepoResult<Vec<Phone>>;
    /// Finds every (client, phone) pairing where a name, email, or phone
    /// number contains `search_term` case-insensitively.
    fn find_clients(&mut self, search_term: &str) -> RepoResult<Vec<ClientMatch>>;
}

/// SQLite-backed client repository.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn add_client(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> RepoResult<ClientId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO clients (first_name, last_name, email) VALUES (?1, ?2, ?3);",
            params![first_name, last_name, email],
        )
        .map_err(map_sqlite_error)?;
        let client_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(client_id)
    }

    fn add_phone_number(&mut self, client_id: ClientId, phone_number: &str) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO phones (client_id, phone_number) VALUES (?1, ?2);",
            params![client_id, phone_number],
        )
        .map_err(map_sqlite_error)?;
        tx.commit()?;
        Ok(())
    }

    fn update_client(
        &mut self,
        client_id: ClientId,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        // Zero affected rows is deliberately not an error here.
        tx.execute(
            "UPDATE clients SET first_name = ?2, last_name = ?3, email = ?4 WHERE id = ?1;",
            params![client_id, first_name, last_name, email],
        )
        .map_err(map_sqlite_error)?;
        tx.commit()?;
        Ok(())
    }

    fn remove_client(&mut self, client_id: ClientId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM clients WHERE id = ?1;", [client_id])?;
        tx.commit()?;
        Ok(())
    }

    fn remove_phone_number(&mut self, client_id: ClientId, phone_index: i64) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let phone_id = resolve_phone_id(&tx, client_id, phone_index)?;
        tx.execute("DELETE FROM phones WHERE id = ?1;", [phone_id])?;
        tx.commit()?;
        Ok(())
    }

    fn update_phone_number(
        &mut self,
        client_id: ClientId,
        phone_index: i64,
        phone_number: &str,
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let phone_id = resolve_phone_id(&tx, client_id, phone_index)?;
        tx.execute(
            "UPDATE phones SET phone_number = ?2 WHERE id = ?1;",
            params![phone_id, phone_number],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_client(&mut self, client_id: ClientId) -> RepoResult<Option<Client>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, email
             FROM clients
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([client_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn list_phones(&mut self, client_id: ClientId) -> RepoResult<Vec<Phone>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, client_id, phone_number
             FROM phones
             WHERE client_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([client_id])?;
        let mut phones = Vec::new();
        while let Some(row) = rows.next()? {
            phones.push(Phone {
                id: row.get("id")?,
                client_id: row.get("client_id")?,
                phone_number: row.get("phone_number")?,
            });
        }
        Ok(phones)
    }

    fn find_clients(&mut self, search_term: &str) -> RepoResult<Vec<ClientMatch>> {
        let pattern = format!("%{}%", escape_like_pattern(search_term));
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.first_name, c.last_name, c.email, p.phone_number
             FROM clients c
             LEFT JOIN phones p ON p.client_id = c.id
             WHERE c.first_name LIKE ?1 ESCAPE '\\'
                OR c.last_name LIKE ?1 ESCAPE '\\'
                OR c.email LIKE ?1 ESCAPE '\\'
                OR p.phone_number LIKE ?1 ESCAPE '\\'
             ORDER BY c.id ASC, p.id ASC;",
        )?;
        let mut rows = stmt.query([pattern.as_str()])?;
        let mut matches = Vec::new();
        while let Some(row) = rows.next()? {
            matches.push(ClientMatch {
                client_id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                email: row.get("email")?,
                phone_number: row.get("phone_number")?,
            });
        }
        Ok(matches)
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    Ok(Client {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

/// Maps a 1-based display index onto a stable phone id.
///
/// Runs inside the caller's transaction so the index cannot drift between
/// the ordered read and the mutation.
fn resolve_phone_id(
    tx: &Transaction<'_>,
    client_id: ClientId,
    phone_index: i64,
) -> RepoResult<PhoneId> {
    let mut stmt = tx.prepare("SELECT id FROM phones WHERE client_id = ?1 ORDER BY id ASC;")?;
    let mut rows = stmt.query([client_id])?;
    let mut phone_ids: Vec<PhoneId> = Vec::new();
    while let Some(row) = rows.next()? {
        phone_ids.push(row.get(0)?);
    }

    if phone_index < 1 || phone_index as usize > phone_ids.len() {
        return Err(RepoError::PhoneIndexOutOfRange {
            client_id,
            phone_index,
            phone_count: phone_ids.len(),
        });
    }

    Ok(phone_ids[phone_index as usize - 1])
}

/// Escapes `LIKE` metacharacters so a search term matches literally.
fn escape_like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn map_sqlite_error(err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(ffi_err, ref message) = err {
        if ffi_err.code == ErrorCode::ConstraintViolation {
            let detail = message
                .clone()
                .unwrap_or_else(|| "constraint failed".to_string());
            return RepoError::ConstraintViolation(detail);
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["clients", "phones"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["id", "first_name", "last_name", "email"] {
        if !table_has_column(conn, "clients", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "clients",
                column,
            });
        }
    }

    for column in ["id", "client_id", "phone_number"] {
        if !table_has_column(conn, "phones", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "phones",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::escape_like_pattern;

    #[test]
    fn escape_leaves_plain_terms_untouched() {
        assert_eq!(escape_like_pattern("ann"), "ann");
        assert_eq!(escape_like_pattern("555-0101"), "555-0101");
    }

    #[test]
    fn escape_neutralizes_like_metacharacters() {
        assert_eq!(escape_like_pattern("50%"), "50\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern(r"back\slash"), r"back\\slash");
    }
}
