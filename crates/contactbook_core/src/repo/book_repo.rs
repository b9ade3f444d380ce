//! Address book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Capture the whole `AddressBook` into storage and rebuild it on startup.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save_book` replaces the stored book atomically.
//! - Phone order survives a save/load cycle.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Log lines carry error codes only; stored values stay in the returned error.

use crate::db::{open_db, DbError};
use crate::model::address_book::{AddressBook, RecordSnapshot};
use crate::model::fields::today;
use chrono::NaiveDate;
use log::{error, info};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for address book persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
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

/// Repository interface for whole-book persistence.
pub trait AddressBookRepository {
    fn load_book(&self) -> RepoResult<AddressBook>;
    fn save_book(&self, book: &AddressBook) -> RepoResult<()>;
}

/// SQLite-backed address book repository.
pub struct SqliteAddressBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAddressBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AddressBookRepository for SqliteAddressBookRepository<'_> {
    fn load_book(&self) -> RepoResult<AddressBook> {
        let mut snapshots = BTreeMap::<String, RecordSnapshot>::new();

        let mut stmt = self
            .conn
            .prepare("SELECT name, birthday FROM contacts ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let birthday = match row.get::<_, Option<String>>("birthday")? {
                Some(value) => Some(parse_stored_date(&value)?),
                None => None,
            };
            snapshots.insert(
                name.clone(),
                RecordSnapshot {
                    name,
                    phones: Vec::new(),
                    birthday,
                },
            );
        }

        let mut stmt = self.conn.prepare(
            "SELECT contact_name, phone
             FROM contact_phones
             ORDER BY contact_name ASC, position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let contact_name: String = row.get("contact_name")?;
            let phone: String = row.get("phone")?;
            let snapshot = snapshots.get_mut(&contact_name).ok_or_else(|| {
                RepoError::InvalidData(
                    "phone row references a missing contact in contact_phones".to_string(),
                )
            })?;
            snapshot.phones.push(phone);
        }

        AddressBook::from_snapshot(snapshots.into_values(), today())
            .map_err(|err| RepoError::InvalidData(err.to_string()))
    }

    fn save_book(&self, book: &AddressBook) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM contact_phones;", [])?;
        tx.execute("DELETE FROM contacts;", [])?;

        {
            let mut insert_contact =
                tx.prepare("INSERT INTO contacts (name, birthday) VALUES (?1, ?2);")?;
            let mut insert_phone = tx.prepare(
                "INSERT INTO contact_phones (contact_name, position, phone)
                 VALUES (?1, ?2, ?3);",
            )?;

            for snapshot in book.snapshot() {
                let birthday = snapshot
                    .birthday
                    .map(|date| date.format(STORED_DATE_FORMAT).to_string());
                insert_contact.execute(params![snapshot.name.as_str(), birthday])?;
                for (position, phone) in (0_i64..).zip(snapshot.phones.iter()) {
                    insert_phone.execute(params![
                        snapshot.name.as_str(),
                        position,
                        phone.as_str()
                    ])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}

/// Opens the database at `path` and loads the stored address book.
///
/// A fresh database yields an empty book.
pub fn load_address_book(path: impl AsRef<Path>) -> RepoResult<AddressBook> {
    let started_at = Instant::now();
    let result = open_db(path)
        .map_err(RepoError::from)
        .and_then(|conn| SqliteAddressBookRepository::new(&conn).load_book());

    match &result {
        Ok(book) => info!(
            "event=book_load module=repo status=ok records={} duration_ms={}",
            book.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=book_load module=repo status=error duration_ms={} error_code={}",
            started_at.elapsed().as_millis(),
            repo_error_code(err)
        ),
    }
    result
}

/// Opens the database at `path` and replaces its content with `book`.
pub fn save_address_book(book: &AddressBook, path: impl AsRef<Path>) -> RepoResult<()> {
    let started_at = Instant::now();
    let result = open_db(path)
        .map_err(RepoError::from)
        .and_then(|conn| SqliteAddressBookRepository::new(&conn).save_book(book));

    match &result {
        Ok(()) => info!(
            "event=book_save module=repo status=ok records={} duration_ms={}",
            book.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=book_save module=repo status=error duration_ms={} error_code={}",
            started_at.elapsed().as_millis(),
            repo_error_code(err)
        ),
    }
    result
}

fn repo_error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Db(DbError::Io(_)) => "db_dir_create_failed",
        RepoError::Db(DbError::UnsupportedSchemaVersion { .. }) => "db_schema_unsupported",
        RepoError::Db(DbError::Sqlite(_)) => "db_query_failed",
        RepoError::InvalidData(_) => "invalid_stored_data",
    }
}

fn parse_stored_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, STORED_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid birthday `{value}` in contacts.birthday"))
    })
}
