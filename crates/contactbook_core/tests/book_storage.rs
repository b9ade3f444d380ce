use chrono::NaiveDate;
use contactbook_core::db::migrations::latest_version;
use contactbook_core::db::{open_db, open_db_in_memory, DbError};
use contactbook_core::{
    load_address_book, save_address_book, AddressBook, AddressBookRepository, PhoneNumber,
    Record, RecordSnapshot, RepoError, SqliteAddressBookRepository,
};
use rusqlite::Connection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_book() -> AddressBook {
    let today = date(2024, 6, 12);
    let mut book = AddressBook::new();

    let mut john = Record::new("John");
    john.add_phone("1234567890").unwrap();
    john.add_phone("5555555555").unwrap();
    john.add_phone("0000000001").unwrap();
    john.add_birthday_at("30.12.1990", today).unwrap();
    book.add_record(john);

    let mut jane = Record::new("Jane");
    jane.add_phone("9876543210").unwrap();
    book.add_record(jane);

    book.add_record(Record::new("Олексій"));
    book
}

fn phones(record: &Record) -> Vec<&str> {
    record.phones().iter().map(PhoneNumber::as_str).collect()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "contacts");
    assert_table_exists(&conn, "contact_phones");
}

#[test]
fn contacts_schema_has_only_used_columns() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('contacts');").unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(columns, ["name", "birthday"]);

    let explicit_indexes: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND sql IS NOT NULL;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(explicit_indexes, 0);
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("databases").join("nested").join("book.db");

    let conn = open_db(&path).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(path.exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_roundtrip_preserves_names_phones_and_birthdays() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressBookRepository::new(&conn);
    let book = sample_book();

    repo.save_book(&book).unwrap();
    let loaded = repo.load_book().unwrap();

    assert_eq!(loaded, book);
    let john = loaded.find("John").unwrap();
    assert_eq!(phones(john), ["1234567890", "5555555555", "0000000001"]);
    assert_eq!(john.birthday().unwrap().date(), date(1990, 12, 30));
    assert!(loaded.find("Jane").unwrap().birthday().is_none());
    assert!(loaded.find("Олексій").unwrap().phones().is_empty());
}

#[test]
fn empty_database_loads_empty_book() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressBookRepository::new(&conn);

    assert!(repo.load_book().unwrap().is_empty());
}

#[test]
fn save_replaces_previously_stored_contacts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressBookRepository::new(&conn);
    let mut book = sample_book();
    repo.save_book(&book).unwrap();

    book.delete("Jane").unwrap();
    book.find_mut("John")
        .unwrap()
        .edit_phone("5555555555", "1112223333")
        .unwrap();
    repo.save_book(&book).unwrap();

    let loaded = repo.load_book().unwrap();
    assert!(loaded.find("Jane").is_err());
    assert_eq!(
        phones(loaded.find("John").unwrap()),
        ["1234567890", "1112223333", "0000000001"]
    );
    let orphan_phones: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM contact_phones WHERE contact_name = 'Jane';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphan_phones, 0);
}

#[test]
fn file_roundtrip_through_load_and_save_functions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("databases").join("contacts.sqlite3");

    assert!(load_address_book(&path).unwrap().is_empty());

    let book = sample_book();
    save_address_book(&book, &path).unwrap();
    let reloaded = load_address_book(&path).unwrap();

    assert_eq!(reloaded, book);
}

#[test]
fn load_rejects_invalid_stored_phone() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO contacts (name, birthday) VALUES ('John', NULL);
         INSERT INTO contact_phones (contact_name, position, phone) VALUES ('John', 0, '123');",
    )
    .unwrap();

    let err = SqliteAddressBookRepository::new(&conn)
        .load_book()
        .unwrap_err();

    assert!(matches!(err, RepoError::InvalidData(_)), "unexpected: {err}");
}

#[test]
fn load_rejects_malformed_and_future_birthdays() {
    for stored in ["30.12.1990", "2999-01-01"] {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO contacts (name, birthday) VALUES ('John', ?1);",
            [stored],
        )
        .unwrap();

        let err = SqliteAddressBookRepository::new(&conn)
            .load_book()
            .unwrap_err();

        assert!(
            matches!(err, RepoError::InvalidData(_)),
            "unexpected error for `{stored}`: {err}"
        );
    }
}

#[test]
fn snapshot_uses_expected_wire_fields() {
    let book = sample_book();
    let snapshot = book.snapshot();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json[0]["name"], "Jane");
    assert_eq!(json[0]["birthday"], serde_json::Value::Null);
    assert_eq!(json[1]["name"], "John");
    assert_eq!(json[1]["phones"][1], "5555555555");
    assert_eq!(json[1]["birthday"], "1990-12-30");

    let decoded: Vec<RecordSnapshot> = serde_json::from_value(json).unwrap();
    let rebuilt = AddressBook::from_snapshot(decoded, date(2024, 6, 12)).unwrap();
    assert_eq!(rebuilt, book);
}

#[test]
fn from_snapshot_revalidates_fields() {
    let snapshot = RecordSnapshot {
        name: "John".to_string(),
        phones: vec!["12345".to_string()],
        birthday: None,
    };

    assert!(AddressBook::from_snapshot([snapshot], date(2024, 6, 12)).is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
