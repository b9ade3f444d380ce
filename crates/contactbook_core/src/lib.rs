//! Core domain logic for the contact book.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address_book::{AddressBook, RecordSnapshot, WeeklyBirthdays};
pub use model::error::{ContactError, ContactResult};
pub use model::fields::{Birthday, Name, PhoneNumber, ValidationError};
pub use model::record::Record;
pub use repo::book_repo::{
    load_address_book, save_address_book, AddressBookRepository, RepoError, RepoResult,
    SqliteAddressBookRepository,
};
pub use service::assistant::{parse_command, Assistant, Command, ParseError, Reply};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
