//! Contact domain model.
//!
//! # Responsibility
//! - Define validated field values, contact records and the address book.
//! - Host the upcoming-week birthday query.
//!
//! # Invariants
//! - Field values can only be produced through validating constructors.
//! - Every contact is identified by its `Name` inside one book.

pub mod address_book;
pub mod error;
pub mod fields;
pub mod record;
