//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for whole address books.
//! - Isolate SQLite query details from the domain model and command layer.
//!
//! # Invariants
//! - Loaded records pass the same field validation as user input.
//! - Repository APIs separate invalid stored data from DB transport errors.

pub mod book_repo;
