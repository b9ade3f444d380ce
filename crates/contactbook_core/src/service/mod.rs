//! Use-case services on top of the contact model.
//!
//! # Responsibility
//! - Turn user text into model operations and model results into text.
//! - Keep the binary free of parsing and formatting rules.

pub mod assistant;
