//! Foundation types for refls.
//!
//! `refls` enumerates named references and prints the object identifiers
//! they point at. This crate holds the types every other refls crate needs:
//!
//! - [`ObjectId`] — Content-addressed identifier (BLAKE3 hash)
//! - [`TypeError`] — Errors from parsing and conversion

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
