//! Entities module - Domain entities
//!
//! Every entity maps one table of the database.

pub mod breed;

pub use breed::Breed;
