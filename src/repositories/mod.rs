//! Repositories module - Data access for every entity
//!
//! Each repository owns the SQL statements of one table. Queries are checked
//! at run time (`sqlx::query_as` with `FromRow`), so building the crate does not
//! need a live database.

pub mod breed;
pub mod error;
pub mod traits;

pub use error::StoreError;
pub use traits::{Create, Delete, Read, ReadAll, Update};

pub use breed::{BreedFilter, BreedRepository, parse_breed_id};
