//! DTOs module - Data Transfer Objects
//!
//! Shapes exchanged with clients that are not entities themselves.

pub mod breed;
pub mod query;

pub use breed::{BreedSearchResultDTO, NO_BREEDS_FOUND};
pub use query::BreedSearchQuery;
