//! Breed DTOs - Response shapes for the breed endpoints

use crate::entities::Breed;
use serde::Serialize;

pub const NO_BREEDS_FOUND: &str = "No breeds found";

/// Body returned by the search endpoint.
///
/// An empty result is reported as a message object rather than `[]`,
/// unlike the list endpoint.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum BreedSearchResultDTO {
    Matches(Vec<Breed>),
    Empty { message: &'static str },
}

impl From<Vec<Breed>> for BreedSearchResultDTO {
    fn from(breeds: Vec<Breed>) -> Self {
        if breeds.is_empty() {
            Self::Empty {
                message: NO_BREEDS_FOUND,
            }
        } else {
            Self::Matches(breeds)
        }
    }
}
