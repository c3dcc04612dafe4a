//! Breed entity - The only entity persisted by the service

use serde::{Deserialize, Serialize};

/// A row of the `breeds` table.
///
/// Also the JSON shape exchanged with clients: fields missing from an incoming
/// body fall back to an empty string or zero, never to null.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
#[serde(default)]
pub struct Breed {
    /// Assigned by the database on insert, ignored on input
    pub id: i32,
    pub species: String,
    pub pet_size: String,
    pub name: String,
    pub average_male_adult_weight: i32,
    pub average_female_adult_weight: i32,
}

impl Breed {
    /// Same breed carrying a different identifier
    pub fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }
}
