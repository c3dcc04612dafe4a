//! BreedRepository - Repository for the breeds table

use super::{Create, Delete, Read, ReadAll, StoreError, Update};
use crate::entities::Breed;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::{debug, info, instrument, warn};

/// Optional criteria of a breed search, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedFilter {
    /// Exact, case-sensitive match. Ignored when empty.
    pub species: Option<String>,
    /// Male OR female average weight >= value. Ignored unless > 0.
    pub min_weight: Option<i32>,
    /// Male OR female average weight <= value. Ignored unless > 0.
    pub max_weight: Option<i32>,
}

/// Parses the external (path) form of a breed identifier
pub fn parse_breed_id(raw: &str) -> Result<i32, StoreError> {
    raw.parse::<i32>()
        .map_err(|_| StoreError::InvalidId(raw.to_string()))
}

fn build_search_query(filter: &BreedFilter) -> QueryBuilder<'_, MySql> {
    let mut builder = QueryBuilder::new(
        "SELECT id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight \
         FROM breeds WHERE 1=1",
    );

    if let Some(species) = filter.species.as_deref().filter(|s| !s.is_empty()) {
        builder.push(" AND species COLLATE utf8mb4_bin = ").push_bind(species);
    }
    if let Some(min_weight) = filter.min_weight.filter(|w| *w > 0) {
        builder
            .push(" AND (average_male_adult_weight >= ")
            .push_bind(min_weight)
            .push(" OR average_female_adult_weight >= ")
            .push_bind(min_weight)
            .push(")");
    }
    if let Some(max_weight) = filter.max_weight.filter(|w| *w > 0) {
        builder
            .push(" AND (average_male_adult_weight <= ")
            .push_bind(max_weight)
            .push(" OR average_female_adult_weight <= ")
            .push_bind(max_weight)
            .push(")");
    }

    builder
}

// BREED REPOSITORY
pub struct BreedRepository {
    connection_pool: MySqlPool,
}

impl BreedRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Reads a breed by the external form of its identifier.
    /// Unparseable and unknown identifiers are distinct errors.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Breed, StoreError> {
        let id = parse_breed_id(raw_id)?;
        self.read(&id).await?.ok_or(StoreError::NotFound)
    }

    /// Overwrites every field of the breed stored under `raw_id`.
    /// Succeeds even if no such breed exists.
    #[instrument(skip(self, data))]
    pub async fn update_by_id(&self, raw_id: &str, data: &Breed) -> Result<Breed, StoreError> {
        let id = parse_breed_id(raw_id)?;
        self.update(&id, data).await
    }

    /// Deletes the breed stored under `raw_id`, if any
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, raw_id: &str) -> Result<(), StoreError> {
        let id = parse_breed_id(raw_id)?;
        self.delete(&id).await
    }

    /// Finds the breeds matching every criterion set in `filter`
    #[instrument(skip(self))]
    pub async fn search(&self, filter: &BreedFilter) -> Result<Vec<Breed>, StoreError> {
        let mut builder = build_search_query(filter);
        debug!("Search query: {}", builder.sql());

        let breeds = builder
            .build_query_as::<Breed>()
            .fetch_all(&self.connection_pool)
            .await?;

        info!("Search matched {} breeds", breeds.len());
        Ok(breeds)
    }
}

impl ReadAll<Breed> for BreedRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Breed>, StoreError> {
        debug!("Listing all breeds");
        let breeds = sqlx::query_as::<_, Breed>(
            r#"
            SELECT id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight
            FROM breeds
            "#,
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(breeds)
    }
}

impl Create<Breed, Breed> for BreedRepository {
    #[instrument(skip(self, data), fields(name = %data.name))]
    async fn create(&self, data: &Breed) -> Result<Breed, StoreError> {
        debug!("Creating new breed");
        let result = sqlx::query(
            r#"
            INSERT INTO breeds (species, pet_size, name, average_male_adult_weight, average_female_adult_weight)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.species)
        .bind(&data.pet_size)
        .bind(&data.name)
        .bind(data.average_male_adult_weight)
        .bind(data.average_female_adult_weight)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_id() as i32;
        info!("Breed created with id {}", new_id);

        Ok(data.clone().with_id(new_id))
    }
}

impl Read<Breed, i32> for BreedRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &i32) -> Result<Option<Breed>, StoreError> {
        let breed = sqlx::query_as::<_, Breed>(
            r#"
            SELECT id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight
            FROM breeds
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        if breed.is_none() {
            debug!("No breed with id {}", id);
        }

        Ok(breed)
    }
}

impl Update<Breed, Breed, i32> for BreedRepository {
    #[instrument(skip(self, data))]
    async fn update(&self, id: &i32, data: &Breed) -> Result<Breed, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE breeds
            SET species = ?, pet_size = ?, name = ?, average_male_adult_weight = ?, average_female_adult_weight = ?
            WHERE id = ?
            "#,
        )
        .bind(&data.species)
        .bind(&data.pet_size)
        .bind(&data.name)
        .bind(data.average_male_adult_weight)
        .bind(data.average_female_adult_weight)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        // A missing id is not reported to the caller, only logged.
        if result.rows_affected() == 0 {
            warn!("Update of breed {} changed no rows", id);
        } else {
            info!("Breed {} updated", id);
        }

        Ok(data.clone().with_id(*id))
    }
}

impl Delete<i32> for BreedRepository {
    #[instrument(skip(self))]
    async fn delete(&self, id: &i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM breeds WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!("Delete of breed {} removed no rows", id);
        } else {
            info!("Breed {} deleted", id);
        }

        Ok(())
    }
}
