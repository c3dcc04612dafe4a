//! Common repository traits
//!
//! This module defines generic interfaces for database operations.

use super::StoreError;

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - Data for creation (any ID it carries is ignored)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the database
    /// * `Err(StoreError)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, StoreError>;
}

/// Trait for reading a single entity by primary key
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(StoreError)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, StoreError>;
}

/// Trait for reading every entity of a table
pub trait ReadAll<Entity> {
    /// Reads all entities, in the order the database returns them
    ///
    /// # Returns
    /// * `Ok(Vec<Entity>)` - All entities (can be empty)
    /// * `Err(StoreError)` - Error during reading
    async fn read_all(&self) -> Result<Vec<Entity>, StoreError>;
}

/// Trait for updating existing entities
///
/// # Type Parameters
/// * `Entity` - Type of the updated entity
/// * `UpdateDTO` - Replacement data (every field is overwritten)
/// * `Id` - Type of the primary key
pub trait Update<Entity, UpdateDTO, Id> {
    /// Overwrites the entity stored under `id`
    ///
    /// # Returns
    /// * `Ok(Entity)` - Updated entity
    /// * `Err(StoreError)` - Error during update
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, StoreError>;
}

/// Trait for deleting entities
pub trait Delete<Id> {
    /// Deletes an entity from the database
    ///
    /// # Returns
    /// * `Ok(())` - Deletion executed
    /// * `Err(StoreError)` - Error during deletion
    async fn delete(&self, id: &Id) -> Result<(), StoreError>;
}
