//! Store errors - Failures surfaced by the repositories

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The external form of an identifier is not a valid integer
    #[error("invalid breed ID: {0:?}")]
    InvalidId(String),

    #[error("breed not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
