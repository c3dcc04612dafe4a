//! Services module - HTTP handlers
//!
//! Each sub-module serves the endpoints of one resource.

pub mod breed;

pub use breed::{
    create_breed, delete_breed, get_breed, list_breeds, search_breeds, update_breed,
};

use axum::http::StatusCode;

/// Liveness probe, empty body
pub async fn health() -> StatusCode {
    StatusCode::OK
}
