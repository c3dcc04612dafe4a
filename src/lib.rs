//! Breed service library - espone i moduli principali per il binario e per i test

pub mod core;
pub mod database;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config};

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::health;

    Router::new()
        .route("/health", get(health))
        .nest("/v1", configure_v1_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configura le routes versionate (/v1)
fn configure_v1_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/breeds", configure_breed_routes())
}

/// Configura le routes delle razze (CRUD e ricerca)
fn configure_breed_routes() -> Router<Arc<AppState>> {
    use services::*;

    // "/search" e' un segmento statico e ha precedenza su "/{id}"
    Router::new()
        .route("/", get(list_breeds).post(create_breed))
        .route("/search", get(search_breeds))
        .route(
            "/{id}",
            get(get_breed).put(update_breed).delete(delete_breed),
        )
}
