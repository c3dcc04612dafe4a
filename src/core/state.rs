//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository costruiti dal connection pool all'avvio
//! e condivisi tra tutte le route.

use crate::repositories::BreedRepository;
use sqlx::MySqlPool;

/// Stato globale dell'applicazione condiviso tra tutte le route
pub struct AppState {
    /// Repository per la gestione delle razze (tabella `breeds`)
    pub breeds: BreedRepository,
}

impl AppState {
    /// Crea lo stato collegando ogni repository al pool
    ///
    /// # Arguments
    /// * `pool` - Connection pool MySQL
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            breeds: BreedRepository::new(pool),
        }
    }
}
