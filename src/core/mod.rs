//! Core Module - Infrastruttura dell'applicazione
//!
//! - Configurazione
//! - Gestione degli errori
//! - Stato condiviso

pub mod config;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
