//! Database module - Startup tasks run before serving traffic
//!
//! - Schema migrations (up / down, optionally a fixed number of steps)
//! - Seeding of the breeds table from a CSV file

pub mod migrator;
pub mod seeder;

pub use migrator::{MigrationDirection, MigrationError, MigrationOutcome, run_migrations};
pub use seeder::{SeedError, SeedReport, seed_from_csv, seed_from_reader};
