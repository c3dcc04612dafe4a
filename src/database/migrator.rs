//! Migrator - Applies or reverts the embedded schema migrations
//!
//! Migrations live in `./migrations` as reversible `.up.sql` / `.down.sql`
//! pairs and are embedded at compile time. Applied versions are tracked by
//! sqlx in `_sqlx_migrations`, so re-running an already applied direction is
//! a no-op.

use sqlx::MySqlPool;
use sqlx::migrate::{Migrate, MigrateError, Migration, Migrator};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("error unknown migration type: {0}")]
    UnknownDirection(String),

    #[error("error while running {direction} migration(s): {source}")]
    Run {
        direction: MigrationDirection,
        #[source]
        source: MigrateError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationDirection {
    Up,
    Down,
}

impl FromStr for MigrationDirection {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(MigrationError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for MigrationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Result of a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Nothing was pending in the requested direction
    NoChange,
    /// `steps` is the number of migrations run, 0 meaning "all"
    Applied {
        direction: MigrationDirection,
        steps: u32,
    },
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChange => f.write_str("Migration(s) : no change"),
            Self::Applied { direction, steps: 0 } => {
                write!(f, "Successfully ran all {} migrations", direction)
            }
            Self::Applied { direction, steps: 1 } => {
                write!(f, "Successfully ran 1 {} migration", direction)
            }
            Self::Applied { direction, steps } => {
                write!(f, "Successfully ran {} {} migrations", steps, direction)
            }
        }
    }
}

/// Runs the embedded migrations in `direction`.
///
/// `steps == 0` runs every migration that applies; otherwise at most `steps`
/// migrations are applied (up) or reverted, newest first (down).
pub async fn run_migrations(
    pool: &MySqlPool,
    direction: MigrationDirection,
    steps: u32,
) -> Result<MigrationOutcome, MigrationError> {
    run_with(&MIGRATOR, pool, direction, steps)
        .await
        .map_err(|source| MigrationError::Run { direction, source })
}

#[instrument(skip(migrator, pool))]
async fn run_with(
    migrator: &Migrator,
    pool: &MySqlPool,
    direction: MigrationDirection,
    steps: u32,
) -> Result<MigrationOutcome, MigrateError> {
    let limit = match steps {
        0 => usize::MAX,
        n => n as usize,
    };

    let mut conn = pool.acquire().await?;
    conn.lock().await?;

    let ran = match run_locked(migrator, &mut *conn, direction, limit).await {
        Ok(ran) => ran,
        Err(e) => {
            conn.unlock().await?;
            return Err(e);
        }
    };
    conn.unlock().await?;

    if ran == 0 {
        info!("No {} migration to run", direction);
        Ok(MigrationOutcome::NoChange)
    } else {
        info!("Ran {} {} migration(s)", ran, direction);
        // a step count larger than what was pending reports what actually ran
        let steps = match steps {
            0 => 0,
            _ => ran as u32,
        };
        Ok(MigrationOutcome::Applied { direction, steps })
    }
}

async fn run_locked<C: Migrate>(
    migrator: &Migrator,
    conn: &mut C,
    direction: MigrationDirection,
    limit: usize,
) -> Result<usize, MigrateError> {
    conn.ensure_migrations_table().await?;
    if let Some(version) = conn.dirty_version().await? {
        return Err(MigrateError::Dirty(version));
    }

    let applied = conn.list_applied_migrations().await?;
    let mut ran = 0;

    match direction {
        MigrationDirection::Up => {
            let applied: HashSet<i64> = applied.iter().map(|m| m.version).collect();
            let pending = migrator
                .iter()
                .filter(|m| !m.migration_type.is_down_migration())
                .filter(|m| !applied.contains(&m.version));

            for migration in pending.take(limit) {
                debug!("Applying migration {} {}", migration.version, migration.description);
                conn.apply(migration).await?;
                ran += 1;
            }
        }
        MigrationDirection::Down => {
            let reversible: HashMap<i64, &Migration> = migrator
                .iter()
                .filter(|m| m.migration_type.is_down_migration())
                .map(|m| (m.version, m))
                .collect();

            let mut versions: Vec<i64> = applied.iter().map(|m| m.version).collect();
            versions.sort_unstable_by(|a, b| b.cmp(a));

            for version in versions.into_iter().take(limit) {
                let migration = reversible
                    .get(&version)
                    .ok_or(MigrateError::VersionMissing(version))?;
                debug!("Reverting migration {} {}", migration.version, migration.description);
                conn.revert(migration).await?;
                ran += 1;
            }
        }
    }

    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::MySqlPool;

    #[test]
    fn direction_parses_known_values_only() {
        assert_eq!("up".parse::<MigrationDirection>().unwrap(), MigrationDirection::Up);
        assert_eq!("down".parse::<MigrationDirection>().unwrap(), MigrationDirection::Down);

        let err = "sideways".parse::<MigrationDirection>().unwrap_err();
        assert_eq!(err.to_string(), "error unknown migration type: sideways");
    }

    #[test]
    fn outcome_messages() {
        let all = MigrationOutcome::Applied {
            direction: MigrationDirection::Up,
            steps: 0,
        };
        let one = MigrationOutcome::Applied {
            direction: MigrationDirection::Down,
            steps: 1,
        };
        let many = MigrationOutcome::Applied {
            direction: MigrationDirection::Up,
            steps: 3,
        };
        assert_eq!(all.to_string(), "Successfully ran all up migrations");
        assert_eq!(one.to_string(), "Successfully ran 1 down migration");
        assert_eq!(many.to_string(), "Successfully ran 3 up migrations");
        assert_eq!(MigrationOutcome::NoChange.to_string(), "Migration(s) : no change");
    }

    #[test]
    fn embedded_migrations_are_reversible() {
        let ups = MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .count();
        let downs = MIGRATOR
            .iter()
            .filter(|m| m.migration_type.is_down_migration())
            .count();
        assert_eq!(ups, 2);
        assert_eq!(ups, downs);
    }

    async fn table_exists(pool: &MySqlPool) -> sqlx::Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = 'breeds'",
        )
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    // `migrations = false` leaves the test database empty so the runner starts from scratch
    #[sqlx::test(migrations = false)]
    async fn test_up_then_no_change(pool: MySqlPool) -> sqlx::Result<()> {
        let outcome = run_migrations(&pool, MigrationDirection::Up, 0).await.unwrap();
        assert_eq!(outcome.to_string(), "Successfully ran all up migrations");
        assert!(table_exists(&pool).await?);

        let again = run_migrations(&pool, MigrationDirection::Up, 0).await.unwrap();
        assert_eq!(again, MigrationOutcome::NoChange);
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_steps_up_and_down(pool: MySqlPool) -> sqlx::Result<()> {
        let first = run_migrations(&pool, MigrationDirection::Up, 1).await.unwrap();
        assert_eq!(first.to_string(), "Successfully ran 1 up migration");
        assert!(table_exists(&pool).await?);

        let capped = run_migrations(&pool, MigrationDirection::Up, 5).await.unwrap();
        assert_eq!(capped.to_string(), "Successfully ran 1 up migration");

        // the newest migration only drops the index, the table survives
        run_migrations(&pool, MigrationDirection::Down, 1).await.unwrap();
        assert!(table_exists(&pool).await?);

        let rest = run_migrations(&pool, MigrationDirection::Down, 0).await.unwrap();
        assert_eq!(rest.to_string(), "Successfully ran all down migrations");
        assert!(!table_exists(&pool).await?);

        let nothing = run_migrations(&pool, MigrationDirection::Down, 0).await.unwrap();
        assert_eq!(nothing, MigrationOutcome::NoChange);
        Ok(())
    }
}
