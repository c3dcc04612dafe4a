//! Seeder - Bulk loads breeds from a CSV file
//!
//! The file has a header row followed by six columns:
//! `id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight`.
//! Rows are inserted with `INSERT IGNORE`, so a row whose id already exists is
//! left untouched and seeding can run on every start.

use crate::entities::Breed;
use csv::{ReaderBuilder, StringRecord, Trim};
use sqlx::MySqlPool;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument, warn};

const COLUMNS: usize = 6;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("error opening CSV file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading CSV file: {0}")]
    Read(#[from] csv::Error),
}

/// Counters of a seeding run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: u64,
    /// Rows whose id was already present
    pub skipped: u64,
    /// Malformed rows and rows the database refused
    pub failed: u64,
}

#[derive(Error, Debug, PartialEq, Eq)]
enum RecordError {
    #[error("expected 6 columns, found {0}")]
    ColumnCount(usize),
    #[error("column {column} is not an integer: {value:?}")]
    NotAnInteger { column: &'static str, value: String },
}

fn int_column(record: &StringRecord, index: usize, column: &'static str) -> Result<i32, RecordError> {
    let value = &record[index];
    value.parse::<i32>().map_err(|_| RecordError::NotAnInteger {
        column,
        value: value.to_string(),
    })
}

fn parse_record(record: &StringRecord) -> Result<Breed, RecordError> {
    if record.len() != COLUMNS {
        return Err(RecordError::ColumnCount(record.len()));
    }

    Ok(Breed {
        id: int_column(record, 0, "id")?,
        species: record[1].to_string(),
        pet_size: record[2].to_string(),
        name: record[3].to_string(),
        average_male_adult_weight: int_column(record, 4, "average_male_adult_weight")?,
        average_female_adult_weight: int_column(record, 5, "average_female_adult_weight")?,
    })
}

/// Seeds the breeds table from the CSV file at `path`
pub async fn seed_from_csv(pool: &MySqlPool, path: impl AsRef<Path>) -> Result<SeedReport, SeedError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SeedError::Open {
        path: path.display().to_string(),
        source,
    })?;
    seed_from_reader(pool, file).await
}

/// Seeds the breeds table from any CSV source.
///
/// Per-row failures are logged and counted, they never abort the run.
#[instrument(skip_all)]
pub async fn seed_from_reader<R: Read>(pool: &MySqlPool, source: R) -> Result<SeedReport, SeedError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    // the whole file is parsed before touching the database
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    let mut report = SeedReport::default();

    for (index, record) in records.iter().enumerate() {
        // +2: one for the header, one because lines are 1-based
        let line = index + 2;
        let breed = match parse_record(record) {
            Ok(breed) => breed,
            Err(e) => {
                warn!("Skipping CSV line {}: {}", line, e);
                report.failed += 1;
                continue;
            }
        };

        let result = sqlx::query(
            r#"
            INSERT IGNORE INTO breeds (id, species, pet_size, name, average_male_adult_weight, average_female_adult_weight)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(breed.id)
        .bind(&breed.species)
        .bind(&breed.pet_size)
        .bind(&breed.name)
        .bind(breed.average_male_adult_weight)
        .bind(breed.average_female_adult_weight)
        .execute(pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => report.skipped += 1,
            Ok(_) => report.inserted += 1,
            Err(e) => {
                warn!("Error inserting CSV line {}: {}", line, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Seeding done: {} inserted, {} already present, {} failed",
        report.inserted, report.skipped, report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{BreedRepository, ReadAll};
    use sqlx::MySqlPool;

    const SAMPLE: &str = "\
id,species,pet_size,name,average_male_adult_weight,average_female_adult_weight
1,dog,large,Labrador Retriever,32,29
2,cat,small,Singapura,3,2
3,dog,medium,Beagle,11,10
";

    #[test]
    fn parse_record_reads_six_columns() {
        let record = StringRecord::from(vec!["4", "cat", "medium", "Maine Coon", "8", "5"]);
        let breed = parse_record(&record).unwrap();
        assert_eq!(breed.id, 4);
        assert_eq!(breed.name, "Maine Coon");
        assert_eq!(breed.average_male_adult_weight, 8);
        assert_eq!(breed.average_female_adult_weight, 5);
    }

    #[test]
    fn parse_record_rejects_bad_rows() {
        let short = StringRecord::from(vec!["4", "cat"]);
        assert_eq!(parse_record(&short), Err(RecordError::ColumnCount(2)));

        let bad_weight = StringRecord::from(vec!["4", "cat", "medium", "Maine Coon", "heavy", "5"]);
        assert!(matches!(
            parse_record(&bad_weight),
            Err(RecordError::NotAnInteger { column: "average_male_adult_weight", .. })
        ));
    }

    #[sqlx::test]
    async fn test_seed_skips_header_and_is_idempotent(pool: MySqlPool) -> sqlx::Result<()> {
        let first = seed_from_reader(&pool, SAMPLE.as_bytes()).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                inserted: 3,
                skipped: 0,
                failed: 0
            }
        );

        let second = seed_from_reader(&pool, SAMPLE.as_bytes()).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 3);

        let breeds = BreedRepository::new(pool).read_all().await.unwrap();
        assert_eq!(breeds.len(), 3);
        assert!(breeds.iter().all(|b| b.species != "species"));
        Ok(())
    }

    #[sqlx::test]
    async fn test_seed_counts_bad_rows_and_continues(pool: MySqlPool) -> sqlx::Result<()> {
        let csv = "\
id,species,pet_size,name,average_male_adult_weight,average_female_adult_weight
1,dog,large,Labrador Retriever,32,29
two,dog,small,Chihuahua,2,2
3,dog,medium
4,cat,medium,Maine Coon,8,5
";
        let report = seed_from_reader(&pool, csv.as_bytes()).await.unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.failed, 2);
        Ok(())
    }

    #[sqlx::test]
    async fn test_missing_file_is_an_error(pool: MySqlPool) -> sqlx::Result<()> {
        let err = seed_from_csv(&pool, "./does-not-exist.csv").await.unwrap_err();
        assert!(matches!(err, SeedError::Open { .. }));
        Ok(())
    }

    #[sqlx::test]
    async fn test_bundled_seed_file_loads(pool: MySqlPool) -> sqlx::Result<()> {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/breeds.csv");
        let report = seed_from_csv(&pool, path).await.unwrap();
        assert_eq!(report.failed, 0);
        assert!(report.inserted > 0);
        Ok(())
    }
}
