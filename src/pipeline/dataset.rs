//! Patient record table construction: synthetic generation and CSV import

use anyhow::{Context, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use thiserror::Error;

/// Columns every examination dataset must carry before derivation.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "id",
    "age",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "cardio",
];

/// Schema validation failures for imported datasets
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("required column '{0}' is missing from the dataset")]
    MissingColumn(String),

    #[error("dataset contains no rows")]
    EmptyTable,
}

/// Generate a synthetic examination dataset.
///
/// Each column is drawn uniformly from a fixed range: age in days for
/// subjects between 29 and 65 years, height 150-199 cm, weight 50-119 kg,
/// systolic pressure 100-179, diastolic 60-119, cholesterol and glucose
/// as ordinals 1-3, and the four lifestyle/outcome flags as 0/1.
/// `id` is sequential starting at 1.
///
/// A fixed `seed` reproduces the identical table; `None` seeds from entropy.
pub fn generate_dataset(rows: usize, seed: Option<u64>) -> Result<DataFrame> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let id: Vec<i32> = (1..=rows as i32).collect();
    let age: Vec<i32> = (0..rows).map(|_| rng.gen_range(29 * 365..65 * 365)).collect();
    let height: Vec<i32> = (0..rows).map(|_| rng.gen_range(150..200)).collect();
    let weight: Vec<i32> = (0..rows).map(|_| rng.gen_range(50..120)).collect();
    let ap_hi: Vec<i32> = (0..rows).map(|_| rng.gen_range(100..180)).collect();
    let ap_lo: Vec<i32> = (0..rows).map(|_| rng.gen_range(60..120)).collect();
    let cholesterol: Vec<i32> = (0..rows).map(|_| rng.gen_range(1..4)).collect();
    let gluc: Vec<i32> = (0..rows).map(|_| rng.gen_range(1..4)).collect();
    let smoke: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let alco: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let active: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let cardio: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();

    let df = DataFrame::new(vec![
        Column::new("id".into(), id),
        Column::new("age".into(), age),
        Column::new("height".into(), height),
        Column::new("weight".into(), weight),
        Column::new("ap_hi".into(), ap_hi),
        Column::new("ap_lo".into(), ap_lo),
        Column::new("cholesterol".into(), cholesterol),
        Column::new("gluc".into(), gluc),
        Column::new("smoke".into(), smoke),
        Column::new("alco".into(), alco),
        Column::new("active".into(), active),
        Column::new("cardio".into(), cardio),
    ])
    .context("Failed to assemble synthetic dataset")?;

    Ok(df)
}

/// Load an examination dataset from a CSV file and validate its schema.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    validate_schema(&df)?;

    Ok(df)
}

/// Check that all required columns are present and the table is non-empty.
pub fn validate_schema(df: &DataFrame) -> Result<(), SchemaError> {
    if df.height() == 0 {
        return Err(SchemaError::EmptyTable);
    }

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == required) {
            return Err(SchemaError::MissingColumn(required.to_string()));
        }
    }

    Ok(())
}
