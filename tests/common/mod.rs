//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small examination table with known characteristics.
///
/// Row layout:
/// - rows 0-3: consistent blood pressure, unremarkable measurements
/// - row 4: `ap_lo > ap_hi` (must be excluded by the outlier filter)
/// - heights/weights chosen so BMI straddles the overweight boundary
#[allow(dead_code)]
pub fn create_examination_dataframe() -> DataFrame {
    df! {
        "id" => [1i32, 2, 3, 4, 5],
        "age" => [14000i32, 15000, 16000, 17000, 18000],
        "height" => [180i32, 160, 200, 170, 175],
        "weight" => [70i32, 90, 100, 50, 80],
        "ap_hi" => [120i32, 140, 130, 110, 100],
        "ap_lo" => [80i32, 90, 85, 70, 110], // last row inconsistent
        "cholesterol" => [1i32, 2, 3, 1, 2],
        "gluc" => [1i32, 1, 2, 3, 1],
        "smoke" => [0i32, 1, 0, 0, 1],
        "alco" => [0i32, 0, 1, 0, 0],
        "active" => [1i32, 1, 0, 1, 0],
        "cardio" => [0i32, 1, 1, 0, 1],
    }
    .unwrap()
}

/// Create a table that already carries the derived indicator columns,
/// for exercising the categorical stage in isolation.
#[allow(dead_code)]
pub fn create_processed_dataframe() -> DataFrame {
    df! {
        "cardio" => [0i32, 0, 1, 1],
        "cholesterol" => [0i32, 1, 0, 1],
        "gluc" => [0i32, 0, 1, 1],
        "smoke" => [1i32, 0, 0, 0],
        "alco" => [0i32, 0, 0, 1],
        "active" => [1i32, 1, 1, 0],
        "overweight" => [0i32, 1, 1, 1],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
#[allow(dead_code)]
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}
