//! Unit tests for synthetic dataset generation and CSV import

use medviz::pipeline::{generate_dataset, load_dataset, validate_schema, SchemaError, REQUIRED_COLUMNS};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_generated_shape_and_columns() {
    let df = generate_dataset(100, Some(7)).unwrap();

    assert_eq!(df.height(), 100, "Should generate exactly 100 rows");
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        names,
        REQUIRED_COLUMNS.to_vec(),
        "Generated columns should match the required schema in order"
    );
}

#[test]
fn test_generated_ids_sequential() {
    let df = generate_dataset(50, Some(1)).unwrap();
    let ids = df.column("id").unwrap().i32().unwrap();

    for (idx, id) in ids.into_iter().enumerate() {
        assert_eq!(
            id,
            Some(idx as i32 + 1),
            "id should be sequential starting at 1"
        );
    }
}

#[test]
fn test_generated_value_ranges() {
    let df = generate_dataset(500, Some(99)).unwrap();

    let in_range = |name: &str, lo: i32, hi: i32| {
        let ca = df.column(name).unwrap().i32().unwrap();
        for val in ca.into_iter().flatten() {
            assert!(
                val >= lo && val < hi,
                "{} value {} outside [{}, {})",
                name,
                val,
                lo,
                hi
            );
        }
    };

    in_range("age", 29 * 365, 65 * 365);
    in_range("height", 150, 200);
    in_range("weight", 50, 120);
    in_range("ap_hi", 100, 180);
    in_range("ap_lo", 60, 120);
    in_range("cholesterol", 1, 4);
    in_range("gluc", 1, 4);
    in_range("smoke", 0, 2);
    in_range("alco", 0, 2);
    in_range("active", 0, 2);
    in_range("cardio", 0, 2);
}

#[test]
fn test_fixed_seed_reproduces_table() {
    let a = generate_dataset(100, Some(42)).unwrap();
    let b = generate_dataset(100, Some(42)).unwrap();

    assert!(a.equals(&b), "Same seed should reproduce the identical table");
}

#[test]
fn test_different_seeds_differ() {
    let a = generate_dataset(100, Some(1)).unwrap();
    let b = generate_dataset(100, Some(2)).unwrap();

    assert!(
        !a.equals(&b),
        "Different seeds should produce different tables"
    );
}

#[test]
fn test_validate_schema_accepts_generated() {
    let df = generate_dataset(10, Some(3)).unwrap();
    assert!(validate_schema(&df).is_ok());
}

#[test]
fn test_validate_schema_missing_column() {
    let df = generate_dataset(10, Some(3)).unwrap();
    let df = df.drop("cardio").unwrap();

    match validate_schema(&df) {
        Err(SchemaError::MissingColumn(name)) => {
            assert_eq!(name, "cardio", "Should name the missing column")
        }
        other => panic!("Expected MissingColumn error, got {:?}", other),
    }
}

#[test]
fn test_validate_schema_empty_table() {
    let df = DataFrame::empty();

    assert!(
        matches!(validate_schema(&df), Err(SchemaError::EmptyTable)),
        "Empty table should fail validation"
    );
}

#[test]
fn test_load_dataset_roundtrip() {
    let mut df = common::create_examination_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let loaded = load_dataset(&csv_path).unwrap();

    assert_eq!(loaded.height(), df.height());
    assert_eq!(
        loaded.get_column_names().len(),
        df.get_column_names().len()
    );
}

#[test]
fn test_load_dataset_missing_file() {
    let result = load_dataset(std::path::Path::new("/nonexistent/records.csv"));
    assert!(result.is_err(), "Loading a missing file should fail");
}

#[test]
fn test_load_dataset_rejects_wrong_schema() {
    let mut df = df! {
        "foo" => [1i32, 2, 3],
        "bar" => [4i32, 5, 6],
    }
    .unwrap();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let result = load_dataset(&csv_path);
    assert!(
        result.is_err(),
        "CSV without the examination schema should be rejected"
    );
}
