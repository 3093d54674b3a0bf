//! Unit tests for the derived indicator columns

use medviz::pipeline::derive_indicators;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn indicator_values(df: &DataFrame, name: &str) -> Vec<i32> {
    df.column(name)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

#[test]
fn test_indicators_are_binary() {
    let df = derive_indicators(common::create_examination_dataframe()).unwrap();

    for name in ["overweight", "cholesterol", "gluc"] {
        for val in indicator_values(&df, name) {
            assert!(
                val == 0 || val == 1,
                "{} must be 0 or 1 after derivation, got {}",
                name,
                val
            );
        }
    }
}

#[test]
fn test_overweight_boundary() {
    // BMI exactly 25 (100kg at 200cm) must NOT count as overweight;
    // 101kg at 200cm (BMI 25.25) must.
    let df = df! {
        "height" => [200i32, 200, 150],
        "weight" => [100i32, 101, 40],
        "cholesterol" => [1i32, 1, 1],
        "gluc" => [1i32, 1, 1],
    }
    .unwrap();

    let df = derive_indicators(df).unwrap();
    let overweight = indicator_values(&df, "overweight");

    assert_eq!(overweight[0], 0, "BMI exactly 25 is not overweight");
    assert_eq!(overweight[1], 1, "BMI 25.25 is overweight");
    assert_eq!(overweight[2], 0, "BMI ~17.8 is not overweight");
}

#[test]
fn test_overweight_matches_bmi_formula() {
    let df = derive_indicators(common::create_examination_dataframe()).unwrap();

    let height = df.column("height").unwrap().i32().unwrap();
    let weight = df.column("weight").unwrap().i32().unwrap();
    let overweight = indicator_values(&df, "overweight");

    for idx in 0..df.height() {
        let h = height.get(idx).unwrap() as f64 / 100.0;
        let w = weight.get(idx).unwrap() as f64;
        let expected = if w / (h * h) > 25.0 { 1 } else { 0 };
        assert_eq!(
            overweight[idx], expected,
            "overweight flag should follow BMI > 25 for row {}",
            idx
        );
    }
}

#[test]
fn test_cholesterol_and_gluc_binarization() {
    let df = df! {
        "height" => [170i32, 170, 170],
        "weight" => [70i32, 70, 70],
        "cholesterol" => [1i32, 2, 3],
        "gluc" => [3i32, 1, 2],
    }
    .unwrap();

    let df = derive_indicators(df).unwrap();

    assert_eq!(
        indicator_values(&df, "cholesterol"),
        vec![0, 1, 1],
        "cholesterol 1 maps to 0; 2 and 3 map to 1"
    );
    assert_eq!(
        indicator_values(&df, "gluc"),
        vec![1, 0, 1],
        "gluc 1 maps to 0; 2 and 3 map to 1"
    );
}

#[test]
fn test_overweight_appended_last() {
    let df = derive_indicators(common::create_examination_dataframe()).unwrap();
    let names = df.get_column_names();

    assert_eq!(
        names.last().map(|s| s.as_str()),
        Some("overweight"),
        "overweight should be the last column"
    );
    assert_eq!(names.len(), 13, "Derivation adds exactly one column");
}

#[test]
fn test_zero_height_does_not_panic() {
    // Degenerate height produces an infinite BMI, which simply flags the row.
    let df = df! {
        "height" => [0i32, 170],
        "weight" => [70i32, 70],
        "cholesterol" => [1i32, 1],
        "gluc" => [1i32, 1],
    }
    .unwrap();

    let df = derive_indicators(df).unwrap();
    let overweight = indicator_values(&df, "overweight");

    assert_eq!(overweight[0], 1, "Infinite BMI counts as above the threshold");
    assert_eq!(overweight[1], 0);
}
