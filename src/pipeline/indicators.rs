//! Derived indicator columns: overweight flag and ordinal binarization

use anyhow::{Context, Result};
use polars::prelude::*;

/// Add the `overweight` column and binarize `cholesterol` and `gluc`.
///
/// `overweight` is 1 when BMI (weight in kg over squared height in meters)
/// exceeds 25, else 0. `cholesterol` and `gluc` arrive as ordinals 1-3 and
/// leave as 0 (value 1, normal) or 1 (values 2-3, above normal).
///
/// The three indicator columns are Int32; all other columns and the column
/// order are preserved, with `overweight` appended last.
pub fn derive_indicators(df: DataFrame) -> Result<DataFrame> {
    let height_m = col("height").cast(DataType::Float64) / lit(100.0);
    let bmi = col("weight").cast(DataType::Float64) / (height_m.clone() * height_m);

    df.lazy()
        .with_columns([
            col("cholesterol")
                .gt(lit(1))
                .cast(DataType::Int32)
                .alias("cholesterol"),
            col("gluc").gt(lit(1)).cast(DataType::Int32).alias("gluc"),
            bmi.gt(lit(25.0)).cast(DataType::Int32).alias("overweight"),
        ])
        .collect()
        .context("Failed to derive indicator columns")
}
