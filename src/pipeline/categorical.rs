//! Long-form reshape and counting of the lifestyle indicator columns

use anyhow::{Context, Result};
use polars::prelude::*;

/// Lifestyle indicator columns shown on the categorical chart, in display order.
pub const LIFESTYLE_VARS: [&str; 6] = [
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "overweight",
];

/// One bar of the categorical chart: how many subjects with the given
/// `cardio` outcome have `value` for the given indicator `variable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub cardio: i32,
    pub variable: String,
    pub value: i32,
    pub total: u32,
}

/// Reshape the six lifestyle columns into long `(cardio, variable, value)` form.
///
/// The result has `6 * rows` rows, one per (subject, indicator) pair, with
/// the indicator name in `variable` and its 0/1 value in `value`.
pub fn melt_lifestyle(df: &DataFrame) -> Result<DataFrame> {
    let frames: Vec<LazyFrame> = LIFESTYLE_VARS
        .iter()
        .map(|var| {
            df.clone().lazy().select([
                col("cardio").cast(DataType::Int32),
                lit(*var).alias("variable"),
                col(*var).cast(DataType::Int32).alias("value"),
            ])
        })
        .collect();

    concat(frames, UnionArgs::default())
        .context("Failed to reshape lifestyle columns")?
        .collect()
        .context("Failed to collect long-form lifestyle table")
}

/// Count occurrences of each `(cardio, variable, value)` triple.
///
/// Output columns: cardio, variable, value, total. Sorted by the triple so
/// repeated runs produce the same row order.
pub fn count_categories(df_long: &DataFrame) -> Result<DataFrame> {
    df_long
        .clone()
        .lazy()
        .group_by([col("cardio"), col("variable"), col("value")])
        .agg([len().alias("total")])
        .sort(["cardio", "variable", "value"], SortMultipleOptions::default())
        .collect()
        .context("Failed to count category triples")
}

/// Pull the counted triples out of the DataFrame for the renderer.
pub fn extract_counts(counts: &DataFrame) -> Result<Vec<CategoryCount>> {
    let cardio = counts.column("cardio")?.i32()?;
    let variable = counts.column("variable")?.str()?;
    let value = counts.column("value")?.i32()?;
    let total = counts.column("total")?.u32()?;

    let mut out = Vec::with_capacity(counts.height());
    for idx in 0..counts.height() {
        let (Some(cardio), Some(variable), Some(value), Some(total)) = (
            cardio.get(idx),
            variable.get(idx),
            value.get(idx),
            total.get(idx),
        ) else {
            // Nulls cannot occur in a grouped count; skip rather than render a hole.
            continue;
        };

        out.push(CategoryCount {
            cardio,
            variable: variable.to_string(),
            value,
            total,
        });
    }

    Ok(out)
}
