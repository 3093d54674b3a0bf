//! Outlier filtering and Pearson correlation matrix computation

use anyhow::{Context, Result};
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

/// Lower bound of the central 95% band used by the outlier filter.
pub const LOWER_PERCENTILE: f64 = 0.025;
/// Upper bound of the central 95% band used by the outlier filter.
pub const UPPER_PERCENTILE: f64 = 0.975;

/// Pairwise Pearson correlation matrix over the numeric columns of a table.
///
/// Symmetric with a 1.0 diagonal; entries involving a constant (or all-null)
/// column are NaN.
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Mat<f64>,
}

impl CorrelationMatrix {
    /// Names of the columns, in matrix row/column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (equivalently columns) of the matrix.
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Correlation coefficient between columns `i` and `j`.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }
}

/// Drop rows with inconsistent blood pressure or out-of-band body measurements.
///
/// Keeps rows where `ap_lo <= ap_hi` and both `height` and `weight` fall
/// within the central 95% of their distributions. The percentile bounds are
/// computed from the full, unfiltered columns.
pub fn filter_outliers(df: &DataFrame) -> Result<DataFrame> {
    let (height_lo, height_hi) = percentile_bounds(df, "height")?;
    let (weight_lo, weight_hi) = percentile_bounds(df, "weight")?;

    df.clone()
        .lazy()
        .filter(
            col("ap_lo")
                .lt_eq(col("ap_hi"))
                .and(col("height").cast(DataType::Float64).gt_eq(lit(height_lo)))
                .and(col("height").cast(DataType::Float64).lt_eq(lit(height_hi)))
                .and(col("weight").cast(DataType::Float64).gt_eq(lit(weight_lo)))
                .and(col("weight").cast(DataType::Float64).lt_eq(lit(weight_hi))),
        )
        .collect()
        .context("Failed to filter outlier rows")
}

/// 2.5th and 97.5th percentile of a column, linearly interpolated.
///
/// An empty or all-null column yields infinite bounds, which keep every row.
fn percentile_bounds(df: &DataFrame, column: &str) -> Result<(f64, f64)> {
    let values = df
        .column(column)
        .with_context(|| format!("Column '{}' not found for percentile filter", column))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", column))?;
    let ca = values.f64()?;

    let lo = ca
        .quantile(LOWER_PERCENTILE, QuantileMethod::Linear)?
        .unwrap_or(f64::NEG_INFINITY);
    let hi = ca
        .quantile(UPPER_PERCENTILE, QuantileMethod::Linear)?
        .unwrap_or(f64::INFINITY);

    Ok((lo, hi))
}

/// Threshold for auto-selecting matrix vs pairwise correlation computation.
/// Matrix multiplication is more efficient when there are many columns.
const MATRIX_METHOD_COLUMN_THRESHOLD: usize = 15;

/// Compute the correlation matrix using an auto-selected method.
///
/// Uses the faer matrix product when there are many columns and the
/// pairwise Welford pass otherwise; both produce the same coefficients.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let num_cols = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .count();

    if num_cols >= MATRIX_METHOD_COLUMN_THRESHOLD {
        correlation_matrix_fast(df)
    } else {
        correlation_matrix_pairwise(df)
    }
}

/// Compute the correlation matrix one column pair at a time.
///
/// Pairs are processed in parallel with a single-pass Welford kernel per
/// pair. Preferred for tables with few columns where the matrix-product
/// method's setup cost dominates.
pub fn correlation_matrix_pairwise(df: &DataFrame) -> Result<CorrelationMatrix> {
    let float_columns = numeric_float_columns(df)?;
    let n = float_columns.len();

    // Upper triangle only; the matrix is filled symmetrically below.
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let computed: Vec<((usize, usize), f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = compute_pearson_correlation(&float_columns[i].1, &float_columns[j].1)
                .unwrap_or(f64::NAN);
            ((i, j), r)
        })
        .collect();

    let mut values = Mat::<f64>::zeros(n, n);
    for (idx, (_, column)) in float_columns.iter().enumerate() {
        values[(idx, idx)] = if column_std(column).is_some() {
            1.0
        } else {
            f64::NAN
        };
    }
    for ((i, j), r) in computed {
        values[(i, j)] = r;
        values[(j, i)] = r;
    }

    let columns = float_columns.into_iter().map(|(name, _)| name).collect();
    Ok(CorrelationMatrix { columns, values })
}

/// Compute the correlation matrix via a standardized matrix product.
///
/// Algorithm:
/// 1. Standardize each column: z = (x - mean) / std, scaled by 1/sqrt(n)
/// 2. Compute R = Z^T * Z
///
/// Columns are standardized in parallel; constant or all-null columns
/// become NaN rows/columns of the result.
pub fn correlation_matrix_fast(df: &DataFrame) -> Result<CorrelationMatrix> {
    let float_columns = numeric_float_columns(df)?;
    let n_cols = float_columns.len();

    if n_cols == 0 {
        anyhow::bail!("No numeric columns available for correlation");
    }

    let n_rows = float_columns[0].1.len();
    if n_rows == 0 {
        anyhow::bail!("Cannot compute correlations over an empty table");
    }

    let standardized: Vec<Vec<f64>> = float_columns
        .par_iter()
        .map(|(_, column)| standardize_column(column, n_rows))
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, col_data) in standardized.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let mut values = z.transpose() * &z;

    // Pin the diagonal: 1.0 exactly for non-constant columns, NaN otherwise,
    // regardless of floating point drift in the product.
    for (idx, col_data) in standardized.iter().enumerate() {
        values[(idx, idx)] = if col_data.iter().all(|v| v.is_nan()) {
            f64::NAN
        } else {
            1.0
        };
    }

    let columns = float_columns.into_iter().map(|(name, _)| name).collect();
    Ok(CorrelationMatrix { columns, values })
}

/// Standardize one column for the matrix product: (x - mean) / std,
/// scaled by 1/sqrt(valid count). Nulls contribute 0; a constant or
/// all-null column becomes all NaN.
fn standardize_column(column: &Column, n_rows: usize) -> Vec<f64> {
    let Ok(ca) = column.f64() else {
        return vec![f64::NAN; n_rows];
    };

    let mut sum = 0.0;
    let mut count = 0usize;
    for val in ca.iter().flatten() {
        sum += val;
        count += 1;
    }
    if count == 0 {
        return vec![f64::NAN; n_rows];
    }
    let mean = sum / count as f64;

    let mut sum_sq_dev = 0.0;
    for val in ca.iter().flatten() {
        let dev = val - mean;
        sum_sq_dev += dev * dev;
    }
    let std = (sum_sq_dev / count as f64).sqrt();
    if std == 0.0 {
        return vec![f64::NAN; n_rows];
    }

    let scale = 1.0 / (count as f64).sqrt();
    ca.iter()
        .map(|val| match val {
            Some(x) => scale * (x - mean) / std,
            None => 0.0,
        })
        .collect()
}

/// Compute Pearson correlation between two columns using Welford's algorithm.
///
/// Single-pass for numerical stability. Rows where either side is null are
/// skipped. Returns None when either column has zero variance.
fn compute_pearson_correlation(s1: &Column, s2: &Column) -> Option<f64> {
    let ca1 = s1.f64().ok()?;
    let ca2 = s2.f64().ok()?;

    let n = ca1.len();
    if n == 0 || n != ca2.len() {
        return None;
    }

    let mut count = 0.0f64;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in ca1.iter().zip(ca2.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            count += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / count;
            mean_y += dy / count;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if count < 2.0 {
        return None;
    }

    let std_x = (var_x / count).sqrt();
    let std_y = (var_y / count).sqrt();

    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (count * std_x * std_y))
}

/// Population standard deviation of a column over its non-null values.
/// None when the column is constant or has no values.
fn column_std(column: &Column) -> Option<f64> {
    let ca = column.f64().ok()?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for val in ca.iter().flatten() {
        sum += val;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;

    let mut sum_sq_dev = 0.0;
    for val in ca.iter().flatten() {
        let dev = val - mean;
        sum_sq_dev += dev * dev;
    }

    let std = (sum_sq_dev / count as f64).sqrt();
    if std == 0.0 {
        None
    } else {
        Some(std)
    }
}

/// All primitive numeric columns of the table, cast to Float64.
fn numeric_float_columns(df: &DataFrame) -> Result<Vec<(String, Column)>> {
    let float_columns: Vec<(String, Column)> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .filter_map(|col| {
            col.cast(&DataType::Float64)
                .ok()
                .map(|cast| (col.name().to_string(), cast))
        })
        .collect();

    Ok(float_columns)
}
