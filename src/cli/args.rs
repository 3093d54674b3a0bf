//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Medviz - Generate diagnostic charts from cardiovascular examination records
#[derive(Parser, Debug)]
#[command(name = "medviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file with examination records.
    /// If not provided, a synthetic dataset is generated instead.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory for the charts and the processed CSV.
    /// Created if it does not exist; existing files are overwritten.
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Number of synthetic records to generate.
    /// Ignored when --input is provided.
    #[arg(short, long, default_value = "100", value_parser = validate_rows)]
    pub rows: usize,

    /// Seed for the synthetic record generator.
    /// When omitted, the generator is entropy-seeded and outputs differ between runs.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress the banner, spinners and summary (file outputs only)
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Path of the categorical bar chart inside the output directory.
    pub fn catplot_path(&self) -> PathBuf {
        self.output_dir.join("catplot.png")
    }

    /// Path of the correlation heatmap inside the output directory.
    pub fn heatmap_path(&self) -> PathBuf {
        self.output_dir.join("heatmap.png")
    }

    /// Path of the processed CSV export inside the output directory.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join("processed_medical_data.csv")
    }
}

/// Validator for the rows parameter
fn validate_rows(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid row count", s))?;

    if value == 0 {
        Err("rows must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
