//! Medviz: Medical Data Visualizer CLI
//!
//! Generates a faceted categorical bar chart and a masked correlation
//! heatmap from cardiovascular examination records, and exports the
//! processed table as CSV.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use polars::prelude::ChunkAgg;

use cli::Cli;
use pipeline::{
    correlation_matrix, count_categories, derive_indicators, extract_counts, filter_outliers,
    generate_dataset, load_dataset, melt_lifestyle,
};
use report::{render_catplot, render_heatmap, RunSummary};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if !quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(
            &cli.output_dir,
            cli.rows,
            cli.seed,
            cli.input.as_deref(),
        );
    }

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            cli.output_dir.display()
        )
    })?;

    // Step 1: Build the patient record table
    if !quiet {
        print_step_header(1, "Dataset");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Preparing dataset...", quiet);
    let df = match &cli.input {
        Some(path) => load_dataset(path)?,
        None => generate_dataset(cli.rows, cli.seed)?,
    };
    finish_with_success(&spinner, "Dataset ready");

    let (rows, cols) = df.shape();
    let mut summary = RunSummary::new(rows);
    if !quiet {
        print_count("record(s)", rows, Some(&format!("across {} columns", cols)));
    }
    let dataset_elapsed = step_start.elapsed();
    summary.set_dataset_time(dataset_elapsed);
    if !quiet {
        print_step_time(dataset_elapsed);
    }

    // Step 2: Derive indicator columns
    if !quiet {
        print_step_header(2, "Derived Indicators");
    }
    let step_start = Instant::now();
    let df = derive_indicators(df)?;
    let overweight_count = df
        .column("overweight")?
        .i32()?
        .sum()
        .unwrap_or(0)
        .max(0) as usize;
    summary.set_overweight_count(overweight_count);
    if !quiet {
        print_success("Added overweight flag, binarized cholesterol and glucose");
        print_count("overweight subject(s)", overweight_count, Some("(BMI > 25)"));
    }
    let derive_elapsed = step_start.elapsed();
    summary.set_derive_time(derive_elapsed);
    if !quiet {
        print_step_time(derive_elapsed);
    }

    // Step 3: Categorical chart
    if !quiet {
        print_step_header(3, "Categorical Chart");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Counting lifestyle indicators...", quiet);
    let long = melt_lifestyle(&df)?;
    let counts = count_categories(&long)?;
    let records = extract_counts(&counts)?;
    finish_with_success(&spinner, "Lifestyle indicators counted");

    let catplot_path = cli.catplot_path();
    render_catplot(&records, &catplot_path)?;
    summary.add_written(catplot_path.clone());
    if !quiet {
        print_success(&format!("Saved {}", catplot_path.display()));
    }
    let catplot_elapsed = step_start.elapsed();
    summary.set_catplot_time(catplot_elapsed);
    if !quiet {
        print_step_time(catplot_elapsed);
    }

    // Step 4: Correlation heatmap
    if !quiet {
        print_step_header(4, "Correlation Heatmap");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Filtering outliers...", quiet);
    let filtered = filter_outliers(&df)?;
    finish_with_success(&spinner, "Outliers filtered");

    if filtered.height() == 0 {
        anyhow::bail!("All rows were removed by the outlier filter; cannot compute correlations");
    }

    let excluded = rows.saturating_sub(filtered.height());
    summary.set_filtered_rows(filtered.height());
    if !quiet {
        if excluded == 0 {
            print_info("No outlier rows detected");
        } else {
            print_count(
                "outlier row(s) excluded",
                excluded,
                Some("(bp consistency + 2.5-97.5 percentile bounds)"),
            );
        }
    }

    let matrix = correlation_matrix(&filtered)?;
    let heatmap_path = cli.heatmap_path();
    render_heatmap(&matrix, &heatmap_path)?;
    summary.add_written(heatmap_path.clone());
    if !quiet {
        print_success(&format!("Saved {}", heatmap_path.display()));
    }
    let heatmap_elapsed = step_start.elapsed();
    summary.set_heatmap_time(heatmap_elapsed);
    if !quiet {
        print_step_time(heatmap_elapsed);
    }

    // Step 5: CSV export
    if !quiet {
        print_step_header(5, "Export");
    }
    let step_start = Instant::now();
    let csv_path = cli.csv_path();
    let mut df = df;
    save_dataset(&mut df, &csv_path)?;
    summary.add_written(csv_path.clone());
    if !quiet {
        print_success(&format!("Saved {}", csv_path.display()));
    }
    let export_elapsed = step_start.elapsed();
    summary.set_export_time(export_elapsed);
    if !quiet {
        print_step_time(export_elapsed);
    }

    if !quiet {
        summary.display();
        print_completion();
    }

    Ok(())
}

/// Save the processed table as CSV with a header row and no index column.
fn save_dataset(df: &mut polars::prelude::DataFrame, path: &std::path::Path) -> Result<()> {
    use polars::prelude::*;

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(())
}
