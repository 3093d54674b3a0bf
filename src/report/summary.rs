//! Run summary report generation

use chrono::Local;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one visualization run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub overweight_count: usize,
    pub written: Vec<PathBuf>,
    dataset_time: Duration,
    derive_time: Duration,
    catplot_time: Duration,
    heatmap_time: Duration,
    export_time: Duration,
}

impl RunSummary {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            filtered_rows: total_rows,
            ..Default::default()
        }
    }

    pub fn set_filtered_rows(&mut self, rows: usize) {
        self.filtered_rows = rows;
    }

    pub fn set_overweight_count(&mut self, count: usize) {
        self.overweight_count = count;
    }

    pub fn add_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn set_dataset_time(&mut self, elapsed: Duration) {
        self.dataset_time = elapsed;
    }

    pub fn set_derive_time(&mut self, elapsed: Duration) {
        self.derive_time = elapsed;
    }

    pub fn set_catplot_time(&mut self, elapsed: Duration) {
        self.catplot_time = elapsed;
    }

    pub fn set_heatmap_time(&mut self, elapsed: Duration) {
        self.heatmap_time = elapsed;
    }

    pub fn set_export_time(&mut self, elapsed: Duration) {
        self.export_time = elapsed;
    }

    fn total_time(&self) -> Duration {
        self.dataset_time
            + self.derive_time
            + self.catplot_time
            + self.heatmap_time
            + self.export_time
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🩺 Records"),
            Cell::new(self.total_rows),
        ]);

        let outliers = self.total_rows.saturating_sub(self.filtered_rows);
        table.add_row(vec![
            Cell::new("🗑️  Outliers removed"),
            Cell::new(outliers).fg(if outliers == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        let overweight_pct = if self.total_rows > 0 {
            (self.overweight_count as f64 / self.total_rows as f64) * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new("⚖️  Overweight"),
            Cell::new(format!(
                "{} ({:.1}%)",
                self.overweight_count, overweight_pct
            )),
        ]);

        table.add_row(vec![
            Cell::new("💾 Files written"),
            Cell::new(self.written.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("⏱️  Total time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.written.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Outputs").yellow(),
                style(format!("({})", self.written.len())).dim()
            );
            for path in &self.written {
                println!("        {} {}", style("•").dim(), path.display());
            }
        }

        println!();
        println!(
            "    {}",
            style(format!(
                "Completed {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ))
            .dim()
        );
    }
}
