//! Faceted categorical bar chart rendering

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::pipeline::{CategoryCount, LIFESTYLE_VARS};

const IMAGE_SIZE: (u32, u32) = (1280, 640);
const BAR_WIDTH: f64 = 0.34;
const BAR_INSET: f64 = 0.14;

// seaborn's default palette, first two hues
const VALUE_COLORS: [RGBColor; 2] = [RGBColor(76, 114, 176), RGBColor(221, 132, 82)];

/// Render the categorical chart: one panel per `cardio` outcome, bars
/// grouped by lifestyle variable and colored by indicator value.
pub fn render_catplot(counts: &[CategoryCount], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize chart: {}", path.display()))?;

    let y_max = counts.iter().map(|c| c.total).max().unwrap_or(0).max(1) as f64;
    let panels = root.split_evenly((1, 2));

    for (facet, panel) in panels.iter().enumerate() {
        let cardio = facet as i32;

        let mut chart = ChartBuilder::on(panel)
            .caption(format!("cardio = {}", cardio), ("sans-serif", 24))
            .margin(14)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d(0f64..LIFESTYLE_VARS.len() as f64, 0f64..y_max * 1.1)
            .context("Failed to build catplot axes")?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(LIFESTYLE_VARS.len())
            .x_label_formatter(&|x| {
                LIFESTYLE_VARS
                    .get(x.floor() as usize)
                    .map(|name| name.to_string())
                    .unwrap_or_default()
            })
            .x_label_style(("sans-serif", 13))
            .y_desc("total")
            .draw()
            .context("Failed to draw catplot mesh")?;

        for value in 0..=1i32 {
            let color = VALUE_COLORS[value as usize];
            let bars: Vec<Rectangle<(f64, f64)>> = counts
                .iter()
                .filter(|c| c.cardio == cardio && c.value == value)
                .filter_map(|c| {
                    let slot = LIFESTYLE_VARS.iter().position(|v| *v == c.variable)?;
                    let x0 = slot as f64 + BAR_INSET + value as f64 * (BAR_WIDTH + 0.04);
                    Some(Rectangle::new(
                        [(x0, 0.0), (x0 + BAR_WIDTH, c.total as f64)],
                        color.filled(),
                    ))
                })
                .collect();

            chart
                .draw_series(bars)
                .context("Failed to draw catplot bars")?
                .label(format!("value = {}", value))
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK.mix(0.4))
            .background_style(WHITE.mix(0.9))
            .draw()
            .context("Failed to draw catplot legend")?;
    }

    root.present()
        .with_context(|| format!("Failed to write chart image: {}", path.display()))?;

    Ok(())
}
