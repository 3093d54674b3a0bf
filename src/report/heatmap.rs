//! Masked correlation heatmap rendering

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::pipeline::CorrelationMatrix;

const IMAGE_SIZE: (u32, u32) = (1000, 900);

/// Render the correlation heatmap.
///
/// Only the strictly lower triangle is drawn; the diagonal and upper
/// triangle are masked. Cells use a diverging palette centered at zero and
/// carry one-decimal annotations. NaN entries (constant columns) are left
/// blank.
pub fn render_heatmap(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    let n = matrix.size();
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("Failed to initialize chart: {}", path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation matrix", ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(96)
        .y_label_area_size(96)
        .build_cartesian_2d(0f64..n.max(1) as f64, 0f64..n.max(1) as f64)
        .context("Failed to build heatmap axes")?;

    // Row 0 is drawn at the top, so the y axis is mirrored in the formatter.
    let columns = matrix.columns().to_vec();
    let y_names = columns.clone();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n + 1)
        .y_labels(n + 1)
        .x_label_formatter(&|x| {
            columns
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            let row = n.saturating_sub(1).wrapping_sub(y.floor() as usize);
            y_names.get(row).cloned().unwrap_or_default()
        })
        .x_label_style(("sans-serif", 12))
        .y_label_style(("sans-serif", 12))
        .draw()
        .context("Failed to draw heatmap mesh")?;

    let mut cells = Vec::new();
    let mut labels = Vec::new();
    let annotation = ("sans-serif", 13)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for row in 0..n {
        for col in 0..row {
            let value = matrix.value(row, col);
            if value.is_nan() {
                continue;
            }

            let x0 = col as f64;
            let y0 = (n - 1 - row) as f64;
            cells.push(Rectangle::new(
                [(x0, y0), (x0 + 1.0, y0 + 1.0)],
                diverging_color(value).filled(),
            ));
            labels.push(Text::new(
                format!("{:.1}", value),
                (x0 + 0.5, y0 + 0.5),
                annotation.clone(),
            ));
        }
    }

    chart
        .draw_series(cells)
        .context("Failed to draw heatmap cells")?;
    chart
        .draw_series(labels)
        .context("Failed to draw heatmap annotations")?;

    root.present()
        .with_context(|| format!("Failed to write chart image: {}", path.display()))?;

    Ok(())
}

/// Diverging palette centered at zero: blue for negative coefficients,
/// white around zero, red for positive.
fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);
    if t >= 0.0 {
        blend(WHITE_RGB, (178, 24, 43), t)
    } else {
        blend(WHITE_RGB, (33, 102, 172), -t)
    }
}

const WHITE_RGB: (u8, u8, u8) = (255, 255, 255);

fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> RGBColor {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}
