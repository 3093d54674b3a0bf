//! Medviz: Medical Data Visualizer
//!
//! A library for turning cardiovascular examination records into
//! diagnostic visualizations: a faceted categorical bar chart and a
//! masked correlation heatmap, plus a processed CSV export.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
