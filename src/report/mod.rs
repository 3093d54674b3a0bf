//! Report module - chart rendering and the run summary

pub mod catplot;
pub mod heatmap;
pub mod summary;

pub use catplot::*;
pub use heatmap::*;
pub use summary::*;
