//! Pipeline module - dataset construction and the two analysis stages

pub mod categorical;
pub mod correlation;
pub mod dataset;
pub mod indicators;

pub use categorical::*;
pub use correlation::*;
pub use dataset::*;
pub use indicators::*;
