//! Group-wise trend analysis.
//!
//! This module partitions the merged table into per-country groups, fits a
//! least-squares line per group, grades the fit quality, and selects the
//! groups whose trend falls below a threshold.

pub mod grade;
pub mod model;
pub mod nest;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod types;
