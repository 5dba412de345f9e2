//! Typed errors for the analysis pipeline.
//!
//! Loading and modeling have distinct failure policies: a cell that cannot
//! be coerced aborts the load of that source, a source missing its join
//! columns aborts the merge, and a group too small to fit is surfaced as a
//! null summary row while the rest of the pipeline continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A cell could not be coerced to the expected numeric type.
    #[error("{source_name}: {detail}")]
    Parse { source_name: String, detail: String },

    /// A source table lacks a column required to join on (country, year).
    #[error("{source_name}: missing join column '{column}'")]
    JoinKeyMismatch { source_name: String, column: String },

    /// A group has too few distinct x values to fit a line through.
    #[error("{distinct} distinct x value(s), need at least 2 to fit a line")]
    InsufficientData { distinct: usize },
}

impl PipelineError {
    pub fn parse(source_name: &str, detail: impl Into<String>) -> Self {
        PipelineError::Parse {
            source_name: source_name.to_string(),
            detail: detail.into(),
        }
    }

    pub fn join_key(source_name: &str, column: &str) -> Self {
        PipelineError::JoinKeyMismatch {
            source_name: source_name.to_string(),
            column: column.to_string(),
        }
    }
}
