//! Error types for report construction, export, and the extraction agent seam.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Need at least 2 extractions for comparison (got {given})")]
    InsufficientInput { given: usize },

    #[error("non-finite numeric value for attribute '{attribute}'")]
    NonFiniteValue { attribute: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(String),
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Excel(e.to_string())
    }
}

/// Failures reported by the upstream extraction collaborator.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Extraction agent unavailable: {0}")]
    Unavailable(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
