use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::types::ExtractionStatus;

/// Attribute-by-attribute view across several formatted reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub comparison_timestamp: DateTime<Local>,
    pub total_documents: usize,
    pub attribute_comparison: BTreeMap<String, Vec<ComparisonEntry>>,
    /// Not populated yet; kept so the output shape is stable for consumers.
    #[serde(default)]
    pub summary_statistics: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub document_index: usize,
    pub document_name: String,
    pub value: Option<f64>,
    pub formatted: Option<String>,
    pub status: ExtractionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonOutcome {
    Report(ComparisonReport),
    Failed { error: String },
}

impl ComparisonOutcome {
    pub fn report(&self) -> Option<&ComparisonReport> {
        match self {
            ComparisonOutcome::Report(report) => Some(report),
            ComparisonOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ComparisonOutcome::Report(_) => None,
            ComparisonOutcome::Failed { error } => Some(error),
        }
    }
}
