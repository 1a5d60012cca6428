use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::ExtractedData;

/// Top-level result of formatting one document's extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub extraction_timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_files: Option<SourceFiles>,
    #[serde(default)]
    pub extracted_data: ExtractedData,
    pub summary: SummarySection,
    pub validation: ValidationResult,
}

impl FormattedReport {
    /// Degraded report returned when the extraction itself could not be completed.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            error: Some(message.clone()),
            extraction_timestamp: Local::now(),
            source_files: None,
            extracted_data: ExtractedData::new(),
            summary: SummarySection::Empty {},
            validation: ValidationResult::failed(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFiles {
    pub pdf_filename: String,
    pub excel_filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummarySection {
    Built(Summary),
    Failed { error: String },
    Empty {},
}

impl SummarySection {
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            SummarySection::Built(summary) => Some(summary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_attributes_processed: usize,
    pub successful_extractions: usize,
    pub extraction_rate: String,
    pub top_values: Vec<TopValue>,
    pub key_insurance_metrics: IndexMap<String, KeyMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopValue {
    pub attribute: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub value: Option<f64>,
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Passed,
    Warnings,
    Failed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub consistency_checks: Vec<ConsistencyCheck>,
}

impl ValidationResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Failed,
            warnings: Vec::new(),
            errors: vec![message.into()],
            consistency_checks: Vec::new(),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            status: ValidationStatus::Passed,
            warnings: Vec::new(),
            errors: Vec::new(),
            consistency_checks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Consistent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    pub check: String,
    pub status: CheckStatus,
    pub message: String,
}
