//! Align several formatted reports attribute by attribute.

use std::collections::BTreeMap;

use chrono::Local;

use crate::error::ReportError;
use crate::models::{ComparisonEntry, ComparisonReport, FormattedReport};

const MIN_DOCUMENTS: usize = 2;

pub fn build_comparison(reports: &[FormattedReport]) -> Result<ComparisonReport, ReportError> {
    if reports.len() < MIN_DOCUMENTS {
        return Err(ReportError::InsufficientInput {
            given: reports.len(),
        });
    }

    let mut attribute_comparison: BTreeMap<String, Vec<ComparisonEntry>> = BTreeMap::new();
    for (index, report) in reports.iter().enumerate() {
        let document_name = document_name(report, index);
        for (attribute, value) in &report.extracted_data {
            if value.numeric_value.is_some_and(|v| !v.is_finite()) {
                return Err(ReportError::NonFiniteValue {
                    attribute: attribute.clone(),
                });
            }
            attribute_comparison
                .entry(attribute.clone())
                .or_default()
                .push(ComparisonEntry {
                    document_index: index,
                    document_name: document_name.clone(),
                    value: value.numeric_value,
                    formatted: value.formatted_value.clone(),
                    status: value.status,
                });
        }
    }

    Ok(ComparisonReport {
        comparison_timestamp: Local::now(),
        total_documents: reports.len(),
        attribute_comparison,
        summary_statistics: serde_json::Map::new(),
    })
}

fn document_name(report: &FormattedReport, index: usize) -> String {
    report
        .source_files
        .as_ref()
        .map(|files| files.pdf_filename.clone())
        .unwrap_or_else(|| format!("document_{}", index))
}
