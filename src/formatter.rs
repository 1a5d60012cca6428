//! Entry points that turn raw extraction output into reports and write them to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::config::FormatterConfig;
use crate::error::ReportError;
use crate::excel;
use crate::models::{ComparisonOutcome, FormattedReport, SourceFiles, SummarySection};
use crate::services::{comparison, normalizer, summary, validator};
use crate::types::{ExtractedData, RawExtraction};

const EXPORT_PREFIX: &str = "insurance_extraction";

#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    config: FormatterConfig,
}

impl ReportFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Normalize, summarize and validate one extraction. Always returns a report;
    /// a failing stage degrades its own section only.
    pub fn format_extraction_results(
        &self,
        raw: &RawExtraction,
        pdf_filename: Option<&str>,
        excel_filename: Option<&str>,
    ) -> FormattedReport {
        let extracted_data: ExtractedData = raw
            .iter()
            .map(|(attribute, value)| (attribute.clone(), normalizer::normalize(value.as_deref())))
            .collect();

        let summary = match summary::build_summary(&extracted_data) {
            Ok(summary) => {
                tracing::debug!(
                    total = summary.total_attributes_processed,
                    extracted = summary.successful_extractions,
                    rate = %summary.extraction_rate,
                    "Summary built"
                );
                SummarySection::Built(summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating summary");
                SummarySection::Failed {
                    error: e.to_string(),
                }
            }
        };
        let validation = validator::validate(&extracted_data);

        FormattedReport {
            success: true,
            error: None,
            extraction_timestamp: Local::now(),
            source_files: Some(SourceFiles {
                pdf_filename: pdf_filename
                    .unwrap_or(&self.config.default_document_name)
                    .to_string(),
                excel_filename: excel_filename
                    .unwrap_or(&self.config.default_attributes_name)
                    .to_string(),
            }),
            extracted_data,
            summary,
            validation,
        }
    }

    pub fn compare_extractions(&self, reports: &[FormattedReport]) -> ComparisonOutcome {
        match comparison::build_comparison(reports) {
            Ok(report) => ComparisonOutcome::Report(report),
            Err(ReportError::InsufficientInput { given }) => {
                tracing::warn!(given, "Comparison needs at least two reports");
                ComparisonOutcome::Failed {
                    error: "Need at least 2 extractions for comparison".to_string(),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Comparison failed");
                ComparisonOutcome::Failed {
                    error: format!("Comparison error: {}", e),
                }
            }
        }
    }

    /// Write any serializable report as pretty JSON. Returns the path written.
    pub fn export_to_json_file<T: Serialize>(
        &self,
        data: &T,
        filename: Option<&Path>,
    ) -> Result<PathBuf, ReportError> {
        let path = self.export_path(filename, "json");
        write_json(data, &path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Error exporting to JSON file");
            e
        })?;
        tracing::info!(path = %path.display(), "Exported report to JSON");
        Ok(path)
    }

    pub fn export_to_excel(
        &self,
        report: &FormattedReport,
        filename: Option<&Path>,
    ) -> Result<PathBuf, ReportError> {
        let path = self.export_path(filename, "xlsx");
        excel::export_report_to_excel(report, &path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Error exporting to Excel");
            e
        })?;
        tracing::info!(path = %path.display(), rows = report.extracted_data.len(), "Exported report to Excel");
        Ok(path)
    }

    /// Caller-supplied path as-is, or `insurance_extraction_<YYYYMMDD_HHMMSS>.<ext>` in the export dir.
    fn export_path(&self, filename: Option<&Path>, extension: &str) -> PathBuf {
        match filename {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => self.config.export_dir.join(generated_export_name(extension)),
        }
    }
}

pub fn generated_export_name(extension: &str) -> String {
    format!(
        "{}_{}.{}",
        EXPORT_PREFIX,
        Local::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

fn write_json<T: Serialize>(data: &T, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}
