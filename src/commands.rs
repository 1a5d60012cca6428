//! Request handling: validate the uploaded files, run the extraction agent, format the result.

use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::{ExtractionAgent, ExtractionRequest};
use crate::error::ReportError;
use crate::excel;
use crate::formatter::ReportFormatter;
use crate::models::{ComparisonOutcome, FormattedReport};

const MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;
const MAX_ATTRIBUTES_BYTES: u64 = 100 * 1024 * 1024;

/// The two inputs of one extraction: attribute list spreadsheet and source document.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub attributes_path: PathBuf,
    pub document_path: PathBuf,
}

pub struct ExtractionService<A: ExtractionAgent> {
    agent: A,
    formatter: ReportFormatter,
}

impl<A: ExtractionAgent> ExtractionService<A> {
    pub fn new(agent: A, formatter: ReportFormatter) -> Self {
        Self { agent, formatter }
    }

    pub fn formatter(&self) -> &ReportFormatter {
        &self.formatter
    }

    /// Input problems are returned as errors; once inputs are accepted the caller
    /// always gets a report, failed or not.
    pub fn process_documents(
        &self,
        request: &DocumentRequest,
    ) -> Result<FormattedReport, ReportError> {
        let attributes_name = validate_file(
            &request.attributes_path,
            &["xlsx", "xls"],
            "Excel file must be .xlsx or .xls format",
            MAX_ATTRIBUTES_BYTES,
        )?;
        let document_name = validate_file(
            &request.document_path,
            &["pdf"],
            "PDF file must be .pdf format",
            MAX_DOCUMENT_BYTES,
        )?;

        let document = fs::read(&request.document_path)?;
        let attributes = excel::read_attribute_list(&request.attributes_path, None, None)?;

        tracing::info!(
            document = %document_name,
            attributes_file = %attributes_name,
            attributes = attributes.len(),
            bytes = document.len(),
            "Processing documents"
        );

        let extraction = ExtractionRequest {
            document_name: &document_name,
            document: &document,
            attributes: &attributes,
        };
        match self.agent.extract(&extraction) {
            Ok(raw) => Ok(self.formatter.format_extraction_results(
                &raw,
                Some(document_name.as_str()),
                Some(attributes_name.as_str()),
            )),
            Err(e) => {
                tracing::error!(document = %document_name, error = %e, "Extraction agent failed");
                Ok(FormattedReport::failed(e.to_string()))
            }
        }
    }

    pub fn compare(&self, reports: &[FormattedReport]) -> ComparisonOutcome {
        self.formatter.compare_extractions(reports)
    }
}

/// Check extension, presence, emptiness and size. Returns the file name.
fn validate_file(
    path: &Path,
    extensions: &[&str],
    wrong_type: &str,
    max_bytes: u64,
) -> Result<String, ReportError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ReportError::InvalidInput(format!("Invalid file path: {}", path.display())))?
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !extensions.contains(&extension.as_str()) {
        return Err(ReportError::InvalidInput(wrong_type.to_string()));
    }
    if !path.exists() {
        return Err(ReportError::InvalidInput(format!("File not found: {}", name)));
    }
    let len = fs::metadata(path)?.len();
    if len == 0 {
        return Err(ReportError::InvalidInput(format!("{} is empty", name)));
    }
    if len > max_bytes {
        return Err(ReportError::InvalidInput(format!(
            "{} is too large (max {}MB)",
            name,
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(name)
}
