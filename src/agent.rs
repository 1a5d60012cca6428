//! Seam for the upstream document extractor.
//!
//! The service layer holds an `ExtractionAgent` by value, constructed once at
//! startup; there is no process-wide instance.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::AgentError;
use crate::types::RawExtraction;

/// What the agent is asked to extract.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    pub document_name: &'a str,
    pub document: &'a [u8],
    pub attributes: &'a [String],
}

/// Upstream collaborator that reads a document and answers one raw value per attribute.
pub trait ExtractionAgent: Send + Sync {
    fn extract(&self, request: &ExtractionRequest<'_>) -> Result<RawExtraction, AgentError>;
}

/// Replays a previously captured extraction instead of calling a live extractor.
#[derive(Debug, Clone, Default)]
pub struct RecordedAgent {
    recorded: RawExtraction,
}

impl RecordedAgent {
    pub fn new(recorded: RawExtraction) -> Self {
        Self { recorded }
    }

    /// Load a JSON object of `attribute -> string | null`.
    pub fn from_json_file(path: &Path) -> Result<Self, AgentError> {
        let text = fs::read_to_string(path)?;
        let recorded: IndexMap<String, Option<String>> = serde_json::from_str(&text)?;
        Ok(Self { recorded })
    }
}

impl ExtractionAgent for RecordedAgent {
    fn extract(&self, request: &ExtractionRequest<'_>) -> Result<RawExtraction, AgentError> {
        if request.attributes.is_empty() {
            return Ok(self.recorded.clone());
        }
        Ok(request
            .attributes
            .iter()
            .map(|attribute| {
                let value = self.recorded.get(attribute).cloned().flatten();
                (attribute.clone(), value)
            })
            .collect())
    }
}
