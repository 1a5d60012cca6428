use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Upstream marker for an attribute the extractor could not locate.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Upstream marker for an attribute whose extraction failed.
pub const ERROR: &str = "ERROR";

/// Raw key/value output of the upstream extractor, in the order attributes were requested.
/// `None` means the attribute was absent from the extractor's answer.
pub type RawExtraction = IndexMap<String, Option<String>>;

/// Normalized values keyed by attribute label, in extraction order.
pub type ExtractedData = IndexMap<String, NormalizedValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    NotFound,
    Extracted,
    ExtractedNonNumeric,
    FormatError,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::NotFound => "not_found",
            ExtractionStatus::Extracted => "extracted",
            ExtractionStatus::ExtractedNonNumeric => "extracted_non_numeric",
            ExtractionStatus::FormatError => "format_error",
        }
    }
}

/// One attribute after normalization.
///
/// `numeric_value` is present exactly when `status` is `Extracted`; the
/// constructors below are the only way the normalizer builds these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue {
    pub raw_value: Option<String>,
    pub formatted_value: Option<String>,
    pub numeric_value: Option<f64>,
    pub currency: Option<String>,
    pub status: ExtractionStatus,
}

impl NormalizedValue {
    pub fn not_found(raw_value: Option<String>) -> Self {
        Self::untyped(raw_value, ExtractionStatus::NotFound)
    }

    pub fn format_error(raw_value: Option<String>) -> Self {
        Self::untyped(raw_value, ExtractionStatus::FormatError)
    }

    pub fn numeric(raw_value: String, value: f64, formatted: String, currency: &str) -> Self {
        Self {
            raw_value: Some(raw_value),
            formatted_value: Some(formatted),
            numeric_value: Some(value),
            currency: Some(currency.to_string()),
            status: ExtractionStatus::Extracted,
        }
    }

    pub fn non_numeric(raw_value: String, cleaned: String) -> Self {
        Self {
            raw_value: Some(raw_value),
            formatted_value: Some(cleaned),
            numeric_value: None,
            currency: None,
            status: ExtractionStatus::ExtractedNonNumeric,
        }
    }

    fn untyped(raw_value: Option<String>, status: ExtractionStatus) -> Self {
        Self {
            raw_value,
            formatted_value: None,
            numeric_value: None,
            currency: None,
            status,
        }
    }

    /// Numeric value of a successfully extracted amount.
    pub fn amount(&self) -> Option<f64> {
        match self.status {
            ExtractionStatus::Extracted => self.numeric_value,
            _ => None,
        }
    }
}
