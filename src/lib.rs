//! Turns raw attribute/value extraction output into typed, validated reports,
//! compares reports across documents, and exports them as JSON or Excel.

pub mod agent;
pub mod commands;
pub mod config;
pub mod error;
pub mod excel;
pub mod formatter;
pub mod models;
pub mod services;
pub mod types;

pub use agent::{ExtractionAgent, ExtractionRequest, RecordedAgent};
pub use commands::{DocumentRequest, ExtractionService};
pub use config::FormatterConfig;
pub use error::{AgentError, ReportError};
pub use formatter::ReportFormatter;
pub use models::{ComparisonOutcome, ComparisonReport, FormattedReport};
pub use types::{ExtractionStatus, NormalizedValue, RawExtraction};
