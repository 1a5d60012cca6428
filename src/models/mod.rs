pub mod comparison;
pub mod report;

pub use comparison::{ComparisonEntry, ComparisonOutcome, ComparisonReport};
pub use report::{
    CheckStatus, ConsistencyCheck, FormattedReport, KeyMetric, SourceFiles, Summary,
    SummarySection, TopValue, ValidationResult, ValidationStatus,
};
