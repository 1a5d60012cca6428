//! Cross-field consistency rules and sanity ranges for extracted amounts.
//!
//! Paired amounts are compared with exact equality on the parsed numbers; no
//! rounding tolerance is applied.

use std::collections::HashMap;

use crate::error::ReportError;
use crate::models::{CheckStatus, ConsistencyCheck, ValidationResult, ValidationStatus};
use crate::services::normalizer::format_currency;
use crate::types::ExtractedData;

/// Attribute pairs expected to carry the same amount.
struct PairRule {
    left: &'static str,
    right: &'static str,
    consistent_message: &'static str,
}

const PAIR_RULES: &[PairRule] = &[
    PairRule {
        left: "Quoted Amount",
        right: "Limit Amount",
        consistent_message: "Quoted Amount equals Limit Amount as expected",
    },
    PairRule {
        left: "Premium due",
        right: "Annual Premium",
        consistent_message: "Premium due equals Annual Premium",
    },
];

const TOTAL_INSURED_VALUE: &str = "Total Insured Value";
const TIV_LOW: f64 = 1_000_000.0;
const TIV_HIGH: f64 = 100_000_000_000.0;

pub fn validate(data: &ExtractedData) -> ValidationResult {
    let mut result = ValidationResult::default();

    match run_checks(data, &mut result) {
        Ok(()) => {
            result.status = if !result.errors.is_empty() {
                ValidationStatus::Failed
            } else if !result.warnings.is_empty() {
                ValidationStatus::Warnings
            } else {
                ValidationStatus::Passed
            };
        }
        Err(e) => {
            tracing::error!(error = %e, "Validation aborted");
            result.status = ValidationStatus::Error;
            result.errors.push(format!("Validation error: {}", e));
        }
    }
    result
}

fn run_checks(data: &ExtractedData, result: &mut ValidationResult) -> Result<(), ReportError> {
    let values = numeric_values(data)?;

    for rule in PAIR_RULES {
        let (Some(&left), Some(&right)) = (values.get(rule.left), values.get(rule.right)) else {
            continue;
        };
        if left == right {
            result.consistency_checks.push(ConsistencyCheck {
                check: format!("{} vs {}", rule.left, rule.right),
                status: CheckStatus::Consistent,
                message: rule.consistent_message.to_string(),
            });
        } else {
            result.warnings.push(format!(
                "{} ({}) differs from {} ({})",
                rule.left,
                format_currency(left),
                rule.right,
                format_currency(right)
            ));
        }
    }

    if let Some(&tiv) = values.get(TOTAL_INSURED_VALUE) {
        if tiv < TIV_LOW {
            result.warnings.push(format!(
                "Total Insured Value seems low: {}",
                format_currency(tiv)
            ));
        } else if tiv > TIV_HIGH {
            result.warnings.push(format!(
                "Total Insured Value seems very high: {}",
                format_currency(tiv)
            ));
        }
    }

    Ok(())
}

fn numeric_values(data: &ExtractedData) -> Result<HashMap<&str, f64>, ReportError> {
    let mut values = HashMap::new();
    for (attribute, value) in data {
        if let Some(amount) = value.amount() {
            if !amount.is_finite() {
                return Err(ReportError::NonFiniteValue {
                    attribute: attribute.clone(),
                });
            }
            values.insert(attribute.as_str(), amount);
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalizer::normalize;
    use crate::types::NormalizedValue;

    fn data(pairs: &[(&str, &str)]) -> ExtractedData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), normalize(Some(*v))))
            .collect()
    }

    #[test]
    fn no_rules_apply_passes() {
        let result = validate(&data(&[("Insured", "Acme")]));
        assert_eq!(result.status, ValidationStatus::Passed);
        assert!(result.warnings.is_empty());
        assert!(result.errors.is_empty());
        assert!(result.consistency_checks.is_empty());
    }

    #[test]
    fn equal_quote_and_limit_is_consistent() {
        let result = validate(&data(&[
            ("Quoted Amount", "5000000"),
            ("Limit Amount", "$5,000,000"),
        ]));
        assert_eq!(result.status, ValidationStatus::Passed);
        assert!(result.warnings.is_empty());
        assert_eq!(result.consistency_checks.len(), 1);
        let check = &result.consistency_checks[0];
        assert_eq!(check.check, "Quoted Amount vs Limit Amount");
        assert_eq!(check.status, CheckStatus::Consistent);
    }

    #[test]
    fn differing_quote_and_limit_warns() {
        let result = validate(&data(&[
            ("Quoted Amount", "5000000"),
            ("Limit Amount", "4900000"),
        ]));
        assert_eq!(result.status, ValidationStatus::Warnings);
        assert!(result.consistency_checks.is_empty());
        assert_eq!(
            result.warnings,
            vec!["Quoted Amount ($5,000,000.00) differs from Limit Amount ($4,900,000.00)"]
        );
    }

    #[test]
    fn premium_rule_uses_exact_equality() {
        let result = validate(&data(&[
            ("Premium due", "1000.001"),
            ("Annual Premium", "1000.00"),
        ]));
        // Both render as $1,000.00 but the stored numbers differ.
        assert_eq!(result.status, ValidationStatus::Warnings);
        assert_eq!(
            result.warnings,
            vec!["Premium due ($1,000.00) differs from Annual Premium ($1,000.00)"]
        );
    }

    #[test]
    fn non_numeric_pair_member_skips_rule() {
        let result = validate(&data(&[
            ("Quoted Amount", "5000000"),
            ("Limit Amount", "See schedule"),
        ]));
        assert_eq!(result.status, ValidationStatus::Passed);
        assert!(result.consistency_checks.is_empty());
    }

    #[test]
    fn tiv_range_warnings() {
        let low = validate(&data(&[("Total Insured Value", "500000")]));
        assert_eq!(low.warnings, vec!["Total Insured Value seems low: $500,000.00"]);
        assert_eq!(low.status, ValidationStatus::Warnings);

        let normal = validate(&data(&[("Total Insured Value", "50000000")]));
        assert!(normal.warnings.is_empty());
        assert!(normal.consistency_checks.is_empty());
        assert_eq!(normal.status, ValidationStatus::Passed);

        let high = validate(&data(&[("Total Insured Value", "200000000000")]));
        assert_eq!(
            high.warnings,
            vec!["Total Insured Value seems very high: $200,000,000,000.00"]
        );
    }

    #[test]
    fn non_finite_value_yields_error_status() {
        let mut values = data(&[("Quoted Amount", "1")]);
        values.insert(
            "Limit Amount".into(),
            NormalizedValue::numeric("x".into(), f64::INFINITY, "x".into(), "USD"),
        );
        let result = validate(&values);
        assert_eq!(result.status, ValidationStatus::Error);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Validation error: "));
    }
}
