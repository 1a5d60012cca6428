//! Aggregate counts, top values, and the canonical insurance metrics.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::error::ReportError;
use crate::models::{KeyMetric, Summary, TopValue};
use crate::types::{ExtractedData, ExtractionStatus};

const TOP_VALUES_LIMIT: usize = 5;

/// Exact attribute labels recognized as key metrics, with their standardized keys.
pub const KEY_METRIC_LABELS: &[(&str, &str)] = &[
    ("Total Insured Value", "total_insured_value"),
    ("Quoted Amount", "quoted_amount"),
    ("Limit Amount", "limit_amount"),
    ("Limit per occurrence", "limit_per_occurrence"),
    ("Attachment Point", "attachment_point"),
    ("Annual Premium", "annual_premium"),
    ("100 % Annual Premium", "full_annual_premium"),
    ("Premium due", "premium_due"),
    ("100% layer premium w/o terrorism", "layer_premium_no_terrorism"),
];

pub fn build_summary(data: &ExtractedData) -> Result<Summary, ReportError> {
    let mut numeric_values = Vec::new();
    for (attribute, value) in data {
        if let Some(amount) = value.amount() {
            if !amount.is_finite() {
                return Err(ReportError::NonFiniteValue {
                    attribute: attribute.clone(),
                });
            }
            numeric_values.push(TopValue {
                attribute: attribute.clone(),
                value: amount,
            });
        }
    }

    let total = data.len();
    let successful = numeric_values.len();

    // Stable: equal values keep extraction order.
    numeric_values.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    numeric_values.truncate(TOP_VALUES_LIMIT);

    Ok(Summary {
        total_attributes_processed: total,
        successful_extractions: successful,
        extraction_rate: extraction_rate(successful, total),
        top_values: numeric_values,
        key_insurance_metrics: key_metrics(data),
    })
}

fn extraction_rate(successful: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", successful as f64 / total as f64 * 100.0)
}

fn key_metrics(data: &ExtractedData) -> IndexMap<String, KeyMetric> {
    KEY_METRIC_LABELS
        .iter()
        .filter_map(|(label, key)| {
            let value = data.get(*label)?;
            (value.status == ExtractionStatus::Extracted).then(|| {
                (
                    key.to_string(),
                    KeyMetric {
                        value: value.numeric_value,
                        formatted: value.formatted_value.clone(),
                    },
                )
            })
        })
        .collect()
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
    fn empty_data_has_zero_rate() {
        let summary = build_summary(&ExtractedData::new()).unwrap();
        assert_eq!(summary.total_attributes_processed, 0);
        assert_eq!(summary.successful_extractions, 0);
        assert_eq!(summary.extraction_rate, "0%");
        assert!(summary.top_values.is_empty());
        assert!(summary.key_insurance_metrics.is_empty());
    }

    #[test]
    fn rate_counts_only_numeric_extractions() {
        let summary = build_summary(&data(&[
            ("Insured", "Acme Corp"),
            ("Annual Premium", "$12,000"),
            ("Deductible", "NOT_FOUND"),
        ]))
        .unwrap();
        assert_eq!(summary.total_attributes_processed, 3);
        assert_eq!(summary.successful_extractions, 1);
        assert_eq!(summary.extraction_rate, "33.3%");
    }

    #[test]
    fn top_values_sorted_descending_and_capped() {
        let summary = build_summary(&data(&[
            ("a", "10"),
            ("b", "700"),
            ("c", "30"),
            ("d", "700"),
            ("e", "5"),
            ("f", "9000"),
            ("g", "1"),
        ]))
        .unwrap();
        let attrs: Vec<&str> = summary.top_values.iter().map(|t| t.attribute.as_str()).collect();
        assert_eq!(attrs, vec!["f", "b", "d", "c", "a"]);
        assert_eq!(summary.top_values[0].value, 9000.0);
    }

    #[test]
    fn key_metrics_use_exact_labels() {
        let summary = build_summary(&data(&[
            ("Premium due", "$2,500.00"),
            ("Total Insured Value", "$50,000,000"),
            ("quoted amount", "100"),
            ("Limit Amount", "TBD"),
        ]))
        .unwrap();
        let metrics = &summary.key_insurance_metrics;
        assert_eq!(metrics.len(), 2);
        let keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["total_insured_value", "premium_due"]);
        assert_eq!(metrics["premium_due"].value, Some(2500.0));
        assert_eq!(metrics["premium_due"].formatted.as_deref(), Some("$2,500.00"));
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let mut values = data(&[("Annual Premium", "100")]);
        values.insert(
            "Broken".into(),
            NormalizedValue::numeric("?".into(), f64::NAN, "?".into(), "USD"),
        );
        let err = build_summary(&values).unwrap_err();
        assert!(matches!(err, ReportError::NonFiniteValue { ref attribute } if attribute == "Broken"));
    }
}
