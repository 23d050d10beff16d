//! Data Quality Reporter.
//!
//! Pure function of the outcome set; never fails.

use chat_core::{DataQualityReport, QualityStatus, QueryOutcome};

/// Summarizes `outcomes` into a report. Failure reasons keep outcome order, which is the
/// input pair order.
pub fn summarize(outcomes: &[QueryOutcome]) -> DataQualityReport {
    let failure_reasons: Vec<String> = outcomes
        .iter()
        .filter_map(QueryOutcome::failure)
        .map(|f| f.describe())
        .collect();

    let stores_found = outcomes.len();
    let stores_failed = failure_reasons.len();

    DataQualityReport {
        stores_found,
        stores_queried: stores_found - stores_failed,
        stores_failed,
        failure_reasons,
        status: QualityStatus::from_counts(stores_found, stores_failed),
    }
}
