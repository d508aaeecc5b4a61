//! Exhaustive survey over every valid candidate.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::RoutineConfig;
use crate::data_model::{Candidate, PaddedValue};
use crate::routine::run_with;

/// All candidates with four distinct digits, ascending, leading-zero values included.
pub fn candidates() -> impl Iterator<Item = Candidate> {
    (0..=PaddedValue::MAX).filter_map(|v| Candidate::try_from(v).ok())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub total: usize,
    pub converged: usize,
    pub exhausted: usize,
    /// Largest step count among converged runs.
    pub worst_case: usize,
    /// Converged runs keyed by step count.
    pub histogram: BTreeMap<usize, usize>,
}

pub fn survey(config: &RoutineConfig) -> SurveyReport {
    let mut report = SurveyReport::default();

    for candidate in candidates() {
        let sequence = run_with(candidate, config);
        report.total += 1;
        if sequence.converged() {
            report.converged += 1;
            report.worst_case = report.worst_case.max(sequence.step_count());
            *report.histogram.entry(sequence.step_count()).or_insert(0) += 1;
        } else {
            report.exhausted += 1;
        }
    }

    tracing::info!(
        total = report.total,
        converged = report.converged,
        worst_case = report.worst_case,
        "survey complete"
    );
    report
}
