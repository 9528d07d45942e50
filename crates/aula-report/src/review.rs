//! Filtering and summarising submitted answers.
//!
//! The whole log is loaded into memory and filtered there; every
//! criterion is optional and they combine conjunctively, the way the
//! admin view narrows the table down.

use std::collections::BTreeMap;

use aula_core::record::AnswerRecord;

/// Optional, conjunctive criteria for narrowing the answer list.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub unit: Option<String>,
    pub session: Option<String>,
    pub hour: Option<String>,
    pub exercise: Option<String>,
    /// Matches the student's email.
    pub student: Option<String>,
}

impl ReviewFilter {
    fn matches(&self, record: &AnswerRecord) -> bool {
        fn ok(want: &Option<String>, have: &str) -> bool {
            want.as_deref().is_none_or(|w| w == have)
        }
        ok(&self.unit, &record.unit)
            && ok(&self.session, &record.session)
            && ok(&self.hour, &record.hour)
            && ok(&self.exercise, &record.exercise_id)
            && ok(&self.student, &record.user_email)
    }
}

/// Apply a filter, preserving log order.
pub fn filter_records<'a>(
    records: &'a [AnswerRecord],
    filter: &ReviewFilter,
) -> Vec<&'a AnswerRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Counts over a set of (already filtered) records.
#[derive(Debug, Clone)]
pub struct ReviewSummary {
    /// Total records in the set.
    pub total: usize,
    /// Submissions per exercise id.
    pub by_exercise: BTreeMap<String, usize>,
    /// Submissions per student email.
    pub by_student: BTreeMap<String, usize>,
    /// Earliest timestamp string in the set.
    pub first_timestamp: Option<String>,
    /// Latest timestamp string in the set.
    pub last_timestamp: Option<String>,
}

impl ReviewSummary {
    pub fn compute(records: &[&AnswerRecord]) -> Self {
        let mut by_exercise: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_student: BTreeMap<String, usize> = BTreeMap::new();

        for record in records {
            *by_exercise.entry(record.exercise_id.clone()).or_insert(0) += 1;
            *by_student.entry(record.user_email.clone()).or_insert(0) += 1;
        }

        // Timestamps are ISO-8601, so lexicographic min/max is chronological
        let first_timestamp = records.iter().map(|r| r.timestamp.clone()).min();
        let last_timestamp = records.iter().map(|r| r.timestamp.clone()).max();

        Self {
            total: records.len(),
            by_exercise,
            by_student,
            first_timestamp,
            last_timestamp,
        }
    }
}
