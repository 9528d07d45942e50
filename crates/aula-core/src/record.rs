//! Answer record types.
//!
//! One record per saved student submission. Records are append-only:
//! there is no identity column and no de-duplication, so a retried
//! submission simply produces a second row.

use serde::{Deserialize, Serialize};

/// One logged student submission, as stored in the answer CSV.
///
/// Field order matches the CSV header:
/// `timestamp,user_email,user_name,unit,session,hour,exercise_id,response`.
/// All fields are opaque strings; the response is stored with newlines
/// escaped so a row stays on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Server-side timestamp, ISO-8601 with second precision.
    pub timestamp: String,
    pub user_email: String,
    pub user_name: String,
    pub unit: String,
    pub session: String,
    pub hour: String,
    pub exercise_id: String,
    pub response: String,
}

/// A submission as it arrives from the UI, before the timestamp is added.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub user_email: String,
    pub user_name: String,
    pub unit: String,
    pub session: String,
    pub hour: String,
    pub exercise_id: String,
    /// Free-text response. Empty means "nothing to save".
    pub response: String,
}

impl NewAnswer {
    /// Whether saving this answer would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }
}
