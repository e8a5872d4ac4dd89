//! Result types returned by store queries.

use serde::Serialize;

use crate::models::Recording;

/// A page of query results plus the total number of matches.
///
/// `count` ignores any limit applied to `results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults<T> {
    pub results: Vec<T>,
    pub count: usize,
}

impl<T> QueryResults<T> {
    /// Results where every match was returned.
    pub fn complete(results: Vec<T>) -> Self {
        let count = results.len();
        Self { results, count }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A recording's identity and the schedule it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecordingRef {
    pub uuid: String,
    pub schedule_id: String,
}

/// Snapshot delivered to a subscriber after the store changes.
///
/// `count` is the number of recordings in `results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsChange {
    pub subscription_id: String,
    pub results: Vec<Recording>,
    pub count: usize,
}

impl ResultsChange {
    pub(crate) fn new(subscription_id: String, results: Vec<Recording>) -> Self {
        let count = results.len();
        Self {
            subscription_id,
            results,
            count,
        }
    }
}

/// Converts a SQLite `COUNT(*)` into a length.
pub(crate) fn count_from_sql(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}
