//! Query language for recordings.
//!
//! A [`Query`] is an optional [`Predicate`] plus an optional result limit.
//! Predicates are plain data (serde-friendly, so they can arrive as JSON from
//! the CLI) and are translated to bound SQL by the storage layer.

mod field;
mod predicate;
pub(crate) mod sql;

use serde::{Deserialize, Serialize};

pub use field::{Field, FieldKind};
pub(crate) use field::select_columns;
pub use predicate::{FieldValue, Predicate};

use crate::error_handling::QueryError;

/// A filtered, optionally limited view of the recordings table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub predicate: Option<Predicate>,
    /// Maximum number of results. The reported count ignores the limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Query {
    /// Every recording.
    pub fn all() -> Self {
        Self::default()
    }

    /// Recordings matching `predicate`.
    pub fn filter(predicate: Predicate) -> Self {
        Self {
            predicate: Some(predicate),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        match &self.predicate {
            Some(predicate) => predicate.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let query = Query::filter(Predicate::equal_to(Field::ScheduleId, "s1")).with_limit(3);
        assert_eq!(query.limit, Some(3));
        assert!(query.validate().is_ok());
        assert_eq!(Query::all(), Query::default());
    }

    #[test]
    fn test_validate_delegates_to_predicate() {
        let query = Query::filter(Predicate::contains(Field::Duration, "1"));
        assert!(query.validate().is_err());
    }
}
