//! Predicate tree for filtering recordings.

use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::error_handling::QueryError;

/// A literal compared against a column.
///
/// Untagged in JSON: `5` is an integer, `5.5` a float, `"x"` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v.into())
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Integer(v.into())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// A filter over recordings.
///
/// JSON form is tagged by `op`:
///
/// ```json
/// {"op": "and", "predicates": [
///     {"op": "equalTo", "field": "scheduleId", "value": "sched-1"},
///     {"op": "greaterThan", "field": "createdAt", "value": 1704067200000}
/// ]}
/// ```
///
/// Text comparisons are case-sensitive. `notEqualTo` also matches rows where
/// the column is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Predicate {
    GreaterThan { field: Field, value: FieldValue },
    GreaterThanOrEqualTo { field: Field, value: FieldValue },
    LessThan { field: Field, value: FieldValue },
    LessThanOrEqualTo { field: Field, value: FieldValue },
    EqualTo { field: Field, value: FieldValue },
    NotEqualTo { field: Field, value: FieldValue },
    /// Substring match on a text column.
    Contains { field: Field, value: String },
    /// Column equals any of the values. An empty list matches nothing.
    In { field: Field, values: Vec<String> },
    /// All must hold. An empty list matches everything.
    And { predicates: Vec<Predicate> },
    /// Any must hold. An empty list matches nothing.
    Or { predicates: Vec<Predicate> },
}

impl Predicate {
    pub fn greater_than(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::GreaterThan {
            field,
            value: value.into(),
        }
    }

    pub fn greater_than_or_equal_to(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::GreaterThanOrEqualTo {
            field,
            value: value.into(),
        }
    }

    pub fn less_than(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::LessThan {
            field,
            value: value.into(),
        }
    }

    pub fn less_than_or_equal_to(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::LessThanOrEqualTo {
            field,
            value: value.into(),
        }
    }

    pub fn equal_to(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::EqualTo {
            field,
            value: value.into(),
        }
    }

    pub fn not_equal_to(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::NotEqualTo {
            field,
            value: value.into(),
        }
    }

    pub fn contains(field: Field, value: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            value: value.into(),
        }
    }

    pub fn is_in<I, S>(field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::In {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And {
            predicates: predicates.into_iter().collect(),
        }
    }

    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Or {
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Operator name as it appears in JSON.
    pub fn op_name(&self) -> &'static str {
        match self {
            Predicate::GreaterThan { .. } => "greaterThan",
            Predicate::GreaterThanOrEqualTo { .. } => "greaterThanOrEqualTo",
            Predicate::LessThan { .. } => "lessThan",
            Predicate::LessThanOrEqualTo { .. } => "lessThanOrEqualTo",
            Predicate::EqualTo { .. } => "equalTo",
            Predicate::NotEqualTo { .. } => "notEqualTo",
            Predicate::Contains { .. } => "contains",
            Predicate::In { .. } => "in",
            Predicate::And { .. } => "and",
            Predicate::Or { .. } => "or",
        }
    }

    /// Checks that every operator is applied to a field and value it supports.
    ///
    /// Ordering comparisons need a numeric field and a numeric value.
    /// Equality accepts text on text fields and numbers on numeric fields.
    /// `contains` and `in` only apply to text fields. Thumbnail bytes are not queryable.
    pub fn validate(&self) -> Result<(), QueryError> {
        let unsupported = |field: &Field| QueryError::UnsupportedType {
            op: self.op_name(),
            field: field.column(),
        };

        match self {
            Predicate::GreaterThan { field, value }
            | Predicate::GreaterThanOrEqualTo { field, value }
            | Predicate::LessThan { field, value }
            | Predicate::LessThanOrEqualTo { field, value } => {
                if field.is_numeric() && value.is_numeric() {
                    Ok(())
                } else {
                    Err(unsupported(field))
                }
            }
            Predicate::EqualTo { field, value } | Predicate::NotEqualTo { field, value } => {
                let matches_kind = match value {
                    FieldValue::Text(_) => field.is_text(),
                    FieldValue::Integer(_) | FieldValue::Float(_) => field.is_numeric(),
                };
                if matches_kind {
                    Ok(())
                } else {
                    Err(unsupported(field))
                }
            }
            Predicate::Contains { field, .. } | Predicate::In { field, .. } => {
                if field.is_text() {
                    Ok(())
                } else {
                    Err(unsupported(field))
                }
            }
            Predicate::And { predicates } | Predicate::Or { predicates } => {
                predicates.iter().try_for_each(Predicate::validate)
            }
        }
    }
}
