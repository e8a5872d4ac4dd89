//! Translation of predicates into SQL.
//!
//! Values are always bound as parameters; only column names from [`Field`]
//! are written into the statement text.

use sqlx::{QueryBuilder, Sqlite};

use super::field::Field;
use super::predicate::{FieldValue, Predicate};

fn push_value(query_builder: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value {
        FieldValue::Integer(v) => query_builder.push_bind(*v),
        FieldValue::Float(v) => query_builder.push_bind(*v),
        FieldValue::Text(v) => query_builder.push_bind(v.clone()),
    };
}

fn push_comparison(
    query_builder: &mut QueryBuilder<'_, Sqlite>,
    field: Field,
    operator: &str,
    value: &FieldValue,
) {
    query_builder.push(field.column());
    query_builder.push(operator);
    push_value(query_builder, value);
}

fn push_joined(
    query_builder: &mut QueryBuilder<'_, Sqlite>,
    predicates: &[Predicate],
    separator: &str,
) {
    query_builder.push("(");
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            query_builder.push(separator);
        }
        push_predicate(query_builder, predicate);
    }
    query_builder.push(")");
}

/// Appends `predicate` as a boolean SQL expression.
///
/// The predicate should have passed [`Predicate::validate`]; this function
/// does not re-check field kinds.
pub(crate) fn push_predicate(query_builder: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::GreaterThan { field, value } => {
            push_comparison(query_builder, *field, " > ", value)
        }
        Predicate::GreaterThanOrEqualTo { field, value } => {
            push_comparison(query_builder, *field, " >= ", value)
        }
        Predicate::LessThan { field, value } => push_comparison(query_builder, *field, " < ", value),
        Predicate::LessThanOrEqualTo { field, value } => {
            push_comparison(query_builder, *field, " <= ", value)
        }
        Predicate::EqualTo { field, value } => push_comparison(query_builder, *field, " = ", value),
        // IS NOT keeps null columns in the result
        Predicate::NotEqualTo { field, value } => {
            push_comparison(query_builder, *field, " IS NOT ", value)
        }
        // instr() is case-sensitive and needs no LIKE escaping
        Predicate::Contains { field, value } => {
            query_builder.push("instr(");
            query_builder.push(field.column());
            query_builder.push(", ");
            query_builder.push_bind(value.clone());
            query_builder.push(") > 0");
        }
        Predicate::In { field, values } => {
            if values.is_empty() {
                query_builder.push("0");
                return;
            }
            query_builder.push(field.column());
            query_builder.push(" IN (");
            let mut separated = query_builder.separated(", ");
            for value in values {
                separated.push_bind(value.clone());
            }
            separated.push_unseparated(")");
        }
        Predicate::And { predicates } => {
            if predicates.is_empty() {
                query_builder.push("1");
            } else {
                push_joined(query_builder, predicates, " AND ");
            }
        }
        Predicate::Or { predicates } => {
            if predicates.is_empty() {
                query_builder.push("0");
            } else {
                push_joined(query_builder, predicates, " OR ");
            }
        }
    }
}

/// Appends ` WHERE <predicate>` when a predicate is given.
pub(crate) fn push_where(query_builder: &mut QueryBuilder<'_, Sqlite>, predicate: Option<&Predicate>) {
    if let Some(predicate) = predicate {
        query_builder.push(" WHERE ");
        push_predicate(query_builder, predicate);
    }
}
