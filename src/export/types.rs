//! Export types and options.

use std::path::PathBuf;

use crate::query::Predicate;

/// Options for exporting data.
#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    /// Output file path (or stdout if None)
    pub output: Option<PathBuf>,
    /// Only export recordings matching this predicate
    pub predicate: Option<Predicate>,
}
