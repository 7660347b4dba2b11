use crate::database::types::DatabaseRow;

/// Outcome of a read: the first row (if any) or every matching row.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Single(Option<DatabaseRow>),
    Multiple(Vec<DatabaseRow>),
}
