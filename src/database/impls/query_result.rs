use crate::database::enums::query_result::QueryResult;
use crate::database::types::DatabaseRow;

impl QueryResult {
    pub fn from_rows(mut rows: Vec<DatabaseRow>, single: bool) -> QueryResult {
        if single {
            if rows.is_empty() {
                return QueryResult::Single(None);
            }
            return QueryResult::Single(Some(rows.swap_remove(0)));
        }
        QueryResult::Multiple(rows)
    }

    pub fn len(&self) -> usize {
        match self {
            QueryResult::Single(row) => usize::from(row.is_some()),
            QueryResult::Multiple(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_single(self) -> Option<DatabaseRow> {
        match self {
            QueryResult::Single(row) => row,
            QueryResult::Multiple(rows) => rows.into_iter().next(),
        }
    }

    pub fn into_rows(self) -> Vec<DatabaseRow> {
        match self {
            QueryResult::Single(row) => row.into_iter().collect(),
            QueryResult::Multiple(rows) => rows,
        }
    }
}
