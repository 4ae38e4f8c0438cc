//! # Recording Store
//!
//! In-process [`Store`] that records every statement and answers from a
//! queue of prepared results. Used to exercise query composition without
//! a database.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::{Row, Store, StoreFuture};
use crate::query::SqlValue;

/// A statement as the store received it
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Store double that replays queued results
#[derive(Debug, Default)]
pub struct RecordingStore {
    responses: Mutex<VecDeque<StoreResult<Vec<Row>>>>,
    executed: Mutex<Vec<Executed>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows for the next statement.
    ///
    /// Each element must be a JSON object.
    pub fn push_rows(&self, rows: Vec<Value>) -> &Self {
        let rows = rows
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.lock_responses().push_back(Ok(rows));
        self
    }

    /// Queue an empty result for the next statement
    pub fn push_empty(&self) -> &Self {
        self.lock_responses().push_back(Ok(Vec::new()));
        self
    }

    /// Queue a failure for the next statement
    pub fn push_error(&self, err: StoreError) -> &Self {
        self.lock_responses().push_back(Err(err));
        self
    }

    /// Statements executed so far
    pub fn executed(&self) -> Vec<Executed> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recent statement
    pub fn last(&self) -> Option<Executed> {
        self.executed().pop()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<StoreResult<Vec<Row>>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for RecordingStore {
    fn query<'a>(&'a self, sql: &'a str, params: &'a [SqlValue]) -> StoreFuture<'a> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Executed {
                sql: sql.to_string(),
                params: params.to_vec(),
            });

        // Unscripted statements behave like "no matching rows"
        let response = self.lock_responses().pop_front().unwrap_or(Ok(Vec::new()));
        Box::pin(async move { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replays_in_order() {
        let store = RecordingStore::new();
        store
            .push_rows(vec![json!({"n": 1})])
            .push_error(StoreError::Database("boom".to_string()));

        let first = store.query("SELECT 1", &[]).await.unwrap();
        assert_eq!(first[0]["n"], json!(1));

        let second = store.query("SELECT 2", &[SqlValue::Integer(2)]).await;
        assert!(second.is_err());

        let third = store.query("SELECT 3", &[]).await.unwrap();
        assert!(third.is_empty());

        let executed = store.executed();
        assert_eq!(executed.len(), 3);
        assert_eq!(executed[1].params, vec![SqlValue::Integer(2)]);
        assert_eq!(store.last().unwrap().sql, "SELECT 3");
    }
}
