use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreError;
use crate::query::{PARTITION_KEY, QuerySpec};
use crate::request::MovieId;
use crate::store::{CastRecord, CastStore, MovieRecord};

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// In-process [`CastStore`] with DynamoDB key-condition semantics.
///
/// Index queries only see items carrying the index sort attribute. Results come back
/// ordered by the sort attribute of the queried table or index.
#[derive(Debug, Default)]
pub struct MemoryCastStore {
    tables: RwLock<HashMap<String, Vec<CastRecord>>>,
}

impl MemoryCastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `table_name` if needed and appends `item`.
    pub fn put_item(&self, table_name: &str, item: CastRecord) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(table_name.to_string()).or_default().push(item);
    }

    pub fn create_table(&self, table_name: &str) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(table_name.to_string()).or_default();
    }

    pub fn with_item(self, table_name: &str, item: Value) -> Self {
        if let Value::Object(map) = item {
            self.put_item(table_name, map);
        }
        self
    }

    fn missing_table(table_name: &str) -> (Option<String>, String) {
        (
            Some(RESOURCE_NOT_FOUND.to_string()),
            format!("Requested resource not found: Table: {table_name} not found"),
        )
    }
}

fn partition_matches(item: &CastRecord, movie_id: MovieId) -> bool {
    item.get(PARTITION_KEY).and_then(Value::as_i64) == Some(movie_id.0)
}

fn compare_sort_key(a: &CastRecord, b: &CastRecord, sort_key: &str) -> Ordering {
    let key = |item: &CastRecord| item.get(sort_key).and_then(Value::as_str).map(str::to_string);
    key(a).cmp(&key(b))
}

#[async_trait]
impl CastStore for MemoryCastStore {
    async fn query_cast(&self, spec: &QuerySpec) -> Result<Vec<CastRecord>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let items = tables.get(&spec.table_name).ok_or_else(|| {
            let (code, message) = Self::missing_table(&spec.table_name);
            StoreError::Query {
                table: spec.table_name.clone(),
                code,
                message,
            }
        })?;

        let sort_key = spec.sort_key();
        let mut matched: Vec<CastRecord> = items
            .iter()
            .filter(|item| partition_matches(item, spec.movie_id))
            // sparse index: items without the index key are not projected
            .filter(|item| spec.index_name.is_none() || item.contains_key(sort_key))
            .filter(|item| match &spec.sort_key_prefix {
                Some(prefix) => item
                    .get(prefix.attribute)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value.starts_with(prefix.value.as_str())),
                None => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare_sort_key(a, b, sort_key));
        Ok(matched)
    }

    async fn get_movie(
        &self,
        table_name: &str,
        movie_id: MovieId,
    ) -> Result<Option<MovieRecord>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let items = tables.get(table_name).ok_or_else(|| {
            let (code, message) = Self::missing_table(table_name);
            StoreError::GetItem {
                table: table_name.to_string(),
                code,
                message,
            }
        })?;

        Ok(items
            .iter()
            .find(|item| partition_matches(item, movie_id))
            .cloned())
    }
}
