pub mod dynamo;
pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::StoreError;
use crate::query::QuerySpec;
use crate::request::MovieId;

pub use dynamo::DynamoCastStore;
pub use memory::MemoryCastStore;

/// One item of the cast table, attributes kept as stored.
pub type CastRecord = Map<String, Value>;

/// One item of the movie table.
pub type MovieRecord = Map<String, Value>;

/// Read access to the cast and movie tables.
///
/// Implementations are shared across invocations, so they must not hold per-request state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CastStore: Send + Sync {
    /// Runs one query and returns the first page of matching items.
    /// An empty page is a valid result, not an error.
    async fn query_cast(&self, spec: &QuerySpec) -> Result<Vec<CastRecord>, StoreError>;

    /// Point lookup by partition key. A miss is `Ok(None)`.
    async fn get_movie(
        &self,
        table_name: &str,
        movie_id: MovieId,
    ) -> Result<Option<MovieRecord>, StoreError>;
}
