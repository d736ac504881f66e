use std::collections::HashMap;

use tracing::{debug, error, info};

use crate::config::CastQueryConfig;
use crate::errors::Result;
use crate::query::QuerySpec;
use crate::request::CastRequest;
use crate::response::{CastResponse, HttpReply};
use crate::store::{CastRecord, CastStore, MovieRecord};

/// Answers "who is in movie X" for one request at a time.
///
/// The store is injected once and shared by every invocation the process serves.
#[derive(Debug)]
pub struct CastQueryHandler<S> {
    store: S,
    config: CastQueryConfig,
}

impl<S: CastStore> CastQueryHandler<S> {
    pub fn new(store: S, config: CastQueryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &CastQueryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the whole pipeline and renders the outcome, failures included.
    pub async fn handle(&self, params: &HashMap<String, String>) -> HttpReply {
        match self.lookup(params).await {
            Ok(response) => {
                info!(
                    cast = response.cast.len(),
                    movie = response.movie.is_some(),
                    "Cast lookup succeeded"
                );
                HttpReply::ok(&response)
            }
            Err(e) => {
                error!(status = e.status_code(), "Cast lookup failed: {}", e);
                HttpReply::from_error(&e)
            }
        }
    }

    /// Validate, query, optionally fetch movie details. Reads run one after another.
    pub async fn lookup(&self, params: &HashMap<String, String>) -> Result<CastResponse> {
        let request = CastRequest::from_params(params)?;
        let spec = QuerySpec::for_request(&request, &self.config);

        let cast = self.fetch_cast_members(&spec).await?;
        let movie = self.maybe_fetch_movie_details(&request).await?;

        Ok(CastResponse { movie, cast })
    }

    pub async fn fetch_cast_members(&self, spec: &QuerySpec) -> Result<Vec<CastRecord>> {
        debug!(
            table = %spec.table_name,
            index = spec.index_name.as_deref().unwrap_or("-"),
            condition = %spec.key_condition_expression(),
            "Querying cast members"
        );
        Ok(self.store.query_cast(spec).await?)
    }

    pub async fn maybe_fetch_movie_details(
        &self,
        request: &CastRequest,
    ) -> Result<Option<MovieRecord>> {
        if !request.include_facts {
            return Ok(None);
        }
        debug!(table = %self.config.movie_table_name, movie_id = %request.movie_id, "Fetching movie details");
        Ok(self
            .store
            .get_movie(&self.config.movie_table_name, request.movie_id)
            .await?)
    }
}
