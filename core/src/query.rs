use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::config::CastQueryConfig;
use crate::request::{CastFilter, CastRequest, MovieId};

pub const PARTITION_KEY: &str = "movieId";
pub const ACTOR_SORT_KEY: &str = "actorName";
pub const ROLE_SORT_KEY: &str = "roleName";
pub const DEFAULT_ROLE_INDEX: &str = "roleIx";

const MOVIE_ID_PLACEHOLDER: &str = ":m";
const ROLE_PLACEHOLDER: &str = ":r";
const ACTOR_PLACEHOLDER: &str = ":a";

/// `begins_with` condition on the sort key of the queried table or index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKeyPrefix {
    pub attribute: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

/// A single cast-table query: target, partition value and optional prefix.
///
/// Always the first page only; no limit and no exclusive start key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub table_name: String,
    pub index_name: Option<String>,
    pub movie_id: MovieId,
    pub sort_key_prefix: Option<SortKeyPrefix>,
}

impl QuerySpec {
    pub fn for_request(request: &CastRequest, config: &CastQueryConfig) -> Self {
        let (index_name, sort_key_prefix) = match &request.filter {
            CastFilter::ByRole(prefix) => (
                Some(config.role_index_name.clone()),
                Some(SortKeyPrefix {
                    attribute: ROLE_SORT_KEY,
                    placeholder: ROLE_PLACEHOLDER,
                    value: prefix.clone(),
                }),
            ),
            CastFilter::ByActor(prefix) => (
                None,
                Some(SortKeyPrefix {
                    attribute: ACTOR_SORT_KEY,
                    placeholder: ACTOR_PLACEHOLDER,
                    value: prefix.clone(),
                }),
            ),
            CastFilter::Unfiltered => (None, None),
        };

        Self {
            table_name: config.cast_table_name.clone(),
            index_name,
            movie_id: request.movie_id,
            sort_key_prefix,
        }
    }

    /// Sort attribute of whatever this spec targets.
    pub fn sort_key(&self) -> &'static str {
        match (&self.index_name, &self.sort_key_prefix) {
            (_, Some(prefix)) => prefix.attribute,
            (Some(_), None) => ROLE_SORT_KEY,
            (None, None) => ACTOR_SORT_KEY,
        }
    }

    pub fn key_condition_expression(&self) -> String {
        let partition = format!("{PARTITION_KEY} = {MOVIE_ID_PLACEHOLDER}");
        match &self.sort_key_prefix {
            Some(prefix) => format!(
                "{partition} and begins_with({}, {})",
                prefix.attribute, prefix.placeholder
            ),
            None => partition,
        }
    }

    pub fn expression_attribute_values(&self) -> HashMap<String, AttributeValue> {
        let mut values = HashMap::from([(
            MOVIE_ID_PLACEHOLDER.to_string(),
            AttributeValue::N(self.movie_id.to_string()),
        )]);
        if let Some(prefix) = &self.sort_key_prefix {
            values.insert(
                prefix.placeholder.to_string(),
                AttributeValue::S(prefix.value.clone()),
            );
        }
        values
    }
}
