use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::config::CastQueryConfig;
use crate::errors::StoreError;
use crate::query::{PARTITION_KEY, QuerySpec};
use crate::request::MovieId;
use crate::store::{CastRecord, CastStore, MovieRecord};

/// [`CastStore`] backed by DynamoDB.
///
/// Holds one SDK client for the life of the process. The client is cheap to clone
/// and carries no per-request state.
#[derive(Debug, Clone)]
pub struct DynamoCastStore {
    client: Client,
}

impl DynamoCastStore {
    pub async fn new(config: &CastQueryConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            debug!("Using DynamoDB endpoint override {}", endpoint_url);
            builder = builder.endpoint_url(endpoint_url);
        }

        Self::from_client(Client::from_conf(builder.build()))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn decode_error(table: &str, err: serde_dynamo::Error) -> StoreError {
    StoreError::Decode {
        table: table.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl CastStore for DynamoCastStore {
    async fn query_cast(&self, spec: &QuerySpec) -> Result<Vec<CastRecord>, StoreError> {
        let mut builder = self
            .client
            .query()
            .table_name(&spec.table_name)
            .key_condition_expression(spec.key_condition_expression())
            .set_expression_attribute_values(Some(spec.expression_attribute_values()));

        if let Some(index_name) = &spec.index_name {
            builder = builder.index_name(index_name);
        }

        let output = builder.send().await.map_err(|e| StoreError::Query {
            table: spec.table_name.clone(),
            code: e.code().map(str::to_string),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let items = output.items.unwrap_or_default();
        debug!(
            table = %spec.table_name,
            index = spec.index_name.as_deref().unwrap_or("-"),
            count = items.len(),
            "Cast query returned"
        );

        serde_dynamo::from_items(items).map_err(|e| decode_error(&spec.table_name, e))
    }

    async fn get_movie(
        &self,
        table_name: &str,
        movie_id: MovieId,
    ) -> Result<Option<MovieRecord>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table_name)
            .key(PARTITION_KEY, AttributeValue::N(movie_id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::GetItem {
                table: table_name.to_string(),
                code: e.code().map(str::to_string),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(table = %table_name, %movie_id, found = output.item.is_some(), "Movie lookup returned");

        match output.item {
            Some(item) => serde_dynamo::from_item(item)
                .map(Some)
                .map_err(|e| decode_error(table_name, e)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::Credentials;
    use serde_json::json;
    use std::collections::HashMap;

    fn create_offline_store() -> DynamoCastStore {
        // never sends a request in these tests
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .build();
        DynamoCastStore::from_client(Client::from_conf(config))
    }

    #[test]
    fn test_from_client_keeps_region() {
        let store = create_offline_store();
        assert_eq!(
            store.client().config().region().map(|r| r.as_ref()),
            Some("us-east-1")
        );
    }

    #[test]
    fn test_items_decode_into_json_records() {
        let item = HashMap::from([
            ("movieId".to_string(), AttributeValue::N("1234".to_string())),
            ("actorName".to_string(), AttributeValue::S("Joe Bloggs".to_string())),
            ("roleName".to_string(), AttributeValue::S("Lead".to_string())),
        ]);

        let records: Vec<CastRecord> = serde_dynamo::from_items(vec![item]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["movieId"], json!(1234));
        assert_eq!(records[0]["actorName"], json!("Joe Bloggs"));
        assert_eq!(records[0]["roleName"], json!("Lead"));
    }

    #[test]
    fn test_decode_error_mentions_table() {
        let err = <serde_dynamo::Error as serde::de::Error>::custom("unexpected map");
        let err = decode_error("MovieCast", err);

        assert_eq!(err.table(), "MovieCast");
        assert!(err.to_string().contains("unexpected map"));
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
