use serde::Serialize;
use tracing::error;

use crate::errors::CastQueryError;
use crate::store::{CastRecord, MovieRecord};

pub const CONTENT_TYPE: &str = "application/json";

const FALLBACK_ERROR_BODY: &str =
    r#"{"error":{"name":"SerializationError","message":"failed to render response"}}"#;

/// Successful lookup result. Serializes as `{"movie": ..., "cast": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CastResponse {
    pub movie: Option<MovieRecord>,
    pub cast: Vec<CastRecord>,
}

/// Transport-neutral HTTP reply. The body is always JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status_code: u16,
    pub body: String,
}

impl HttpReply {
    pub fn json<T: Serialize>(status_code: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status_code, body },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self {
                    status_code: 500,
                    body: FALLBACK_ERROR_BODY.to_string(),
                }
            }
        }
    }

    pub fn ok(response: &CastResponse) -> Self {
        Self::json(200, response)
    }

    pub fn from_error(err: &CastQueryError) -> Self {
        Self::json(err.status_code(), &err.to_body())
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }
}
