use serde_json::{Value, json};
use thiserror::Error;

pub const MISSING_MOVIE_ID_MESSAGE: &str = "Missing movie Id parameter";
pub const INVALID_MOVIE_ID_MESSAGE: &str = "Invalid movie Id parameter";

#[derive(Error, Debug)]
pub enum CastQueryError {
    #[error("Missing movie Id parameter")]
    MissingMovieId,

    #[error("Invalid movie Id parameter: {value:?}")]
    InvalidMovieId { value: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse configuration from {source_name}: {reason}")]
    Parse { source_name: String, reason: String },
}

/// Failures reported by a [`crate::store::CastStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Query on table {table} failed: {message}")]
    Query {
        table: String,
        code: Option<String>,
        message: String,
    },

    #[error("GetItem on table {table} failed: {message}")]
    GetItem {
        table: String,
        code: Option<String>,
        message: String,
    },

    #[error("Failed to decode item from table {table}: {reason}")]
    Decode { table: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CastQueryError>;

impl StoreError {
    /// Service error code (e.g. `ResourceNotFoundException`) when the store supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Query { code, .. } | StoreError::GetItem { code, .. } => code.as_deref(),
            StoreError::Decode { .. } => None,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            StoreError::Query { table, .. }
            | StoreError::GetItem { table, .. }
            | StoreError::Decode { table, .. } => table,
        }
    }

    fn name(&self) -> &str {
        match self {
            StoreError::Decode { .. } => "DecodeError",
            _ => self.code().unwrap_or("StoreError"),
        }
    }
}

impl CastQueryError {
    /// HTTP status for this failure.
    ///
    /// A missing `movieId` keeps the historical 500; only a malformed one is a 400.
    pub fn status_code(&self) -> u16 {
        match self {
            CastQueryError::InvalidMovieId { .. } => 400,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// JSON body rendered for this failure.
    pub fn to_body(&self) -> Value {
        match self {
            CastQueryError::MissingMovieId => json!({ "message": MISSING_MOVIE_ID_MESSAGE }),
            CastQueryError::InvalidMovieId { .. } => {
                json!({ "message": INVALID_MOVIE_ID_MESSAGE })
            }
            CastQueryError::Store(err) => json!({
                "error": {
                    "name": err.name(),
                    "table": err.table(),
                    "message": err.to_string(),
                }
            }),
            CastQueryError::Serialization(err) => json!({
                "error": { "name": "SerializationError", "message": err.to_string() }
            }),
        }
    }
}
