use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConfigError;
use crate::query::DEFAULT_ROLE_INDEX;

pub const CAST_TABLE_NAME_VAR: &str = "CAST_TABLE_NAME";
pub const MOVIE_TABLE_NAME_VAR: &str = "MOVIE_TABLE_NAME";
pub const REGION_VAR: &str = "REGION";
pub const ROLE_INDEX_NAME_VAR: &str = "ROLE_INDEX_NAME";
pub const ENDPOINT_URL_VAR: &str = "DYNAMODB_ENDPOINT_URL";

/// Table names and client settings, read once at process start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CastQueryConfig {
    #[serde(default)]
    pub cast_table_name: String,
    #[serde(default)]
    pub movie_table_name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_role_index_name")]
    pub role_index_name: String,
    /// Overrides the DynamoDB endpoint, e.g. `http://localhost:8000` for DynamoDB Local.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_role_index_name() -> String {
    DEFAULT_ROLE_INDEX.to_string()
}

impl Default for CastQueryConfig {
    fn default() -> Self {
        Self {
            cast_table_name: String::new(),
            movie_table_name: String::new(),
            region: None,
            role_index_name: default_role_index_name(),
            endpoint_url: None,
        }
    }
}

pub fn load_config(config_path: Option<&str>) -> Result<CastQueryConfig, ConfigError> {
    match config_path {
        Some(path) => CastQueryConfig::from_file(path),
        None => Ok(CastQueryConfig::from_env()),
    }
}

impl CastQueryConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let config: CastQueryConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                source_name: path.to_string(),
                reason: e.to_string(),
            })?;
        debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Missing table names become empty strings; they fail at query time, not here.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            cast_table_name: lookup(CAST_TABLE_NAME_VAR).unwrap_or_default(),
            movie_table_name: lookup(MOVIE_TABLE_NAME_VAR).unwrap_or_default(),
            region: non_empty(REGION_VAR),
            role_index_name: non_empty(ROLE_INDEX_NAME_VAR)
                .unwrap_or_else(default_role_index_name),
            endpoint_url: non_empty(ENDPOINT_URL_VAR),
        }
    }

    /// Names of settings that are unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.cast_table_name.is_empty() {
            missing.push(CAST_TABLE_NAME_VAR);
        }
        if self.movie_table_name.is_empty() {
            missing.push(MOVIE_TABLE_NAME_VAR);
        }
        if self.region.is_none() {
            missing.push(REGION_VAR);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_vars_reads_all_settings() {
        let config = CastQueryConfig::from_vars(lookup_from(&[
            ("CAST_TABLE_NAME", "MovieCast"),
            ("MOVIE_TABLE_NAME", "Movies"),
            ("REGION", "eu-west-1"),
            ("ROLE_INDEX_NAME", "byRole"),
            ("DYNAMODB_ENDPOINT_URL", "http://localhost:8000"),
        ]));

        assert_eq!(config.cast_table_name, "MovieCast");
        assert_eq!(config.movie_table_name, "Movies");
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.role_index_name, "byRole");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert!(config.missing_fields().is_empty());
    }

    #[test]
    fn test_from_vars_does_not_reject_missing_tables() {
        let config = CastQueryConfig::from_vars(lookup_from(&[]));

        assert_eq!(config.cast_table_name, "");
        assert_eq!(config.movie_table_name, "");
        assert_eq!(config.role_index_name, "roleIx");
        assert_eq!(config.region, None);
        assert_eq!(
            config.missing_fields(),
            vec!["CAST_TABLE_NAME", "MOVIE_TABLE_NAME", "REGION"]
        );
    }

    #[test]
    fn test_empty_optional_vars_fall_back() {
        let config = CastQueryConfig::from_vars(lookup_from(&[
            ("ROLE_INDEX_NAME", ""),
            ("REGION", ""),
        ]));
        assert_eq!(config.role_index_name, "roleIx");
        assert_eq!(config.region, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "cast_table_name: MovieCast\nmovie_table_name: Movies\nregion: us-east-1"
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = load_config(Some(path)).unwrap();

        assert_eq!(config.cast_table_name, "MovieCast");
        assert_eq!(config.movie_table_name, "Movies");
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.role_index_name, "roleIx");
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_from_file_missing() {
        let err = CastQueryConfig::from_file("/nonexistent/cast-query.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cast_table_name: [unterminated").unwrap();

        let err = CastQueryConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
