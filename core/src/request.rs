use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::CastQueryError;

pub const MOVIE_ID_PARAM: &str = "movieId";
pub const ROLE_NAME_PARAM: &str = "roleName";
pub const ACTOR_NAME_PARAM: &str = "actorName";
pub const FACTS_PARAM: &str = "facts";

/// Every query-string parameter the handler looks at.
pub const PARAMETER_NAMES: [&str; 4] = [
    MOVIE_ID_PARAM,
    ROLE_NAME_PARAM,
    ACTOR_NAME_PARAM,
    FACTS_PARAM,
];

/// Partition key shared by the cast and movie tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = CastQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(MovieId)
            .map_err(|_| CastQueryError::InvalidMovieId {
                value: s.to_string(),
            })
    }
}

/// Which sort-key prefix, if any, narrows the cast query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastFilter {
    Unfiltered,
    ByRole(String),
    ByActor(String),
}

impl CastFilter {
    /// `roleName` wins over `actorName`. Presence matters, not content.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        if let Some(prefix) = params.get(ROLE_NAME_PARAM) {
            CastFilter::ByRole(prefix.clone())
        } else if let Some(prefix) = params.get(ACTOR_NAME_PARAM) {
            CastFilter::ByActor(prefix.clone())
        } else {
            CastFilter::Unfiltered
        }
    }
}

/// A validated cast lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastRequest {
    pub movie_id: MovieId,
    pub filter: CastFilter,
    pub include_facts: bool,
}

impl CastRequest {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, CastQueryError> {
        let movie_id = params
            .get(MOVIE_ID_PARAM)
            .filter(|value| !value.is_empty())
            .ok_or(CastQueryError::MissingMovieId)?
            .parse::<MovieId>()?;

        Ok(Self {
            movie_id,
            filter: CastFilter::from_params(params),
            include_facts: params.get(FACTS_PARAM).is_some_and(|value| value == "true"),
        })
    }
}
