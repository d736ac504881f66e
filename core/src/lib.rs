pub mod config;
pub mod errors;
pub mod handler;
pub mod query;
pub mod request;
pub mod response;
pub mod store;
pub mod telemetry;

pub use config::{CastQueryConfig, load_config};
pub use errors::{CastQueryError, Result, StoreError};
pub use handler::CastQueryHandler;
pub use query::QuerySpec;
pub use request::{CastFilter, CastRequest, MovieId, PARAMETER_NAMES};
pub use response::{CastResponse, HttpReply};
pub use store::{CastRecord, CastStore, DynamoCastStore, MemoryCastStore, MovieRecord};
