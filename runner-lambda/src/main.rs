use std::collections::HashMap;

use anyhow::Context;
use cast_core::config::load_config;
use cast_core::handler::CastQueryHandler;
use cast_core::request::PARAMETER_NAMES;
use cast_core::store::{CastStore, DynamoCastStore};
use cast_core::telemetry::init_tracing;
use lambda_http::{Body, Error, Request, RequestExt, Response, service_fn};
use tracing::{info, warn};

const CONFIG_PATH_VAR: &str = "CAST_QUERY_CONFIG_PATH";

/// Adapts one API Gateway request to the cast handler and back.
pub async fn lambda_handler<S: CastStore>(
    handler: &CastQueryHandler<S>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params = query_params(&event);
    info!(
        method = %event.method(),
        path = %event.uri().path(),
        ?params,
        "Received request"
    );

    let reply = handler.handle(&params).await;

    let response = Response::builder()
        .status(reply.status_code)
        .header("content-type", reply.content_type())
        .body(Body::from(reply.body))
        .map_err(Box::new)?;
    Ok(response)
}

fn query_params(event: &Request) -> HashMap<String, String> {
    let query = event.query_string_parameters();
    PARAMETER_NAMES
        .iter()
        .filter_map(|name| {
            query
                .first(name)
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config_path = std::env::var(CONFIG_PATH_VAR).ok();
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    let missing = config.missing_fields();
    if !missing.is_empty() {
        warn!("Configuration incomplete, unset: {}", missing.join(", "));
    }

    let store = DynamoCastStore::new(&config).await;
    let handler = CastQueryHandler::new(store, config);

    lambda_http::run(service_fn(|event: Request| lambda_handler(&handler, event))).await
}
