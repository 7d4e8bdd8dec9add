// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A small SCIM 2 service provider for exercising `scim2-client` over real
//! HTTP. Users are kept in memory and versioned on every write; a handful of
//! extra endpoints return deliberately broken responses.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use chrono::Utc;
use dropshot::ApiDescription;
use dropshot::Body;
use dropshot::ConfigDropshot;
use dropshot::HttpError;
use dropshot::HttpServer;
use dropshot::Path;
use dropshot::RequestContext;
use dropshot::ServerBuilder;
use dropshot::UntypedBody;
use dropshot::endpoint;
use http::Response;
use http::StatusCode;
use http::header;
use schemars::JsonSchema;
use serde::Deserialize;
use slog::Drain;
use slog::Logger;
use slog::info;
use uuid::Uuid;

use scim2_client::ErrorResponse;
use scim2_client::SCIM_MEDIA_TYPE;
use scim2_client::User;

mod faults;
mod fixture;
mod store;
mod users;

pub use fixture::*;
pub use store::*;

pub struct ServerContext {
    pub store: InMemoryUserStore,
}

/// A terminal logger for running the provider by hand
pub fn terminal_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, slog::o!())
}

pub fn create_http_server(
    log: Logger,
    bind_address: SocketAddr,
) -> anyhow::Result<HttpServer<Arc<ServerContext>>> {
    let mut api = ApiDescription::new();

    api.register(users::get_user).map_err(|e| anyhow::anyhow!("{e}"))?;
    api.register(users::create_user).map_err(|e| anyhow::anyhow!("{e}"))?;
    api.register(users::put_user).map_err(|e| anyhow::anyhow!("{e}"))?;
    api.register(users::delete_user).map_err(|e| anyhow::anyhow!("{e}"))?;
    api.register(users::redirect_user)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    api.register(faults::plain_text_error)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    api.register(faults::non_scim_json_error)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    api.register(faults::malformed_resource)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let context =
        Arc::new(ServerContext { store: InMemoryUserStore::new() });

    let config = ConfigDropshot { bind_address, ..Default::default() };

    let server = ServerBuilder::new(api, context, log.clone())
        .config(config)
        .start()
        .map_err(|e| anyhow::anyhow!("starting server failed: {e}"))?;

    info!(log, "SCIM provider listening"; "local_addr" => %server.local_addr());

    Ok(server)
}

/// Serialize `resource` as a SCIM response, with an `ETag` matching its
/// version
fn resource_response(
    status: StatusCode,
    resource: &User,
) -> Result<Response<Body>, http::Error> {
    let serialized = match serde_json::to_string(resource) {
        Ok(serialized) => serialized,
        Err(e) => {
            return error_response(ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                format!("serializing resource failed: {e}"),
            ));
        }
    };

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, SCIM_MEDIA_TYPE);

    if let Some(version) = &resource.common.meta.version {
        builder = builder.header(header::ETAG, version.as_str());
    }

    builder.body(serialized.into())
}

fn error_response(error: ErrorResponse) -> Result<Response<Body>, http::Error> {
    let status = error.status().unwrap_or(500);

    let serialized = match serde_json::to_string(&error) {
        Ok(serialized) => serialized,
        Err(e) => serde_json::json!(
            {
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "status": "500",
            "detail": format!("serializing error failed: {e}"),
            }
        )
        .to_string(),
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, SCIM_MEDIA_TYPE)
        .body(serialized.into())
}
