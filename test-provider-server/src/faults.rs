// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoints answering with responses a well-behaved provider would not send

use super::*;

/// A 400 whose body is not JSON
#[endpoint {
    method = GET,
    path = "/v2/Faults/PlainText"
}]
pub async fn plain_text_error(
    _rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(String::from("Response body").into())
        .map_err(HttpError::from)
}

/// A 400 whose body is JSON without the SCIM error schema
#[endpoint {
    method = GET,
    path = "/v2/Faults/NotScimJson"
}]
pub async fn non_scim_json_error(
    _rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({
                "status": "400",
                "detail": "this is not a SCIM error",
            })
            .to_string()
            .into(),
        )
        .map_err(HttpError::from)
}

/// A 200 whose body is not valid JSON
#[endpoint {
    method = GET,
    path = "/v2/Faults/Malformed"
}]
pub async fn malformed_resource(
    _rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, SCIM_MEDIA_TYPE)
        .body(String::from("}").into())
        .map_err(HttpError::from)
}
