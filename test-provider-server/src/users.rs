// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Deserialize, JsonSchema)]
pub struct UserPathParam {
    user_id: String,
}

fn parse_user(body: &UntypedBody) -> Result<User, ErrorResponse> {
    serde_json::from_slice(body.as_bytes())
        .map_err(|e| ErrorResponse::invalid_syntax(format!("{e}")))
}

#[endpoint {
    method = GET,
    path = "/v2/Users/{user_id}"
}]
pub async fn get_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result: Result<Response<Body>, http::Error> =
        match apictx.store.get_user(&path_param.user_id) {
            Ok(user) => resource_response(StatusCode::OK, &user),
            Err(error) => error_response(error),
        };

    result.map_err(HttpError::from)
}

#[endpoint {
    method = POST,
    path = "/v2/Users",
}]
pub async fn create_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    body: UntypedBody,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let base_url = format!("http://{}/v2", rqctx.server.local_addr);

    let result: Result<Response<Body>, http::Error> = match parse_user(&body)
        .and_then(|request| apictx.store.create_user(&base_url, request))
    {
        // RFC 7664 § 3.3:
        // When the service provider successfully creates the new resource, an
        // HTTP response SHALL be returned with HTTP status code 201 (Created).
        Ok(user) => {
            info!(rqctx.log, "created user"; "user_name" => %user.name);
            resource_response(StatusCode::CREATED, &user)
        }
        Err(error) => error_response(error),
    };

    result.map_err(HttpError::from)
}

#[endpoint {
    method = PUT,
    path = "/v2/Users/{user_id}"
}]
pub async fn put_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
    body: UntypedBody,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let if_match = rqctx
        .request
        .headers()
        .get(header::IF_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let result: Result<Response<Body>, http::Error> = match parse_user(&body)
        .and_then(|request| {
            apictx.store.replace_user(
                &path_param.user_id,
                if_match.as_deref(),
                request,
            )
        }) {
        Ok(user) => resource_response(StatusCode::OK, &user),
        Err(error) => error_response(error),
    };

    result.map_err(HttpError::from)
}

#[endpoint {
    method = DELETE,
    path = "/v2/Users/{user_id}"
}]
pub async fn delete_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result: Result<Response<Body>, http::Error> =
        match apictx.store.delete_user(&path_param.user_id) {
            Ok(()) => Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Body::empty()),
            Err(error) => error_response(error),
        };

    result.map_err(HttpError::from)
}

/// Temporarily redirects to the user, for exercising redirect handling
#[endpoint {
    method = GET,
    path = "/v2/Redirect/Users/{user_id}"
}]
pub async fn redirect_user(
    _rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();

    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header(header::LOCATION, format!("/v2/Users/{}", path_param.user_id))
        .body(Body::empty())
        .map_err(HttpError::from)
}
