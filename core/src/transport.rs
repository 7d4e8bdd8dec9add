// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use std::io::Read;

use http::HeaderMap;

/// A response body that has not been read yet. Dropping it releases the
/// underlying connection.
pub type ResponseBody = Box<dyn Read + Send>;

/// What a transport hands back for one round trip.
///
/// `body` distinguishes a response without any body (`None`) from one whose
/// body is present but empty.
pub struct TransportResponse {
    pub status: StatusCode,

    /// The status line, e.g. "404 Not Found"
    pub status_text: String,

    pub headers: HeaderMap,

    pub body: Option<ResponseBody>,
}

impl TransportResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            status_text: status.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn with_body<B>(mut self, body: B) -> Self
    where
        B: Read + Send + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Executes a single HTTP request/response round trip.
///
/// Implementations must not interpret the status code: any response that was
/// received is `Ok`. Failures to obtain a response (connection, TLS,
/// timeout, cancellation) are `Err`.
pub trait Transport: Send + Sync {
    fn round_trip(
        &self,
        request: Request<Vec<u8>>,
    ) -> anyhow::Result<TransportResponse>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn round_trip(
        &self,
        request: Request<Vec<u8>>,
    ) -> anyhow::Result<TransportResponse> {
        (**self).round_trip(request)
    }
}

impl Transport for reqwest::blocking::Client {
    fn round_trip(
        &self,
        request: Request<Vec<u8>>,
    ) -> anyhow::Result<TransportResponse> {
        let (parts, body) = request.into_parts();

        let response = self
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()?;

        let status = response.status();
        let headers = response.headers().clone();

        Ok(TransportResponse {
            status,
            status_text: status.to_string(),
            headers,
            body: Some(Box::new(response)),
        })
    }
}

/// The default transport for a given configuration
pub fn reqwest_transport(
    config: &ClientConfig,
) -> Result<reqwest::blocking::Client, reqwest::Error> {
    let mut builder = reqwest::blocking::Client::builder();

    if config.ignore_redirects() {
        builder = builder.redirect(reqwest::redirect::Policy::none());
    }

    builder.build()
}
