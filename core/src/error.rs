// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

pub const NO_SERVICE_URL_MESSAGE: &str = "no SCIM service URL was provided";
pub const INVALID_SERVICE_URL_MESSAGE: &str =
    "the SCIM service URL could not be parsed";
pub const NO_BODY_MESSAGE: &str = "<No body>";

/// The outcome of a request that did not produce a resource. Exactly one
/// variant describes any failed call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No response was obtained from the transport
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A non-2xx response that was not a SCIM error
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A non-2xx response carrying a SCIM error body
    #[error(transparent)]
    Scim(#[from] ErrorResponse),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A 2xx response without any body
    #[error("{}", NO_BODY_MESSAGE)]
    NoBody,
}

impl Error {
    /// The HTTP status of the response, for the variants that have one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.code),
            Error::Scim(e) => e.status().ok(),
            Error::Transport(_) | Error::Codec(_) | Error::NoBody => None,
        }
    }
}

/// Errors that can only happen while building a [`Client`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}", NO_SERVICE_URL_MESSAGE)]
    NoServiceUrl,

    #[error("{}", INVALID_SERVICE_URL_MESSAGE)]
    InvalidServiceUrl(#[source] url::ParseError),

    #[error("building the HTTP transport failed")]
    Transport(#[source] reqwest::Error),
}

/// A failure of the round trip itself (DNS, connection, protocol, timeout),
/// tagged with the operation that was attempted.
#[derive(Debug, thiserror::Error)]
#[error("{method} \"{url}\": {source}")]
pub struct TransportError {
    pub method: Method,
    pub url: String,
    #[source]
    pub source: anyhow::Error,
}

/// A non-2xx response that did not carry a SCIM error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("HTTP error {code}: {description}")]
pub struct HttpError {
    pub code: u16,

    /// The status line
    pub description: String,

    /// The raw body, `None` when the response had none or it was unreadable
    pub body: Option<Vec<u8>>,
}

impl HttpError {
    /// The body as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> Option<std::borrow::Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CodecOp {
    Marshal,
    Unmarshal,
}

impl std::fmt::Display for CodecOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CodecOp::Marshal => write!(f, "marshal"),
            CodecOp::Unmarshal => write!(f, "unmarshal"),
        }
    }
}

/// A JSON (de)serialization failure. `body` holds the bytes that failed to
/// decode, or that were produced so far when encoding failed (always empty).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{op} failed: {message}")]
pub struct CodecError {
    pub message: String,
    pub op: CodecOp,
    pub body: Vec<u8>,
}

impl CodecError {
    pub fn marshal(error: serde_json::Error) -> Self {
        Self {
            message: error.to_string(),
            op: CodecOp::Marshal,
            body: Vec::new(),
        }
    }

    pub fn unmarshal(error: serde_json::Error, body: Vec<u8>) -> Self {
        Self { message: error.to_string(), op: CodecOp::Unmarshal, body }
    }
}
