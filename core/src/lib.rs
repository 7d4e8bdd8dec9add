// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A blocking client for SCIM 2 service providers.
//!
//! Every request goes through the same pipeline: the request is decorated
//! with SCIM content negotiation headers (and an `If-Match` precondition when
//! replacing a versioned resource), dispatched over a [`Transport`], and the
//! outcome is classified into exactly one of a decoded resource or an
//! [`Error`] variant.

use chrono::DateTime;
use chrono::Utc;
use http::HeaderValue;
use http::Method;
use http::Request;
use http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use slog::Logger;
use slog::debug;

mod client;
mod config;
mod error;
mod group;
mod meta;
mod resource;
mod response;
mod transport;
mod urn;
mod user;
mod utils;

pub use client::*;
pub use config::*;
pub use error::*;
pub use group::*;
pub use meta::*;
pub use resource::*;
pub use response::*;
pub use transport::*;
pub use urn::*;
pub use user::*;
pub use utils::*;
