// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

pub const SCIM_SERVICE_URL: &str = "SCIM_SERVICE_URL";
pub const SCIM_DISABLE_DISCOVERY: &str = "SCIM_DISABLE_DISCOVERY";
pub const SCIM_DISABLE_ETAG: &str = "SCIM_DISABLE_ETAG";
pub const SCIM_IGNORE_REDIRECTS: &str = "SCIM_IGNORE_REDIRECTS";

/// Settings resolved once when a [`Client`] is built.
///
/// The only way to obtain one is through [`ClientConfig::new`] or
/// [`ClientConfig::from_lookup`], so `service_url` is always a non-empty,
/// absolute URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    service_url: String,
    disable_discovery: bool,
    disable_etag: bool,
    ignore_redirects: bool,
}

/// A single configuration change, see [`disable_discovery`],
/// [`disable_etag`] and [`ignore_redirects`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClientOpt {
    DisableDiscovery(bool),
    DisableEtag(bool),
    IgnoreRedirects(bool),
}

impl ClientOpt {
    fn apply(self, config: &mut ClientConfig) {
        match self {
            ClientOpt::DisableDiscovery(value) => {
                config.disable_discovery = value
            }
            ClientOpt::DisableEtag(value) => config.disable_etag = value,
            ClientOpt::IgnoreRedirects(value) => {
                config.ignore_redirects = value
            }
        }
    }
}

/// Do not fetch the provider's ServiceProviderConfig
pub fn disable_discovery(value: bool) -> ClientOpt {
    ClientOpt::DisableDiscovery(value)
}

/// Never send `If-Match` preconditions
pub fn disable_etag(value: bool) -> ClientOpt {
    ClientOpt::DisableEtag(value)
}

/// Surface 3xx responses instead of following them
pub fn ignore_redirects(value: bool) -> ClientOpt {
    ClientOpt::IgnoreRedirects(value)
}

impl ClientConfig {
    /// Validate `service_url` and apply `opts` in order. Later options win
    /// over earlier ones for the same setting.
    pub fn new<I>(service_url: &str, opts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ClientOpt>,
    {
        let service_url =
            service_url.strip_suffix('/').unwrap_or(service_url);

        if service_url.is_empty() {
            return Err(ConfigError::NoServiceUrl);
        }

        url::Url::parse(service_url).map_err(ConfigError::InvalidServiceUrl)?;

        let mut config = ClientConfig {
            service_url: service_url.to_string(),
            disable_discovery: false,
            disable_etag: false,
            ignore_redirects: false,
        };

        for opt in opts {
            opt.apply(&mut config);
        }

        Ok(config)
    }

    /// Absolute URL of the SCIM service, without a trailing slash
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn disable_discovery(&self) -> bool {
        self.disable_discovery
    }

    pub fn disable_etag(&self) -> bool {
        self.disable_etag
    }

    pub fn ignore_redirects(&self) -> bool {
        self.ignore_redirects
    }

    /// Read the configuration from the `SCIM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with `lookup` standing in for the
    /// process environment. A flag is set only by the literal `"true"`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|v| v == "true");

        let service_url = lookup(SCIM_SERVICE_URL).unwrap_or_default();

        Self::new(
            &service_url,
            [
                disable_discovery(flag(SCIM_DISABLE_DISCOVERY)),
                disable_etag(flag(SCIM_DISABLE_ETAG)),
                ignore_redirects(flag(SCIM_IGNORE_REDIRECTS)),
            ],
        )
    }
}
