// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use unicase::UniCase;

/// The SCIM error types specified in RFC 7644, section 3.12
// RFC 7644, section 3.12:  HTTP Status and Error Response Handling
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorType {
    InvalidFilter,
    TooMany,
    Uniqueness,
    Mutability,
    InvalidSyntax,
    InvalidPath,
    NoTarget,
    InvalidValue,
    InvalidVers,
    Sensitive,
}

impl std::str::FromStr for ErrorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalidFilter" => Ok(ErrorType::InvalidFilter),
            "tooMany" => Ok(ErrorType::TooMany),
            "uniqueness" => Ok(ErrorType::Uniqueness),
            "mutability" => Ok(ErrorType::Mutability),
            "invalidSyntax" => Ok(ErrorType::InvalidSyntax),
            "invalidPath" => Ok(ErrorType::InvalidPath),
            "noTarget" => Ok(ErrorType::NoTarget),
            "invalidValue" => Ok(ErrorType::InvalidValue),
            "invalidVers" => Ok(ErrorType::InvalidVers),
            "sensitive" => Ok(ErrorType::Sensitive),
            _ => Err(format!("{s} not a valid scimType")),
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            ErrorType::InvalidFilter => "invalidFilter",
            ErrorType::TooMany => "tooMany",
            ErrorType::Uniqueness => "uniqueness",
            ErrorType::Mutability => "mutability",
            ErrorType::InvalidSyntax => "invalidSyntax",
            ErrorType::InvalidPath => "invalidPath",
            ErrorType::NoTarget => "noTarget",
            ErrorType::InvalidValue => "invalidValue",
            ErrorType::InvalidVers => "invalidVers",
            ErrorType::Sensitive => "sensitive",
        };

        write!(f, "{s}")
    }
}

/// The SCIM error format is specified in RFC 7644, section 3.12
///
/// `scimType` is kept as the raw string the provider sent so that
/// non-standard error types survive decoding; see [`ErrorResponse::error_type`]
/// for the typed view.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub schemas: Vec<String>,

    #[serde(deserialize_with = "deserialize_status")]
    pub status: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scim_type: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(
        status: StatusCode,
        error_type: Option<ErrorType>,
        detail: String,
    ) -> Self {
        Self {
            schemas: vec![String::from(ERROR_URN)],
            status: status.as_str().to_string(),
            scim_type: error_type.map(|t| t.to_string()),
            detail: Some(detail),
        }
    }

    pub fn invalid_syntax(detail: String) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            Some(ErrorType::InvalidSyntax),
            detail,
        )
    }

    pub fn not_found(id: String) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            None,
            format!("Resource {id} not found"),
        )
    }

    pub fn conflict(identifier: String) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            Some(ErrorType::Uniqueness),
            format!("Resource matching {identifier} exists already"),
        )
    }

    pub fn precondition_failed(version: String) -> Self {
        Self::new(
            StatusCode::PRECONDITION_FAILED,
            None,
            format!("Resource has changed on the server, version {version}"),
        )
    }

    /// Decode `body` as a SCIM error. `None` unless the body is JSON of the
    /// right shape and names the SCIM error schema.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let error: ErrorResponse = serde_json::from_slice(body).ok()?;

        let error_urn = UniCase::new(ERROR_URN);
        if error.schemas.iter().any(|s| UniCase::new(s.as_str()) == error_urn)
        {
            Some(error)
        } else {
            None
        }
    }

    pub fn status(&self) -> Result<u16, std::num::ParseIntError> {
        self.status.parse()
    }

    /// `None` when the provider omitted `scimType` or sent one that RFC 7644
    /// does not define.
    pub fn error_type(&self) -> Option<ErrorType> {
        self.scim_type.as_deref().and_then(|t| t.parse().ok())
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SCIM error {}", self.status)?;

        if let Some(scim_type) = &self.scim_type {
            write!(f, " ({scim_type})")?;
        }

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}
