pub const ERROR_URN: &str = "urn:ietf:params:scim:api:messages:2.0:Error";
pub const GROUP_URN: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const USER_URN: &str = "urn:ietf:params:scim:schemas:core:2.0:User";

/// The media type for SCIM messages, RFC 7644 § 3.1
pub const SCIM_MEDIA_TYPE: &str = "application/scim+json";
