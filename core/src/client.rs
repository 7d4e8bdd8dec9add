// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use std::io::Read;

use http::header::ACCEPT;
use http::header::CONTENT_TYPE;
use http::header::IF_MATCH;

/// Client for a single SCIM service.
///
/// A `Client` is immutable once built, so one instance can be shared between
/// threads (wrap it in an `Arc`) as long as the transport allows it.
pub struct Client<T = reqwest::blocking::Client> {
    transport: T,
    config: ClientConfig,
    log: Logger,
}

impl Client {
    /// Build a client over a reqwest transport configured from `opts`
    pub fn connect<I>(service_url: &str, opts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ClientOpt>,
    {
        let config = ClientConfig::new(service_url, opts)?;
        let transport =
            reqwest_transport(&config).map_err(ConfigError::Transport)?;

        Ok(Client::from_config(transport, config))
    }

    /// Build a client over a reqwest transport configured from the `SCIM_*`
    /// environment variables
    pub fn connect_from_env() -> Result<Self, ConfigError> {
        let config = ClientConfig::from_env()?;
        let transport =
            reqwest_transport(&config).map_err(ConfigError::Transport)?;

        Ok(Client::from_config(transport, config))
    }
}

impl<T: Transport> Client<T> {
    pub fn new<I>(
        transport: T,
        service_url: &str,
        opts: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ClientOpt>,
    {
        let config = ClientConfig::new(service_url, opts)?;
        Ok(Self::from_config(transport, config))
    }

    pub fn from_env(transport: T) -> Result<Self, ConfigError> {
        let config = ClientConfig::from_env()?;
        Ok(Self::from_config(transport, config))
    }

    pub fn from_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            log: Logger::root(slog::Discard, slog::o!()),
        }
    }

    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The absolute URL of `path` under the service URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.config.service_url(), path)
        } else {
            format!("{}/{}", self.config.service_url(), path)
        }
    }

    pub fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let request = self.request(Method::GET, path, Vec::new())?;
        self.resource_or_error(request)
    }

    /// POST `resource` to `path`, returning the resource as stored by the
    /// provider
    pub fn create<R>(&self, path: &str, resource: &R) -> Result<R, Error>
    where
        R: Resource,
    {
        let body = serde_json::to_vec(resource).map_err(CodecError::marshal)?;
        let request = self.request(Method::POST, path, body)?;
        self.resource_or_error(request)
    }

    /// PUT `resource` to `path`. Unless entity tags are disabled, the
    /// request is conditional on the provider still holding the version of
    /// `resource` that was last read.
    pub fn replace<R>(&self, path: &str, resource: &R) -> Result<R, Error>
    where
        R: Resource,
    {
        let body = serde_json::to_vec(resource).map_err(CodecError::marshal)?;
        let mut request = self.request(Method::PUT, path, body)?;
        self.etag(resource, &mut request);
        self.resource_or_error(request)
    }

    pub fn delete(&self, path: &str) -> Result<(), Error> {
        let request = self.request(Method::DELETE, path, Vec::new())?;
        self.status_or_error(request)
    }

    /// Set `If-Match` on `request` to the version of `resource`. Nothing is
    /// set when entity tags are disabled or the resource has no version.
    pub fn etag<R, B>(&self, resource: &R, request: &mut Request<B>)
    where
        R: Resource,
    {
        if self.config.disable_etag() {
            return;
        }

        let Some(version) = resource.version().filter(|v| !v.is_empty())
        else {
            return;
        };

        match HeaderValue::from_str(version) {
            Ok(value) => {
                request.headers_mut().insert(IF_MATCH, value);
            }

            Err(e) => {
                debug!(
                    self.log,
                    "resource version is not a valid header value";
                    "version" => %version,
                    "error" => %e
                );
            }
        }
    }

    /// Execute `request` and decode a 2xx response body into `R`.
    pub fn resource_or_error<R>(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let method = request.method().clone();
        let url = request.uri().to_string();

        let response = self.dispatch(request)?;

        if !response.status.is_success() {
            return Err(self.error(response));
        }

        let Some(body) = response.body else {
            return Err(Error::NoBody);
        };

        let body = read_body(body).map_err(|e| TransportError {
            method,
            url,
            source: e.into(),
        })?;

        match serde_json::from_slice(&body) {
            Ok(resource) => Ok(resource),
            Err(e) => Err(CodecError::unmarshal(e, body).into()),
        }
    }

    /// Execute `request` where a 2xx response carries nothing of interest,
    /// e.g. a DELETE answered with 204. The body is still read to the end,
    /// and a read failure is a transport error.
    pub fn status_or_error(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<(), Error> {
        let method = request.method().clone();
        let url = request.uri().to_string();

        let response = self.dispatch(request)?;

        if !response.status.is_success() {
            return Err(self.error(response));
        }

        if let Some(body) = response.body {
            read_body(body).map_err(|e| TransportError {
                method,
                url,
                source: e.into(),
            })?;
        }

        Ok(())
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        body: Vec<u8>,
    ) -> Result<Request<Vec<u8>>, TransportError> {
        let url = self.url(path);

        Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .body(body)
            .map_err(|e| TransportError { method, url, source: e.into() })
    }

    fn dispatch(
        &self,
        mut request: Request<Vec<u8>>,
    ) -> Result<TransportResponse, TransportError> {
        negotiate_content(&mut request);

        let method = request.method().clone();
        let url = request.uri().to_string();

        debug!(self.log, "sending request"; "method" => %method, "url" => %url);

        match self.transport.round_trip(request) {
            Ok(response) => {
                debug!(
                    self.log,
                    "received response";
                    "method" => %method,
                    "url" => %url,
                    "status" => response.status.as_u16()
                );
                Ok(response)
            }

            Err(source) => Err(TransportError { method, url, source }),
        }
    }

    /// Classify a non-2xx response. A body that is a SCIM error wins over
    /// the generic HTTP error.
    fn error(&self, response: TransportResponse) -> Error {
        let TransportResponse { status, status_text, body, .. } = response;

        let body = match body {
            None => None,

            Some(body) => match read_body(body) {
                Ok(body) => Some(body),

                Err(e) => {
                    debug!(
                        self.log,
                        "reading error response body failed";
                        "status" => status.as_u16(),
                        "error" => %e
                    );
                    None
                }
            },
        };

        if let Some(error) = body.as_deref().and_then(ErrorResponse::from_body)
        {
            return Error::Scim(error);
        }

        Error::Http(HttpError {
            code: status.as_u16(),
            description: status_text,
            body,
        })
    }
}

fn negotiate_content<B>(request: &mut Request<B>) {
    let headers = request.headers_mut();
    headers.insert(ACCEPT, HeaderValue::from_static(SCIM_MEDIA_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(SCIM_MEDIA_TYPE));
}

/// Read `body` to the end. The body is dropped, releasing the connection,
/// whether or not reading succeeded.
fn read_body(mut body: ResponseBody) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::io::Read;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    use http::HeaderMap;
    use http::Method;
    use http::Request;
    use http::StatusCode;
    use http::header::IF_MATCH;

    use crate::Client;
    use crate::ClientConfig;
    use crate::ClientOpt;
    use crate::CodecOp;
    use crate::ConfigError;
    use crate::CommonAttributes;
    use crate::Error;
    use crate::ErrorResponse;
    use crate::Group;
    use crate::HttpError;
    use crate::Meta;
    use crate::Transport;
    use crate::TransportResponse;
    use crate::User;
    use crate::disable_etag;

    const MINUSER: &str = r#"
    {
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "id": "2819c223-7f76-453a-919d-413861904646",
        "userName": "bjensen@example.com",
        "meta": {
            "resourceType": "User",
            "created": "2010-01-23T04:56:22Z",
            "lastModified": "2011-05-13T04:42:34Z",
            "version": "W\/\"3694e05e9dff590\"",
            "location": "https://example.com/v2/Users/2819c223-7f76-453a-919d-413861904646"
        }
    }
    "#;

    const SCIM_ERROR: &str = r#"{
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
        "scimType":"mutability",
        "detail":"Attribute 'id' is readOnly",
        "status": "400"
    }"#;

    const GROUP: &str = r#"
    {
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
        "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
        "displayName": "Tour Guides",
        "members": [
            {
                "value": "2819c223-7f76-453a-919d-413861904646",
                "$ref": "https://example.com/v2/Users/2819c223",
                "display": "Babs Jensen"
            }
        ],
        "meta": {
            "resourceType": "Group",
            "version": "W\/\"e180ee84f0671b1\""
        }
    }
    "#;

    const VERSION: &str = "W/\"3694e05e9dff590\"";

    type Respond =
        Box<dyn Fn() -> anyhow::Result<TransportResponse> + Send + Sync>;

    /// Answers every request with `respond` and records what was sent
    struct MockTransport {
        respond: Respond,
        sent: Mutex<Vec<(Method, String, HeaderMap, Vec<u8>)>>,
    }

    impl MockTransport {
        fn new<F>(respond: F) -> Self
        where
            F: Fn() -> anyhow::Result<TransportResponse>
                + Send
                + Sync
                + 'static,
        {
            Self { respond: Box::new(respond), sent: Mutex::new(vec![]) }
        }

        fn sent_headers(&self) -> Vec<HeaderMap> {
            self.sent.lock().unwrap().iter().map(|s| s.2.clone()).collect()
        }
    }

    impl Transport for MockTransport {
        fn round_trip(
            &self,
            request: Request<Vec<u8>>,
        ) -> anyhow::Result<TransportResponse> {
            let (parts, body) = request.into_parts();
            self.sent.lock().unwrap().push((
                parts.method,
                parts.uri.to_string(),
                parts.headers,
                body,
            ));
            (self.respond)()
        }
    }

    /// A body that fails on the first read
    struct BrokenBody;

    impl Read for BrokenBody {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("connection reset"))
        }
    }

    /// A body that records when it is dropped
    struct TrackedBody {
        inner: Cursor<Vec<u8>>,
        dropped: Arc<AtomicBool>,
    }

    impl Read for TrackedBody {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for TrackedBody {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    fn client<F>(respond: F) -> Client<MockTransport>
    where
        F: Fn() -> anyhow::Result<TransportResponse> + Send + Sync + 'static,
    {
        Client::new(
            MockTransport::new(respond),
            "https://example.com/scim",
            Vec::<ClientOpt>::new(),
        )
        .unwrap()
    }

    fn bad_request() -> TransportResponse {
        TransportResponse::new(StatusCode::BAD_REQUEST)
            .with_status_text("Bad request")
    }

    fn get_user(client: &Client<MockTransport>) -> Result<User, Error> {
        let request = Request::builder()
            .uri("https://example.com/scim/Users/2819c223")
            .body(Vec::new())
            .unwrap();

        client.resource_or_error(request)
    }

    fn versioned_user(version: &str) -> User {
        User {
            common: CommonAttributes {
                meta: Meta {
                    version: Some(version.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_protocol_error() {
        let client = client(|| Err(anyhow::anyhow!("Protocol Error")));

        let error = get_user(&client).unwrap_err();

        let Error::Transport(error) = error else {
            panic!("expected a transport error, got {error:?}");
        };
        assert_eq!(error.method, Method::GET);
        assert_eq!(error.url, "https://example.com/scim/Users/2819c223");
        assert_eq!(error.source.to_string(), "Protocol Error");
    }

    #[test]
    fn test_http_error_no_body() {
        let client = client(|| Ok(bad_request()));

        let error = get_user(&client).unwrap_err();

        assert!(matches!(
            error,
            Error::Http(HttpError { code: 400, ref description, body: None })
                if description == "Bad request"
        ));
    }

    #[test]
    fn test_http_error_with_empty_body() {
        let client = client(|| Ok(bad_request().with_body(Cursor::new(""))));

        let error = get_user(&client).unwrap_err();

        assert!(matches!(
            error,
            Error::Http(HttpError { code: 400, body: Some(ref body), .. })
                if body.is_empty()
        ));
    }

    #[test]
    fn test_http_error_with_body() {
        let client = client(|| {
            Ok(bad_request().with_body(Cursor::new("Response body")))
        });

        let error = get_user(&client).unwrap_err();

        let Error::Http(error) = error else {
            panic!("expected an HTTP error, got {error:?}");
        };
        assert_eq!(
            error,
            HttpError {
                code: 400,
                description: String::from("Bad request"),
                body: Some(b"Response body".to_vec()),
            }
        );
    }

    #[test]
    fn test_http_error_keeps_raw_bytes() {
        let client = client(|| {
            Ok(bad_request().with_body(Cursor::new(vec![0xff, b'a'])))
        });

        let error = get_user(&client).unwrap_err();

        let Error::Http(error) = error else {
            panic!("expected an HTTP error, got {error:?}");
        };
        assert_eq!(error.body, Some(vec![0xff, b'a']));
        assert_eq!(error.body_text().as_deref(), Some("\u{fffd}a"));
    }

    #[test]
    fn test_scim_error_response() {
        let client =
            client(|| Ok(bad_request().with_body(Cursor::new(SCIM_ERROR))));

        let error = get_user(&client).unwrap_err();

        let Error::Scim(error) = error else {
            panic!("expected a SCIM error, got {error:?}");
        };
        assert_eq!(
            error,
            ErrorResponse {
                schemas: vec![String::from(
                    "urn:ietf:params:scim:api:messages:2.0:Error"
                )],
                scim_type: Some(String::from("mutability")),
                detail: Some(String::from("Attribute 'id' is readOnly")),
                status: String::from("400"),
            }
        );
    }

    #[test]
    fn test_json_error_without_scim_schema_is_http_error() {
        let client = client(|| {
            Ok(bad_request()
                .with_body(Cursor::new(r#"{"status":"400","detail":"nope"}"#)))
        });

        let error = get_user(&client).unwrap_err();

        assert!(matches!(
            error,
            Error::Http(HttpError { code: 400, body: Some(_), .. })
        ));
    }

    #[test]
    fn test_unreadable_error_body_is_http_error_without_body() {
        let client = client(|| Ok(bad_request().with_body(BrokenBody)));

        let error = get_user(&client).unwrap_err();

        assert!(matches!(
            error,
            Error::Http(HttpError { code: 400, body: None, .. })
        ));
    }

    #[test]
    fn test_no_body() {
        let client = client(|| Ok(TransportResponse::new(StatusCode::OK)));

        let error = get_user(&client).unwrap_err();

        assert!(matches!(error, Error::NoBody));
        assert_eq!(error.to_string(), "<No body>");
    }

    #[test]
    fn test_bad_json() {
        let client = client(|| {
            Ok(TransportResponse::new(StatusCode::OK)
                .with_body(Cursor::new("}")))
        });

        let error = get_user(&client).unwrap_err();

        let expected = serde_json::from_slice::<User>(b"}").unwrap_err();
        let Error::Codec(error) = error else {
            panic!("expected a codec error, got {error:?}");
        };
        assert_eq!(error.op, CodecOp::Unmarshal);
        assert_eq!(error.message, expected.to_string());
        assert_eq!(error.body, b"}".to_vec());
    }

    #[test]
    fn test_unreadable_success_body_is_transport_error() {
        let client = client(|| {
            Ok(TransportResponse::new(StatusCode::OK).with_body(BrokenBody))
        });

        let error = get_user(&client).unwrap_err();

        let Error::Transport(error) = error else {
            panic!("expected a transport error, got {error:?}");
        };
        assert_eq!(error.source.to_string(), "connection reset");
    }

    #[test]
    fn test_correct() {
        let client = client(|| {
            Ok(TransportResponse::new(StatusCode::OK)
                .with_body(Cursor::new(MINUSER)))
        });

        let user = get_user(&client).unwrap();

        assert_eq!(user.name, "bjensen@example.com");
        assert_eq!(user.common.meta.version.as_deref(), Some(VERSION));

        // Decoding is deterministic
        let again = get_user(&client).unwrap();
        assert_eq!(user, again);
    }

    #[test]
    fn test_content_negotiation_on_every_outcome() {
        let responses: [fn() -> anyhow::Result<TransportResponse>; 5] = [
            || Err(anyhow::anyhow!("Protocol Error")),
            || Ok(bad_request()),
            || Ok(TransportResponse::new(StatusCode::OK)),
            || {
                Ok(TransportResponse::new(StatusCode::OK)
                    .with_body(Cursor::new("}")))
            },
            || {
                Ok(TransportResponse::new(StatusCode::OK)
                    .with_body(Cursor::new(MINUSER)))
            },
        ];

        for respond in responses {
            let client = client(respond);
            let _ = get_user(&client);

            let sent = client.transport().sent_headers();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0]["accept"], "application/scim+json");
            assert_eq!(sent[0]["content-type"], "application/scim+json");
        }
    }

    #[test]
    fn test_bodies_are_released() {
        for status in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let dropped = Arc::new(AtomicBool::new(false));
            let flag = dropped.clone();

            let client = client(move || {
                Ok(TransportResponse::new(status).with_body(TrackedBody {
                    inner: Cursor::new(b"}".to_vec()),
                    dropped: flag.clone(),
                }))
            });

            assert!(get_user(&client).is_err());
            assert!(dropped.load(Ordering::SeqCst), "status {status}");
        }
    }

    #[test]
    fn test_etag() {
        let user = versioned_user(VERSION);

        for disabled in [true, false] {
            let client = Client::new(
                MockTransport::new(|| Ok(bad_request())),
                "https://example.com/scim",
                [disable_etag(disabled)],
            )
            .unwrap();

            let mut request = Request::builder().body(()).unwrap();
            client.etag(&user, &mut request);

            if disabled {
                assert!(!request.headers().contains_key(IF_MATCH));
                continue;
            }

            let values: Vec<_> =
                request.headers().get_all(IF_MATCH).iter().collect();
            assert_eq!(values, vec![VERSION]);
        }
    }

    #[test]
    fn test_etag_without_version() {
        let client = client(|| Ok(bad_request()));

        for user in [User::default(), versioned_user("")] {
            let mut request = Request::builder().body(()).unwrap();
            client.etag(&user, &mut request);
            assert!(!request.headers().contains_key(IF_MATCH));
        }

        // Not representable as a header value
        let mut request = Request::builder().body(()).unwrap();
        client.etag(&versioned_user("W/\"a\nb\""), &mut request);
        assert!(!request.headers().contains_key(IF_MATCH));
    }

    #[test]
    fn test_replace_sends_if_match() {
        let client = client(|| {
            Ok(TransportResponse::new(StatusCode::OK)
                .with_body(Cursor::new(MINUSER)))
        });

        let mut user = versioned_user(VERSION);
        user.name = String::from("bjensen@example.com");

        let replaced = client.replace("/Users/2819c223", &user).unwrap();
        assert_eq!(replaced.name, "bjensen@example.com");

        let sent = client.transport().sent.lock().unwrap();
        let (method, url, headers, body) = &sent[0];
        assert_eq!(*method, Method::PUT);
        assert_eq!(url, "https://example.com/scim/Users/2819c223");
        assert_eq!(headers[IF_MATCH], VERSION);

        let body: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(body["userName"], "bjensen@example.com");
    }

    #[test]
    fn test_delete() {
        let deleted = client(|| {
            Ok(TransportResponse::new(StatusCode::NO_CONTENT)
                .with_body(Cursor::new("")))
        });
        deleted.delete("Users/2819c223").unwrap();

        let sent = deleted.transport().sent.lock().unwrap();
        assert_eq!(sent[0].0, Method::DELETE);
        assert_eq!(sent[0].1, "https://example.com/scim/Users/2819c223");
        drop(sent);

        let missing = client(|| {
            Ok(TransportResponse::new(StatusCode::NOT_FOUND).with_body(
                Cursor::new(
                    serde_json::to_vec(&ErrorResponse::not_found(
                        String::from("2819c223"),
                    ))
                    .unwrap(),
                ),
            ))
        });
        let error = missing.delete("/Users/2819c223").unwrap_err();
        assert!(matches!(error, Error::Scim(_)));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_delete_with_unreadable_body_is_transport_error() {
        let client = client(|| {
            Ok(TransportResponse::new(StatusCode::OK).with_body(BrokenBody))
        });

        let error = client.delete("/Users/2819c223").unwrap_err();

        let Error::Transport(error) = error else {
            panic!("expected a transport error, got {error:?}");
        };
        assert_eq!(error.method, Method::DELETE);
        assert_eq!(error.url, "https://example.com/scim/Users/2819c223");
        assert_eq!(error.source.to_string(), "connection reset");
    }

    #[test]
    fn test_only_validated_configs_reach_a_client() {
        let transport = || MockTransport::new(|| Ok(bad_request()));
        let none = Vec::<ClientOpt>::new;

        let error = Client::new(transport(), "", none()).err().unwrap();
        assert!(matches!(error, ConfigError::NoServiceUrl));

        let error = Client::new(transport(), "/", none()).err().unwrap();
        assert!(matches!(error, ConfigError::NoServiceUrl));

        let error = Client::new(transport(), "scim/v2", none()).err().unwrap();
        assert!(matches!(error, ConfigError::InvalidServiceUrl(_)));

        let config =
            ClientConfig::new("https://example.com/scim/", none()).unwrap();
        let client = Client::from_config(transport(), config);
        assert_eq!(client.url("Users"), "https://example.com/scim/Users");
    }

    #[test]
    fn test_group_round_trip() {
        let client = client(|| {
            Ok(TransportResponse::new(StatusCode::OK)
                .with_body(Cursor::new(GROUP)))
        });

        let group: Group = client.get("/Groups/e9e30dba").unwrap();
        assert_eq!(group.display_name, "Tour Guides");
        assert_eq!(group.members.as_ref().map(Vec::len), Some(1));

        let replaced = client.replace("/Groups/e9e30dba", &group).unwrap();
        assert_eq!(replaced, group);

        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent[1].0, Method::PUT);
        assert_eq!(sent[1].2[IF_MATCH], "W/\"e180ee84f0671b1\"");
    }

    #[test]
    fn test_shared_between_threads() {
        let client = Arc::new(client(|| {
            Ok(TransportResponse::new(StatusCode::OK)
                .with_body(Cursor::new(MINUSER)))
        }));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let client = client.clone();
                std::thread::spawn(move || get_user(&client).unwrap())
            })
            .collect();

        let users: Vec<User> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(users.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(client.transport().sent_headers().len(), 4);
    }
}
