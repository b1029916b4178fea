use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::header::{HeaderMap, IntoHeaderName, CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::Value;
use tower::util::ServiceExt;

static NULL: Value = Value::Null;

/// Drives an assembled `Router` in process, one `oneshot` call per request.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn get(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::DELETE, path)
    }

    fn request(&self, method: Method, path: &str) -> TestRequest<'_> {
        TestRequest {
            app: self,
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }
}

pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Body,
}

impl TestRequest<'_> {
    pub fn header(mut self, name: impl IntoHeaderName, value: &str) -> Self {
        let value = HeaderValue::from_str(value).expect("invalid header value");
        self.headers.insert(name, value);
        self
    }

    /// JSON body with `Content-Type: application/json`.
    pub fn json(self, body: &impl Serialize) -> Self {
        let bytes = serde_json::to_vec(body).expect("body is not serializable");
        self.header(CONTENT_TYPE, "application/json").body(bytes)
    }

    /// Urlencoded body, as a browser submits an HTML form.
    pub fn form(self, fields: &[(&str, &str)]) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encoded)
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub async fn send(self) -> TestResponse {
        let mut request = Request::builder()
            .method(self.method)
            .uri(&self.path)
            .body(self.body)
            .expect("invalid request");
        *request.headers_mut() = self.headers;

        let response = self
            .app
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .expect("unreadable response body")
            .to_bytes();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// Look up `path` in `root`.
///
/// Segments are separated by `.`; `[n]` indexes an array and a final
/// `len()` yields the length of the array, object or string reached.
/// Anything missing resolves to `Value::Null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        if segment == "len()" {
            let len = match current {
                Value::Array(items) => items.len(),
                Value::Object(fields) => fields.len(),
                Value::String(text) => text.len(),
                other => panic!("len() of a non-collection: {other}"),
            };
            return Value::from(len);
        }

        let (name, indices) = segment.split_at(segment.find('[').unwrap_or(segment.len()));
        if !name.is_empty() {
            current = current.get(name).unwrap_or(&NULL);
        }
        for index in indices.split('[').skip(1) {
            let index: usize = index
                .strip_suffix(']')
                .and_then(|i| i.parse().ok())
                .unwrap_or_else(|| panic!("bad index in JSON path {path:?}"));
            current = current.get(index).unwrap_or(&NULL);
        }
    }
    current.clone()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_created(self) -> Self {
        self.assert_status(StatusCode::CREATED)
    }

    pub fn assert_bad_request(self) -> Self {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(self.status, expected, "body: {}", self.text());
        self
    }

    /// Any 3xx whose `Location` is `location`.
    pub fn assert_redirect(self, location: &str) -> Self {
        assert!(
            self.status.is_redirection(),
            "expected a redirect, got {}: {}",
            self.status,
            self.text()
        );
        assert_eq!(self.header(LOCATION.as_str()), Some(location));
        self
    }

    /// ```ignore
    /// resp.assert_json_path("[0].firstName", "Tom")
    ///     .assert_json_path("len()", 1);
    /// ```
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let root = self.json();
        let expected = expected.into();
        assert_eq!(resolve_path(&root, path), expected, "at {path:?} in {root}");
        self
    }

    pub fn assert_contains(self, needle: &str) -> Self {
        let text = self.text();
        assert!(text.contains(needle), "{needle:?} not found in: {text}");
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
