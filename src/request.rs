//! Minimal view of an inbound request used to build request reports.

use std::collections::HashMap;

/// Request-like input: a URL, a method and a header lookup by lowercase name.
pub trait RequestLike {
    fn url(&self) -> Option<&str>;
    fn method(&self) -> Option<&str>;
    fn header(&self, name: &str) -> Option<&str>;
}

impl<R: RequestLike + ?Sized> RequestLike for &R {
    fn url(&self) -> Option<&str> {
        (**self).url()
    }

    fn method(&self) -> Option<&str> {
        (**self).method()
    }

    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMetaError {
    MissingField(&'static str),
}

impl std::fmt::Display for RequestMetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestMetaError::MissingField(field) => {
                write!(f, "request is missing required field: {}", field)
            }
        }
    }
}

impl std::error::Error for RequestMetaError {}

/// Header value if present and non-empty, otherwise `default`.
pub fn get_header_or_default<R: RequestLike + ?Sized>(
    req: &R,
    name: &str,
    default: &str,
) -> String {
    match req.header(name) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// Owned request description for callers without an HTTP request type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    pub url: Option<String>,
    pub method: Option<String>,
    headers: HashMap<String, String>,
}

impl RequestParts {
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            method: Some(method.into()),
            headers: HashMap::new(),
        }
    }

    /// Add a header. Names are stored lowercase.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    /// Copy method, path and headers out of `http` request parts.
    ///
    /// Repeated headers are joined with `", "`, so every `x-forwarded-for` hop
    /// survives.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_http(parts: &axum::http::request::Parts) -> Self {
        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in &parts.headers {
            let Ok(value) = value.to_str() else {
                continue;
            };
            headers
                .entry(name.as_str().to_string())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        Self {
            url: Some(uri_path(&parts.uri).to_string()),
            method: Some(parts.method.as_str().to_string()),
            headers,
        }
    }
}

impl RequestLike for RequestParts {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

// Path and query only, the way server frameworks expose `req.url`.
#[cfg(not(target_arch = "wasm32"))]
fn uri_path(uri: &axum::http::Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

// Borrowed header lookups return only the first value of a repeated header.
// Use `RequestParts::from_http` when every value matters.
#[cfg(not(target_arch = "wasm32"))]
impl<B> RequestLike for axum::http::Request<B> {
    fn url(&self) -> Option<&str> {
        Some(uri_path(self.uri()))
    }

    fn method(&self) -> Option<&str> {
        Some(self.method().as_str())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RequestLike for axum::http::request::Parts {
    fn url(&self) -> Option<&str> {
        Some(uri_path(&self.uri))
    }

    fn method(&self) -> Option<&str> {
        Some(self.method.as_str())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
