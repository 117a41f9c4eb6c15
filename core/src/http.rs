//! HTTP request and response descriptors.
//!
//! # Design
//! `HttpRequest` is what an `Endpoint` resolves to: plain data with no I/O
//! attached. `HttpResponse` is what the transport hands back before status
//! checking and decoding. Keeping both as owned values lets the real and the
//! mock service share the same gating and decoding code.

use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A resolved endpoint, described as plain data.
///
/// `url` is `None` when resolution failed; the network service turns that
/// into `NetworkError::InvalidUrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Option<Url>,
    pub method: HttpMethod,
    pub body: Option<Vec<u8>>,
    pub requires_authentication: bool,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
