//! The network service contract.
//!
//! # Design
//! Callers depend on `NetworkService` and receive a concrete implementation
//! at construction time: `HttpNetworkService` in production,
//! `MockNetworkService` in tests. Both run the same pipeline
//! (resolve, gate on the token, fetch, decode) and report failures with the
//! same `NetworkError` variants.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::NetworkError;
use crate::http::HttpRequest;

#[async_trait]
pub trait NetworkService: Send + Sync {
    /// Store the bearer token used by subsequent calls, replacing any
    /// previous one. Calls already in flight keep the token they started with.
    fn set_token(&self, token: String);

    /// Execute `endpoint` and decode the response body into `T`.
    async fn request<T>(&self, endpoint: Endpoint) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send + 'static;

    /// Execute `endpoint` and discard the response body.
    async fn request_without_response(&self, endpoint: Endpoint) -> Result<(), NetworkError>;
}

/// The gating stages every implementation runs before touching a response:
/// the URL must have resolved, and an authenticated endpoint needs a token.
pub(crate) fn gate<'a>(
    request: &'a HttpRequest,
    token: Option<&str>,
) -> Result<&'a Url, NetworkError> {
    let url = request.url.as_ref().ok_or(NetworkError::InvalidUrl)?;
    if request.requires_authentication && token.is_none() {
        return Err(NetworkError::MissingToken);
    }
    Ok(url)
}
