//! Production `NetworkService` backed by reqwest.
//!
//! # Design
//! `HttpNetworkService` holds the base URL, a reusable `reqwest::Client` and
//! the bearer token. The token lives in an `ArcSwapOption` so `set_token`
//! needs no lock; each call takes one snapshot of it before resolving and
//! never looks at it again.

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::config::{ClientConfig, ConfigError};
use crate::decode::decode;
use crate::endpoint::Endpoint;
use crate::error::NetworkError;
use crate::http::HttpResponse;
use crate::service::{gate, NetworkService};
use crate::types::ErrorBody;

const GENERIC_SERVER_ERROR: &str = "Erreur serveur";
const UNREACHABLE_SERVER: &str = "Impossible de contacter le serveur";

pub struct HttpNetworkService {
    client: reqwest::Client,
    base_url: String,
    token: ArcSwapOption<String>,
}

impl HttpNetworkService {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Wrap an existing reqwest client, e.g. one shared with other services.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: ArcSwapOption::empty(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    /// Resolve, gate and send `endpoint`, returning the raw 2xx response.
    async fn execute(&self, endpoint: &Endpoint) -> Result<HttpResponse, NetworkError> {
        let request = endpoint.resolve(&self.base_url);
        let token = self.token.load_full();

        let url = gate(&request, token.as_deref().map(String::as_str))
            .map_err(|err| {
                warn!(method = request.method.as_str(), error = %err, "request rejected before sending");
                err
            })?
            .clone();
        debug!(method = request.method.as_str(), url = %url, "sending request");

        let mut builder = self.client.request(request.method.into(), url.clone());
        if let Some(token) = token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        let response = HttpResponse { status, body };
        check_status(&response).map_err(|err| {
            warn!(status, url = %url, error = %err, "server returned an error");
            err
        })?;
        Ok(response)
    }
}

#[async_trait]
impl NetworkService for HttpNetworkService {
    fn set_token(&self, token: String) {
        self.token.store(Some(Arc::new(token)));
    }

    async fn request<T>(&self, endpoint: Endpoint) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let response = self.execute(&endpoint).await?;
        decode(&response.body)
    }

    async fn request_without_response(&self, endpoint: Endpoint) -> Result<(), NetworkError> {
        self.execute(&endpoint).await.map(|_| ())
    }
}

/// Map non-success status codes to the appropriate `NetworkError` variant.
fn check_status(response: &HttpResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 401 {
        return Err(NetworkError::Unauthorized);
    }
    Err(NetworkError::ServerError(response.status, server_message(&response.body)))
}

/// Pull the human-readable message out of an error payload, if there is one.
fn server_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map(|payload| payload.message)
        .ok()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string())
}

fn transport_error(err: reqwest::Error) -> NetworkError {
    error!(error = %err, "transport failure");
    let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
    NetworkError::ServerError(status, UNREACHABLE_SERVER.to_string())
}
