//! Fixture-backed `NetworkService` for tests.
//!
//! # Design
//! Fixtures live in one map. `FixtureKey::Any` holds the response served for
//! every endpoint; `FixtureKey::Url` holds a response for one resolved URL
//! and wins over `Any`. Calls run the same stages as the real service, in
//! the same order, except that transport is a map lookup:
//!
//! 1. an injected failure (see [`MockNetworkService::fail_with`]) is returned
//!    for every call;
//! 2. `InvalidUrl` if the endpoint did not resolve;
//! 3. `MissingToken` if it requires authentication and no token is set;
//! 4. the fixture for the URL, else the `Any` fixture, else `Unknown`.
//!
//! Successful fixtures are decoded with the production decoder, so decode
//! failures behave exactly as they would against a real server.

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::config::DEFAULT_BASE_URL;
use crate::decode::decode;
use crate::endpoint::Endpoint;
use crate::error::NetworkError;
use crate::service::{gate, NetworkService};

/// A canned outcome: raw response bytes or the error to fail with.
pub type Fixture = Result<Vec<u8>, NetworkError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixtureKey {
    Any,
    Url(Url),
}

pub struct MockNetworkService {
    base_url: String,
    token: ArcSwapOption<String>,
    failure: ArcSwapOption<NetworkError>,
    fixtures: DashMap<FixtureKey, Fixture>,
}

impl Default for MockNetworkService {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MockNetworkService {
    /// A mock resolving endpoints under `base_url`, with no token and no
    /// fixtures.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: ArcSwapOption::empty(),
            failure: ArcSwapOption::empty(),
            fixtures: DashMap::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.load_full().map(|token| token.as_ref().clone())
    }

    pub fn clear_token(&self) {
        self.token.store(None);
    }

    /// Fail every subsequent call with `err`, whatever fixtures are loaded.
    pub fn fail_with(&self, err: NetworkError) {
        self.failure.store(Some(Arc::new(err)));
    }

    pub fn clear_failure(&self) {
        self.failure.store(None);
    }

    /// Serve `fixture` for every endpoint without a URL-specific fixture.
    pub fn respond_with(&self, fixture: Fixture) {
        self.fixtures.insert(FixtureKey::Any, fixture);
    }

    /// Serve `value`, encoded as JSON, for every endpoint.
    pub fn respond_with_json<T: Serialize>(&self, value: &T) -> Result<(), serde_json::Error> {
        let bytes = serde_json::to_vec(value)?;
        self.respond_with(Ok(bytes));
        Ok(())
    }

    /// Serve `fixture` only for the URL `endpoint` resolves to.
    ///
    /// Returns `InvalidUrl` if the endpoint does not resolve, since no call
    /// could ever reach such a fixture.
    pub fn respond_to(&self, endpoint: &Endpoint, fixture: Fixture) -> Result<(), NetworkError> {
        let url = endpoint.url(&self.base_url).ok_or(NetworkError::InvalidUrl)?;
        self.fixtures.insert(FixtureKey::Url(url), fixture);
        Ok(())
    }

    /// Serve `value`, encoded as JSON, only for `endpoint`.
    pub fn respond_to_json<T: Serialize>(&self, endpoint: &Endpoint, value: &T) -> Result<(), NetworkError> {
        let bytes = serde_json::to_vec(value).map_err(NetworkError::from)?;
        self.respond_to(endpoint, Ok(bytes))
    }

    pub fn clear_responses(&self) {
        self.fixtures.clear();
    }

    fn lookup(&self, endpoint: &Endpoint) -> Result<Vec<u8>, NetworkError> {
        if let Some(err) = self.failure.load_full() {
            return Err(err.as_ref().clone());
        }

        let request = endpoint.resolve(&self.base_url);
        let token = self.token.load_full();
        let url = gate(&request, token.as_deref().map(String::as_str))?;

        let key = FixtureKey::Url(url.clone());
        let fixture = self
            .fixtures
            .get(&key)
            .or_else(|| self.fixtures.get(&FixtureKey::Any))
            .map(|entry| entry.value().clone());

        fixture.unwrap_or(Err(NetworkError::Unknown))
    }
}

#[async_trait]
impl NetworkService for MockNetworkService {
    fn set_token(&self, token: String) {
        self.token.store(Some(Arc::new(token)));
    }

    async fn request<T>(&self, endpoint: Endpoint) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let body = self.lookup(&endpoint)?;
        decode(&body)
    }

    async fn request_without_response(&self, endpoint: Endpoint) -> Result<(), NetworkError> {
        self.lookup(&endpoint).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_fixture_takes_precedence_over_wildcard() {
        let mock = MockNetworkService::default();
        mock.set_token("t".to_string());
        mock.respond_with(Ok(b"1".to_vec()));
        mock.respond_to(&Endpoint::get_candidate("9"), Ok(b"2".to_vec()))
            .unwrap();

        assert_eq!(mock.lookup(&Endpoint::get_candidate("9")).unwrap(), b"2");
        assert_eq!(mock.lookup(&Endpoint::ListCandidates).unwrap(), b"1");
    }

    #[test]
    fn respond_to_rejects_unresolvable_endpoint() {
        let mock = MockNetworkService::default();
        let err = mock
            .respond_to(&Endpoint::get_candidate("a b"), Ok(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl));
    }

    #[test]
    fn clear_responses_drops_every_fixture() {
        let mock = MockNetworkService::default();
        mock.set_token("t".to_string());
        mock.respond_with(Ok(Vec::new()));
        mock.clear_responses();
        assert!(matches!(
            mock.lookup(&Endpoint::ListCandidates),
            Err(NetworkError::Unknown)
        ));
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let mock = MockNetworkService::default();
        assert!(mock.token().is_none());
        mock.set_token("first".to_string());
        mock.set_token("second".to_string());
        assert_eq!(mock.token().as_deref(), Some("second"));
        mock.clear_token();
        assert!(mock.token().is_none());
    }

    #[test]
    fn clear_failure_restores_fixtures() {
        let mock = MockNetworkService::default();
        mock.set_token("t".to_string());
        mock.respond_with(Ok(b"ok".to_vec()));
        mock.fail_with(NetworkError::Unauthorized);
        assert!(matches!(
            mock.lookup(&Endpoint::ListCandidates),
            Err(NetworkError::Unauthorized)
        ));
        mock.clear_failure();
        assert_eq!(mock.lookup(&Endpoint::ListCandidates).unwrap(), b"ok");
    }
}
