//! Symbolic endpoints and their resolution into request descriptors.
//!
//! # Design
//! Each operation the backend supports is one `Endpoint` variant carrying
//! only what is needed to resolve it. `Endpoint::resolve` is pure: it never
//! performs I/O and never fails loudly. A URL that cannot be built is
//! reported as `None` and left for the network service to reject.

use url::Url;

use crate::http::{HttpMethod, HttpRequest};
use crate::types::CandidateRequest;

/// An operation against the candidate API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ListCandidates,
    GetCandidate(String),
    CreateCandidate(CandidateRequest),
    UpdateCandidate(String, CandidateRequest),
    DeleteCandidate(String),
    ToggleFavorite(String),
}

impl Endpoint {
    pub fn get_candidate(id: impl Into<String>) -> Self {
        Self::GetCandidate(id.into())
    }

    pub fn update_candidate(id: impl Into<String>, payload: CandidateRequest) -> Self {
        Self::UpdateCandidate(id.into(), payload)
    }

    pub fn delete_candidate(id: impl Into<String>) -> Self {
        Self::DeleteCandidate(id.into())
    }

    pub fn toggle_favorite(id: impl Into<String>) -> Self {
        Self::ToggleFavorite(id.into())
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::ListCandidates | Endpoint::GetCandidate(_) => HttpMethod::Get,
            Endpoint::CreateCandidate(_) => HttpMethod::Post,
            Endpoint::UpdateCandidate(..) | Endpoint::ToggleFavorite(_) => HttpMethod::Put,
            Endpoint::DeleteCandidate(_) => HttpMethod::Delete,
        }
    }

    /// Every candidate operation touches a protected resource.
    pub fn requires_authentication(&self) -> bool {
        match self {
            Endpoint::ListCandidates
            | Endpoint::GetCandidate(_)
            | Endpoint::CreateCandidate(_)
            | Endpoint::UpdateCandidate(..)
            | Endpoint::DeleteCandidate(_)
            | Endpoint::ToggleFavorite(_) => true,
        }
    }

    /// The path relative to the base URL, or `None` if an id cannot be used
    /// as a single path segment.
    fn path(&self) -> Option<String> {
        match self {
            Endpoint::ListCandidates | Endpoint::CreateCandidate(_) => Some("/candidate".to_string()),
            Endpoint::GetCandidate(id)
            | Endpoint::UpdateCandidate(id, _)
            | Endpoint::DeleteCandidate(id) => segment(id).map(|id| format!("/candidate/{id}")),
            Endpoint::ToggleFavorite(id) => segment(id).map(|id| format!("/candidate/{id}/favorite")),
        }
    }

    /// JSON body for create and update; `None` for everything else.
    pub fn body(&self) -> Option<Vec<u8>> {
        match self {
            Endpoint::CreateCandidate(payload) | Endpoint::UpdateCandidate(_, payload) => {
                serde_json::to_vec(payload).ok()
            }
            _ => None,
        }
    }

    /// Build the absolute URL for this endpoint under `base_url`.
    ///
    /// The id is interpolated verbatim. If the URL parser had to rewrite the
    /// resulting path (escaping, dot segments) or the id leaked into the
    /// query or fragment, the URL is rejected.
    pub fn url(&self, base_url: &str) -> Option<Url> {
        let base = Url::parse(base_url).ok()?;
        if base.cannot_be_a_base() || base.query().is_some() || base.fragment().is_some() {
            return None;
        }
        let path = self.path()?;
        let prefix = base.path().trim_end_matches('/');
        let raw = format!("{}{path}", base.as_str().trim_end_matches('/'));
        let url = Url::parse(&raw).ok()?;

        let untouched = url.path() == format!("{prefix}{path}")
            && url.query().is_none()
            && url.fragment().is_none();
        untouched.then_some(url)
    }

    /// Resolve into a request descriptor.
    pub fn resolve(&self, base_url: &str) -> HttpRequest {
        HttpRequest {
            url: self.url(base_url),
            method: self.method(),
            body: self.body(),
            requires_authentication: self.requires_authentication(),
        }
    }
}

fn segment(id: &str) -> Option<&str> {
    if id.is_empty() || id.contains('/') {
        None
    } else {
        Some(id)
    }
}
