//! Domain DTOs for the candidate API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Optional fields are omitted from the JSON when absent, so a candidate
//! encoded here decodes back into an equal value.

use serde::{Deserialize, Serialize};

/// A candidate record returned by the API.
///
/// The `id` is assigned by the server and never changes. Every other field is
/// replaced wholesale whenever a fresh copy is fetched or an update succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "linkedinURL", default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub is_favorite: bool,
}

/// Payload for creating or updating a candidate.
///
/// Carries no `id` (it travels in the URL) and no favorite flag: favorites
/// are only changed through `Endpoint::ToggleFavorite`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "linkedinURL", default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&Candidate> for CandidateRequest {
    fn from(candidate: &Candidate) -> Self {
        Self {
            email: candidate.email.clone(),
            note: candidate.note.clone(),
            linkedin_url: candidate.linkedin_url.clone(),
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            phone: candidate.phone.clone(),
        }
    }
}

/// Error payload returned by the backend on non-2xx responses.
///
/// Backends disagree on the field name, so the common spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "reason", alias = "error")]
    pub message: String,
}
