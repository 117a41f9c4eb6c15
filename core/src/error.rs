//! Error types for the candidate network layer.
//!
//! # Design
//! `NetworkError` is closed: every failed call produces exactly one of these
//! six variants and nothing else crosses the network-layer boundary. The
//! `Display` text is the user-facing message, so callers can surface it
//! directly without keeping their own lookup table.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Shown when an error carries no usable description at all.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Une erreur inattendue s'est produite";

/// Errors returned by every `NetworkService` operation.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// The endpoint did not resolve to a URL.
    #[error("URL invalide")]
    InvalidUrl,

    /// The endpoint requires authentication and no token is stored.
    #[error("Token d'authentification manquant")]
    MissingToken,

    /// The server rejected the bearer token (HTTP 401).
    #[error("Non autorisé")]
    Unauthorized,

    /// Transport failure or a non-2xx status. The message comes from the
    /// server's error payload when it sent one.
    #[error("{1}")]
    ServerError(u16, String),

    /// The response body did not match the requested shape.
    #[error("Erreur de décodage: {0}")]
    DecodingError(#[source] Arc<serde_json::Error>),

    #[error("Erreur inconnue")]
    Unknown,
}

impl NetworkError {
    /// User-facing message for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status carried by a `ServerError`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError(code, _) => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodingError(Arc::new(err))
    }
}

/// Map any error to the message a caller should display.
///
/// `NetworkError` values use their own message. Other errors fall back to
/// their `Display` text, and to [`UNEXPECTED_ERROR_MESSAGE`] when that text
/// is empty.
pub fn user_message(err: &(dyn StdError + 'static)) -> String {
    if let Some(network) = err.downcast_ref::<NetworkError>() {
        return network.message();
    }
    let description = err.to_string();
    if description.trim().is_empty() {
        UNEXPECTED_ERROR_MESSAGE.to_string()
    } else {
        description
    }
}
