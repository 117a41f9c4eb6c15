//! Response decoding shared by every `NetworkService` implementation.

use serde::de::DeserializeOwned;

use crate::error::NetworkError;

/// Decode a JSON body into `T`.
///
/// A mismatch is always a `DecodingError`; no default value is substituted.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, NetworkError> {
    serde_json::from_slice(body).map_err(NetworkError::from)
}
