//! Error types for the hero API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant so callers can tell "the hero does not
//! exist" apart from "the server returned an unexpected status." All other
//! non-2xx responses land in `HttpError` with the raw status code and body.
//! `Transport` covers failures where no response arrived at all.

/// Errors returned by `HeroClient` parse methods and `Transport` impls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}
