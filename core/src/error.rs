//! Error types for the irrigation controller API client.
//!
//! # Design
//! Two layers of failure exist: the HTTP layer (non-2xx statuses, with 401
//! and 404 pulled out into dedicated variants because callers branch on
//! them), and the controller's own in-body status codes, which every command
//! reply carries even on HTTP 200. `ApiError` covers the first layer plus
//! client-side input validation; the second layer is interpreted by
//! `ApiStatus`/`ControllerStatus` in the types module.

use std::fmt;

/// Errors returned by `SprinklerClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 401 — no token attached, or the token expired.
    NotAuthenticated,

    /// The server returned 404 — the zone, program, or parser does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 401/404.
    Http { status: u16, body: String },

    /// The input was rejected client-side before a request was built
    /// (e.g. a provision update naming neither system nor location).
    InvalidRequest,

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotAuthenticated => write!(f, "not authenticated"),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::InvalidRequest => write!(f, "invalid request"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
