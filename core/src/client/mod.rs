//! Stateless HTTP request builder and response parser for the controller API.
//!
//! # Design
//! `SprinklerClient` holds the controller's base URL and, once authenticated,
//! the access token. It carries no other state between calls and no hidden
//! globals: the token travels with the client value the call site owns. Each
//! API operation is split into a `build_*` method that produces an
//! [`HttpRequest`] and a `parse_*` method that consumes an [`HttpResponse`];
//! the caller executes the actual round-trip. One submodule per endpoint
//! group keeps the surface navigable: auth, provision, stats, restrictions,
//! programs, zones, watering, parsers, mixer, diag, machine, dev.
//!
//! Every path is rooted at `/api/4`. Once a token is set it is attached to
//! every request as the `access_token` query parameter, which is how the
//! controller authenticates API calls.

mod auth;
mod dev;
mod diag;
mod machine;
mod mixer;
mod parsers;
mod programs;
mod provision;
mod restrictions;
mod stats;
mod watering;
mod zones;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApiStatus, ApiVersion};

const API_ROOT: &str = "/api/4";

/// Client configuration for one irrigation controller.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct SprinklerClient {
    base_url: String,
    access_token: Option<String>,
}

impl SprinklerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
        }
    }

    /// Construct a client with a token already in hand, e.g. one persisted
    /// from an earlier login.
    pub fn with_access_token(base_url: &str, token: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.access_token = Some(token.into());
        client
    }

    /// Attach the token obtained from `parse_login` to all further requests.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        let mut url = format!("{}{API_ROOT}{path}", self.base_url);
        if let Some(token) = &self.access_token {
            url.push_str("?access_token=");
            url.push_str(token);
        }
        url
    }

    pub(crate) fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn post_json(&self, path: &str, data: &impl Serialize) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_vec(data).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub(crate) fn post_binary(
        &self,
        path: &str,
        data: Vec<u8>,
        headers: Vec<(String, String)>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers,
            body: Some(data),
        }
    }

    pub fn build_api_version(&self) -> HttpRequest {
        self.get("/apiVer")
    }

    pub fn parse_api_version(&self, response: HttpResponse) -> Result<ApiVersion, ApiError> {
        parse_json(response)
    }
}

/// Map non-success HTTP statuses to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::NotAuthenticated),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Parse a 200 response body into a typed DTO.
pub(crate) fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Parse a 200 response body as a free-form JSON document. Used for the
/// payloads the controller treats as opaque blobs (provision, logs, parser
/// data).
pub(crate) fn parse_value(response: HttpResponse) -> Result<serde_json::Value, ApiError> {
    parse_json(response)
}

/// Parse the `{statusCode, message}` envelope every command reply carries.
pub(crate) fn parse_status(response: HttpResponse) -> Result<ApiStatus, ApiError> {
    parse_json(response)
}
