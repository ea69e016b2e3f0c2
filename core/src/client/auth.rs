//! Authentication calls (`/auth`).
//!
//! Logging in yields an access token; storing it on the client is an explicit
//! caller step (`set_access_token`), so ownership of the credential stays
//! visible at the call site.

use serde_json::json;

use super::{parse_json, parse_status, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiStatus, AuthResponse, TotpResponse};

impl SprinklerClient {
    pub fn build_login(&self, password: &str, remember: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/auth/login", &json!({ "pwd": password, "remember": remember }))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        parse_json(response)
    }

    /// One-time PIN for local console pairing.
    pub fn build_totp(&self) -> HttpRequest {
        self.get("/auth/totp")
    }

    pub fn parse_totp(&self, response: HttpResponse) -> Result<TotpResponse, ApiError> {
        parse_json(response)
    }

    pub fn build_change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.post_json(
            "/auth/change",
            &json!({ "newPass": new_password, "oldPass": old_password }),
        )
    }

    pub fn parse_change_password(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
