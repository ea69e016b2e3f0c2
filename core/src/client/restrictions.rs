//! Watering restriction calls (`/restrictions`): rain delay, global and
//! hourly windows.

use serde_json::{json, Value};

use super::{parse_json, parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiStatus, RainDelay};

impl SprinklerClient {
    pub fn build_rain_delay(&self) -> HttpRequest {
        self.get("/restrictions/raindelay")
    }

    pub fn parse_rain_delay(&self, response: HttpResponse) -> Result<RainDelay, ApiError> {
        parse_json(response)
    }

    /// Suspend all watering for `days` days (0 cancels an active delay).
    pub fn build_set_rain_delay(&self, days: u32) -> Result<HttpRequest, ApiError> {
        self.post_json("/restrictions/raindelay", &json!({ "rainDelay": days }))
    }

    pub fn parse_set_rain_delay(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    pub fn build_global_restrictions(&self) -> HttpRequest {
        self.get("/restrictions/global")
    }

    pub fn build_set_global_restrictions(&self, restrictions: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json("/restrictions/global", restrictions)
    }

    pub fn build_hourly_restrictions(&self) -> HttpRequest {
        self.get("/restrictions/hourly")
    }

    pub fn build_set_hourly_restrictions(&self, restrictions: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json("/restrictions/hourly", restrictions)
    }

    pub fn build_delete_hourly_restriction(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/restrictions/hourly/{id}/delete"), &json!({}))
    }

    /// Restrictions in effect right now.
    pub fn build_current_restrictions(&self) -> HttpRequest {
        self.get("/restrictions/currently")
    }

    /// Restriction documents are firmware-defined.
    pub fn parse_restrictions(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    pub fn parse_set_restrictions(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
