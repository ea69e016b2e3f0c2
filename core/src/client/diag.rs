//! Diagnostics calls (`/diag`): health dump, log retrieval, log upload.

use serde_json::{json, Value};

use super::{parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ApiStatus;

impl SprinklerClient {
    /// Uptime, memory, CPU, and connectivity snapshot.
    pub fn build_diag(&self) -> HttpRequest {
        self.get("/diag")
    }

    /// State of the support-log upload channel.
    pub fn build_diag_upload_status(&self) -> HttpRequest {
        self.get("/diag/upload")
    }

    pub fn build_diag_log(&self) -> HttpRequest {
        self.get("/diag/log")
    }

    pub fn parse_diag(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    /// Trigger an upload of the controller logs to the vendor's support
    /// channel.
    pub fn build_send_diag(&self) -> Result<HttpRequest, ApiError> {
        self.post_json("/diag/upload", &json!({}))
    }

    pub fn build_set_log_level(&self, level: u32) -> Result<HttpRequest, ApiError> {
        self.post_json("/diag/log/level", &json!({ "level": level }))
    }

    pub fn parse_diag_command(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
