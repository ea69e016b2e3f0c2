//! Provisioning calls (`/provision`): device identity, wifi, cloud binding.
//!
//! Provision documents are firmware-defined blobs, so the read path returns
//! `Value` and the write path accepts `Value`.

use serde_json::{json, Map, Value};

use super::{parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ApiStatus;

impl SprinklerClient {
    pub fn build_provision(&self) -> HttpRequest {
        self.get("/provision")
    }

    pub fn build_provision_wifi(&self) -> HttpRequest {
        self.get("/provision/wifi")
    }

    pub fn build_provision_cloud(&self) -> HttpRequest {
        self.get("/provision/cloud")
    }

    /// Day-of-year rain/temperature reference curves.
    pub fn build_provision_doy(&self) -> HttpRequest {
        self.get("/provision/doy")
    }

    /// All provision GET variants answer a firmware-defined document.
    pub fn parse_provision(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    /// Update the system and/or location sections. At least one section must
    /// be present, otherwise the request is rejected client-side.
    pub fn build_set_provision(
        &self,
        system: Option<Value>,
        location: Option<Value>,
    ) -> Result<HttpRequest, ApiError> {
        let mut data = Map::new();
        if let Some(system) = system {
            data.insert("system".to_string(), system);
        }
        if let Some(location) = location {
            data.insert("location".to_string(), location);
        }
        if data.is_empty() {
            return Err(ApiError::InvalidRequest);
        }
        self.post_json("/provision", &Value::Object(data))
    }

    pub fn build_set_provision_name(&self, name: &str) -> Result<HttpRequest, ApiError> {
        self.post_json("/provision/name", &json!({ "netName": name }))
    }

    pub fn build_set_provision_cloud(&self, cloud: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json("/provision/cloud", cloud)
    }

    pub fn build_set_provision_cloud_email(&self, email: &str) -> Result<HttpRequest, ApiError> {
        self.post_json("/provision/cloud/mail", &json!({ "email": email }))
    }

    pub fn build_set_provision_cloud_enable(&self, enabled: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/provision/cloud/enable", &json!({ "enable": enabled }))
    }

    pub fn build_provision_cloud_reset(&self) -> Result<HttpRequest, ApiError> {
        self.post_json("/provision/cloud/reset", &json!({}))
    }

    /// Factory reset; `with_restart` reboots the controller afterwards.
    pub fn build_provision_reset(&self, with_restart: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/provision/reset", &json!({ "restart": with_restart }))
    }

    /// All provision POST variants answer the command status envelope.
    pub fn parse_set_provision(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
