//! Machine settings calls (`/machine`): firmware updates, clock, hardware
//! toggles, reboot.

use serde_json::{json, Value};

use super::{parse_json, parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiStatus, MachineTime, UpdateInfo};

impl SprinklerClient {
    /// Ask the controller to check for a firmware update.
    pub fn build_check_update(&self) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/update/check", &json!({}))
    }

    pub fn build_update_info(&self) -> HttpRequest {
        self.get("/machine/update")
    }

    pub fn parse_update_info(&self, response: HttpResponse) -> Result<UpdateInfo, ApiError> {
        parse_json(response)
    }

    /// Start installing a previously detected update.
    pub fn build_start_update(&self) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/update", &json!({}))
    }

    pub fn build_machine_time(&self) -> HttpRequest {
        self.get("/machine/time")
    }

    pub fn parse_machine_time(&self, response: HttpResponse) -> Result<MachineTime, ApiError> {
        parse_json(response)
    }

    /// Set the controller clock; `date_time` is `%Y-%m-%d %H:%M`.
    pub fn build_set_machine_time(&self, date_time: &str) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/time", &json!({ "appDate": date_time }))
    }

    pub fn build_set_ssh(&self, enabled: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/ssh", &json!({ "enabled": enabled }))
    }

    pub fn build_set_touch(&self, enabled: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/touch", &json!({ "enabled": enabled }))
    }

    pub fn build_set_leds(&self, on: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/lightleds", &json!({ "enabled": on }))
    }

    pub fn build_reboot(&self) -> Result<HttpRequest, ApiError> {
        self.post_json("/machine/reboot", &json!({}))
    }

    pub fn build_short_detection(&self) -> HttpRequest {
        self.get("/machine/shortdetection")
    }

    pub fn parse_short_detection(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    /// Master-valve short/load watchdog. Enabling also arms load watching,
    /// mirroring the controller's expected pairing.
    pub fn build_set_short_detection(&self, enabled: bool) -> Result<HttpRequest, ApiError> {
        let (short, load) = if enabled { (1, 2) } else { (0, 0) };
        self.post_json(
            "/machine/shortdetection",
            &json!({ "watchforshort": short, "watchforload": load }),
        )
    }

    pub fn parse_machine_command(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
