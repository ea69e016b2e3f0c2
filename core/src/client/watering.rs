//! Watering history and queue calls (`/watering`).

use serde_json::{json, Value};

use super::{parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ApiStatus;

/// Appends the optional `/{start_date}/{days}` suffix shared by the history
/// endpoints. `days` is only meaningful together with a start date.
fn date_window(mut url: String, start_date: Option<&str>, days: Option<u32>) -> String {
    if let Some(date) = start_date {
        url.push('/');
        url.push_str(date);
        if let Some(days) = days {
            url.push_str(&format!("/{days}"));
        }
    }
    url
}

impl SprinklerClient {
    /// Per-day watering log. `simulated` selects the simulation log,
    /// `details` the per-cycle breakdown; `start_date` (YYYY-MM-DD) and
    /// `days` narrow the window.
    pub fn build_watering_log(
        &self,
        simulated: bool,
        details: bool,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> HttpRequest {
        let mut path = "/watering/log".to_string();
        if simulated {
            path.push_str("/simulated");
        }
        if details {
            path.push_str("/details");
        }
        self.get(&date_window(path, start_date, days))
    }

    /// Zones currently queued or watering.
    pub fn build_watering_queue(&self) -> HttpRequest {
        self.get("/watering/queue")
    }

    /// Past watering computed from historical weather.
    pub fn build_watering_past(&self, start_date: Option<&str>, days: Option<u32>) -> HttpRequest {
        self.get(&date_window("/watering/past".to_string(), start_date, days))
    }

    /// Water available to programs on future days.
    pub fn build_watering_available(
        &self,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> HttpRequest {
        self.get(&date_window(
            "/watering/available".to_string(),
            start_date,
            days,
        ))
    }

    /// History and queue payloads are firmware-defined documents.
    pub fn parse_watering(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    /// Stop every running zone and program.
    pub fn build_stop_all(&self) -> Result<HttpRequest, ApiError> {
        self.post_json("/watering/stopall", &json!({ "all": true }))
    }

    pub fn parse_stop_all(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
