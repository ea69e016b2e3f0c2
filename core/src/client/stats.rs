//! Daily statistics calls (`/dailystats`).

use serde_json::Value;

use super::{parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

impl SprinklerClient {
    /// Daily watering statistics.
    ///
    /// A specific `day` (YYYY-MM-DD) and `with_details` are mutually
    /// exclusive on the controller; when a day is given, details are not
    /// available and the day wins.
    pub fn build_daily_stats(&self, day: Option<&str>, with_details: bool) -> HttpRequest {
        match day {
            Some(day) => self.get(&format!("/dailystats/{day}")),
            None if with_details => self.get("/dailystats/details"),
            None => self.get("/dailystats"),
        }
    }

    pub fn parse_daily_stats(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }
}
