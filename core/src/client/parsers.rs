//! Weather parser calls (`/parser`): the controller's pluggable weather data
//! sources.

use serde_json::{json, Map, Value};

use super::{parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ApiStatus;

impl SprinklerClient {
    pub fn build_parsers(&self) -> HttpRequest {
        self.get("/parser")
    }

    pub fn build_parser(&self, id: u32) -> HttpRequest {
        self.get(&format!("/parser/{id}"))
    }

    /// Enable or disable a parser.
    pub fn build_set_parser_enabled(&self, id: u32, enabled: bool) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/parser/{id}/activate"), &json!({ "activate": enabled }))
    }

    /// Replace a parser's configuration parameters.
    pub fn build_set_parser_params(&self, id: u32, params: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/parser/{id}/params"), params)
    }

    /// Reset a parser's parameters to their defaults.
    pub fn build_reset_parser_params(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/parser/{id}/defaults"), &json!({}))
    }

    /// Weather observations/forecasts a parser has produced.
    pub fn build_parser_data(
        &self,
        id: u32,
        start_date: Option<&str>,
        days: Option<u32>,
    ) -> HttpRequest {
        let mut path = format!("/parser/{id}/data");
        if let Some(date) = start_date {
            path.push('/');
            path.push_str(date);
            if let Some(days) = days {
                path.push_str(&format!("/{days}"));
            }
        }
        self.get(&path)
    }

    /// Run the weather pipeline: the parsers themselves, the mixer stage,
    /// and/or the simulator, optionally narrowed to one parser.
    pub fn build_run_parser(
        &self,
        id: Option<u32>,
        with_parser: bool,
        with_mixer: bool,
        with_simulator: bool,
    ) -> Result<HttpRequest, ApiError> {
        let mut data = Map::new();
        data.insert("parser".to_string(), Value::from(with_parser));
        data.insert("mixer".to_string(), Value::from(with_mixer));
        data.insert("simulator".to_string(), Value::from(with_simulator));
        if let Some(id) = id {
            data.insert("parserID".to_string(), Value::from(id));
        }
        self.post_json("/parser/run", &Value::Object(data))
    }

    /// Remove an uploaded parser.
    pub fn build_delete_parser(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/parser/{id}/delete"), &json!({}))
    }

    /// Parser listings and data payloads are firmware-defined documents.
    pub fn parse_parser(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    pub fn parse_parser_command(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
