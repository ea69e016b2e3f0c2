//! Watering program calls (`/program`).
//!
//! Program documents are free-form `Value` payloads on the write path (the
//! controller accepts a large schedule schema that varies by firmware) and
//! typed on the read path for the fields every firmware returns.

use serde_json::{json, Value};

use super::{parse_json, parse_status, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiStatus, NextRunList, Program, ProgramList};

impl SprinklerClient {
    pub fn build_programs(&self) -> HttpRequest {
        self.get("/program")
    }

    pub fn parse_programs(&self, response: HttpResponse) -> Result<ProgramList, ApiError> {
        parse_json(response)
    }

    pub fn build_program(&self, id: u32) -> HttpRequest {
        self.get(&format!("/program/{id}"))
    }

    pub fn parse_program(&self, response: HttpResponse) -> Result<Program, ApiError> {
        parse_json(response)
    }

    /// Next scheduled run per program.
    pub fn build_programs_next_run(&self) -> HttpRequest {
        self.get("/program/nextrun")
    }

    pub fn parse_programs_next_run(&self, response: HttpResponse) -> Result<NextRunList, ApiError> {
        parse_json(response)
    }

    /// Create a program from a schedule document.
    pub fn build_create_program(&self, properties: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json("/program", properties)
    }

    pub fn parse_create_program(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    /// Replace the schedule document of an existing program.
    pub fn build_update_program(&self, id: u32, properties: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/program/{id}"), properties)
    }

    pub fn parse_update_program(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    pub fn build_delete_program(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/program/{id}/delete"), &json!({ "pid": id }))
    }

    pub fn parse_delete_program(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    pub fn build_start_program(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/program/{id}/start"), &json!({ "pid": id }))
    }

    pub fn parse_start_program(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    pub fn build_stop_program(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/program/{id}/stop"), &json!({ "pid": id }))
    }

    pub fn parse_stop_program(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}
