//! Developer calls (`/dev`): timezone database, beta channel, custom parser
//! upload.

use serde_json::{json, Value};

use super::{parse_json, parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiStatus, BetaFlag};

impl SprinklerClient {
    pub fn build_timezone_db(&self) -> HttpRequest {
        self.get("/dev/timezonedb.json")
    }

    pub fn parse_timezone_db(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    pub fn build_beta(&self) -> HttpRequest {
        self.get("/dev/beta")
    }

    pub fn parse_beta(&self, response: HttpResponse) -> Result<BetaFlag, ApiError> {
        parse_json(response)
    }

    pub fn build_set_beta(&self, enabled: bool) -> Result<HttpRequest, ApiError> {
        self.post_json("/dev/beta", &json!({ "enabled": enabled }))
    }

    pub fn parse_set_beta(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    /// Upload a custom weather parser as a raw file body. The file name and
    /// type travel in headers, not in the body, so the payload stays binary.
    pub fn build_upload_parser(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> HttpRequest {
        let headers = vec![
            ("Content-Type".to_string(), content_type.to_string()),
            (
                "Content-Disposition".to_string(),
                format!("inline; filename={file_name}"),
            ),
        ];
        self.post_binary("/dev/import/parser", data, headers)
    }

    pub fn parse_upload_parser(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::SprinklerClient;
    use crate::http::HttpMethod;

    fn client() -> SprinklerClient {
        SprinklerClient::with_access_token("http://host:8080", "tok")
    }

    #[test]
    fn timezone_db_path_keeps_extension() {
        assert_eq!(
            client().build_timezone_db().url,
            "http://host:8080/api/4/dev/timezonedb.json?access_token=tok"
        );
    }

    #[test]
    fn upload_parser_carries_file_metadata_in_headers() {
        let req = client().build_upload_parser(
            "my-parser.py",
            "text/x-python",
            b"#!/usr/bin/env python".to_vec(),
        );
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "http://host:8080/api/4/dev/import/parser?access_token=tok"
        );
        assert_eq!(
            req.headers,
            vec![
                ("Content-Type".to_string(), "text/x-python".to_string()),
                (
                    "Content-Disposition".to_string(),
                    "inline; filename=my-parser.py".to_string()
                ),
            ]
        );
        assert_eq!(req.body.as_deref(), Some(b"#!/usr/bin/env python".as_slice()));
    }

    #[test]
    fn beta_toggle_body() {
        let req = client().build_set_beta(true).unwrap();
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "enabled": true }));
    }
}
