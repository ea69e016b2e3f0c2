//! Zone control calls (`/zone`).

use serde_json::{json, Value};

use super::{parse_json, parse_status, parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ApiStatus, Zone, ZoneList};

impl SprinklerClient {
    /// All zones and their basic state.
    pub fn build_zones(&self) -> HttpRequest {
        self.get("/zone")
    }

    pub fn parse_zones(&self, response: HttpResponse) -> Result<ZoneList, ApiError> {
        parse_json(response)
    }

    pub fn build_zone(&self, id: u32) -> HttpRequest {
        self.get(&format!("/zone/{id}"))
    }

    pub fn parse_zone(&self, response: HttpResponse) -> Result<Zone, ApiError> {
        parse_json(response)
    }

    /// Manually start watering a zone for `duration_secs`.
    pub fn build_start_zone(&self, id: u32, duration_secs: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/zone/{id}/start"), &json!({ "time": duration_secs }))
    }

    pub fn parse_start_zone(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    pub fn build_stop_zone(&self, id: u32) -> Result<HttpRequest, ApiError> {
        self.post_json(&format!("/zone/{id}/stop"), &json!({ "zid": id }))
    }

    pub fn parse_stop_zone(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    /// Advanced properties for all zones, or one zone when `id` is given.
    pub fn build_zone_properties(&self, id: Option<u32>) -> HttpRequest {
        match id {
            Some(id) => self.get(&format!("/zone/{id}/properties")),
            None => self.get("/zone/properties"),
        }
    }

    pub fn parse_zone_properties(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }

    /// Update a zone's properties. `water_sense` carries the advanced
    /// (WaterSense) blob and is merged into the payload when present.
    pub fn build_set_zone_properties(
        &self,
        id: u32,
        mut properties: Value,
        water_sense: Option<Value>,
    ) -> Result<HttpRequest, ApiError> {
        if let Some(advanced) = water_sense {
            match properties.as_object_mut() {
                Some(map) => {
                    map.insert("waterSense".to_string(), advanced);
                }
                None => return Err(ApiError::InvalidRequest),
            }
        }
        self.post_json(&format!("/zone/{id}/properties"), &properties)
    }

    pub fn parse_set_zone_properties(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        parse_status(response)
    }

    /// Dry-run a zone configuration; the controller answers with the watering
    /// times it would compute.
    pub fn build_simulate_zone(
        &self,
        mut properties: Value,
        water_sense: Option<Value>,
    ) -> Result<HttpRequest, ApiError> {
        if let Some(advanced) = water_sense {
            match properties.as_object_mut() {
                Some(map) => {
                    map.insert("waterSense".to_string(), advanced);
                }
                None => return Err(ApiError::InvalidRequest),
            }
        }
        self.post_json("/zone/simulate", &properties)
    }

    pub fn parse_simulate_zone(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::SprinklerClient;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpResponse};

    fn client() -> SprinklerClient {
        SprinklerClient::with_access_token("http://host:8080", "tok")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn start_zone_request_shape() {
        let req = client().build_start_zone(3, 300).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://host:8080/api/4/zone/3/start?access_token=tok");
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "time": 300 }));
    }

    #[test]
    fn stop_zone_sends_zone_id_in_body() {
        let req = client().build_stop_zone(3).unwrap();
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "zid": 3 }));
    }

    #[test]
    fn zone_properties_path_with_and_without_id() {
        assert_eq!(
            client().build_zone_properties(Some(2)).url,
            "http://host:8080/api/4/zone/2/properties?access_token=tok"
        );
        assert_eq!(
            client().build_zone_properties(None).url,
            "http://host:8080/api/4/zone/properties?access_token=tok"
        );
    }

    #[test]
    fn set_properties_merges_water_sense_blob() {
        let req = client()
            .build_set_zone_properties(
                1,
                json!({ "name": "Front lawn" }),
                Some(json!({ "precipitationRate": 25.4 })),
            )
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Front lawn");
        assert_eq!(body["waterSense"]["precipitationRate"], 25.4);
    }

    #[test]
    fn set_properties_rejects_non_object_payload() {
        let err = client()
            .build_set_zone_properties(1, json!([1, 2]), Some(json!({})))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest));
    }

    #[test]
    fn parse_zone_list() {
        let list = client()
            .parse_zones(ok(r#"{"zones":[{"uid":1,"name":"Front lawn"}]}"#))
            .unwrap();
        assert_eq!(list.zones.len(), 1);
        assert_eq!(list.zones[0].name, "Front lawn");
    }

    #[test]
    fn start_zone_not_authenticated() {
        let resp = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = client().parse_start_zone(resp).unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }
}
