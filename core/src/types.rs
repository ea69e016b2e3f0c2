//! Domain DTOs for the irrigation controller API.
//!
//! # Design
//! Typed structs cover the payloads whose shape is stable across firmware
//! versions (zones, programs, auth, command status envelopes). Free-form
//! payloads the controller treats as opaque blobs — provision documents,
//! zone/program property sets, watering logs, parser data, mixer tables,
//! diagnostics dumps — pass through as `serde_json::Value`, matching how the
//! original clients handled them. Deserialization is lenient (`default` on
//! fields the controller omits on older firmware); wire names are camelCase
//! except where the controller itself uses snake_case (`access_token`).

use serde::{Deserialize, Serialize};

/// Reply to `GET /apiVer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersion {
    pub api_ver: String,
    #[serde(default)]
    pub hw_ver: i64,
    #[serde(default)]
    pub sw_ver: String,
}

/// Status envelope carried by every command (POST) reply, even on HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub status_code: i32,
    #[serde(default)]
    pub message: String,
}

impl ApiStatus {
    pub fn status(&self) -> ControllerStatus {
        ControllerStatus::from(self.status_code)
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 0
    }
}

/// The controller's in-body status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    Success,
    ExceptionOccurred,
    NotAuthenticated,
    InvalidRequest,
    NotImplemented,
    NotFound,
    DbError,
    ProvisionFailed,
    PasswordNotChanged,
    ProgramValidationFailed,
    Unknown(i32),
}

impl From<i32> for ControllerStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ControllerStatus::Success,
            1 => ControllerStatus::ExceptionOccurred,
            2 => ControllerStatus::NotAuthenticated,
            3 => ControllerStatus::InvalidRequest,
            4 => ControllerStatus::NotImplemented,
            5 => ControllerStatus::NotFound,
            6 => ControllerStatus::DbError,
            7 => ControllerStatus::ProvisionFailed,
            8 => ControllerStatus::PasswordNotChanged,
            9 => ControllerStatus::ProgramValidationFailed,
            other => ControllerStatus::Unknown(other),
        }
    }
}

/// Reply to `POST /auth/login`. The controller mixes naming styles here:
/// `access_token` is snake_case while `statusCode` is camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(rename = "statusCode", default)]
    pub status_code: i32,
}

/// Reply to `GET /auth/totp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TotpResponse {
    pub totp: String,
}

/// Basic zone state as returned by `GET /zone`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub uid: u32,
    pub name: String,
    /// 0 idle, 1 watering, 2 queued.
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub user_duration: i64,
    #[serde(default)]
    pub machine_duration: i64,
    #[serde(default)]
    pub remaining: i64,
    #[serde(default)]
    pub cycle: i32,
    #[serde(default)]
    pub no_of_cycles: i32,
    #[serde(default)]
    pub restriction: bool,
    #[serde(default)]
    pub master: bool,
}

/// Wrapper for `GET /zone` — the controller nests the array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneList {
    pub zones: Vec<Zone>,
}

/// Basic program state as returned by `GET /program`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub uid: u32,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub next_run: Option<String>,
    /// 0 stopped, 1 running, 2 pending.
    #[serde(default)]
    pub status: i32,
}

/// Wrapper for `GET /program`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramList {
    pub programs: Vec<Program>,
}

/// One entry of `GET /program/nextrun`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramNextRun {
    pub pid: u32,
    #[serde(default)]
    pub start_time: String,
}

/// Wrapper for `GET /program/nextrun`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRunList {
    pub next_runs: Vec<ProgramNextRun>,
}

/// Reply to `GET /restrictions/raindelay`. Negative means no delay active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RainDelay {
    pub delay_counter: i64,
}

/// Reply to `GET /machine/time`, `%Y-%m-%d %H:%M` local controller time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachineTime {
    pub app_date: String,
}

/// Reply to `GET /machine/update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub update: bool,
    #[serde(default)]
    pub update_status: i32,
}

/// Reply to `GET /dev/beta`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetaFlag {
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_list_decodes_controller_shape() {
        let raw = r#"{"zones":[
            {"uid":1,"name":"Front lawn","state":1,"active":true,
             "userDuration":300,"machineDuration":280,"remaining":120,
             "cycle":1,"noOfCycles":2,"restriction":false,"master":false},
            {"uid":2,"name":"Drip line","active":false}
        ]}"#;
        let list: ZoneList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.zones.len(), 2);
        assert_eq!(list.zones[0].user_duration, 300);
        assert_eq!(list.zones[0].state, 1);
        // Fields absent on older firmware fall back to defaults.
        assert_eq!(list.zones[1].remaining, 0);
        assert!(!list.zones[1].master);
    }

    #[test]
    fn auth_response_mixed_naming() {
        let raw = r#"{"access_token":"abc123","checksum":"dead","expires_in":157680000,
                      "expiration":"Fri, 01 Jan 2027 00:00:00 GMT","statusCode":0}"#;
        let auth: AuthResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(auth.access_token, "abc123");
        assert_eq!(auth.status_code, 0);
        assert_eq!(auth.expires_in, Some(157_680_000));
    }

    #[test]
    fn api_status_maps_to_controller_status() {
        let ok: ApiStatus = serde_json::from_str(r#"{"statusCode":0,"message":"OK"}"#).unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.status(), ControllerStatus::Success);

        let failed: ApiStatus =
            serde_json::from_str(r#"{"statusCode":9,"message":"Invalid program constraints"}"#)
                .unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.status(), ControllerStatus::ProgramValidationFailed);

        assert_eq!(ControllerStatus::from(42), ControllerStatus::Unknown(42));
    }

    #[test]
    fn program_decodes_with_missing_optionals() {
        let raw = r#"{"programs":[{"uid":3,"name":"Morning watering","active":true,
                      "startTime":"06:00"}]}"#;
        let list: ProgramList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.programs[0].start_time, "06:00");
        assert!(list.programs[0].next_run.is_none());
        assert_eq!(list.programs[0].status, 0);
    }

    #[test]
    fn rain_delay_negative_means_inactive() {
        let delay: RainDelay = serde_json::from_str(r#"{"delayCounter":-1}"#).unwrap();
        assert_eq!(delay.delay_counter, -1);
    }
}
