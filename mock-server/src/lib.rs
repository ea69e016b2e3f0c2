//! In-memory stand-in for an irrigation controller's `/api/4` surface.
//!
//! Covers the slice of the API the client integration tests exercise: login
//! and token enforcement, zones, programs, rain delay, watering queue,
//! provision identity, machine time/update/reboot, diagnostics, and the beta
//! flag. DTOs are defined independently from the client crate; integration
//! tests catch schema drift.
//!
//! Every route except `/apiVer` and `/auth/login` requires the access token
//! issued at login as the `access_token` query parameter and answers 401
//! otherwise, which is how the real controller authenticates calls.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Token issued by `/auth/login`; fixed so tests stay deterministic.
pub const ACCESS_TOKEN: &str = "8e9f3a2b-mock-token";

/// Password the mock accepts at login.
pub const PASSWORD: &str = "admin";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub uid: u32,
    pub name: String,
    pub state: i32,
    pub active: bool,
    pub user_duration: i64,
    pub machine_duration: i64,
    pub remaining: i64,
    pub cycle: i32,
    pub no_of_cycles: i32,
    pub restriction: bool,
    pub master: bool,
}

impl Zone {
    fn idle(uid: u32) -> Self {
        Self {
            uid,
            name: format!("Zone {uid}"),
            state: 0,
            active: true,
            user_duration: 0,
            machine_duration: 0,
            remaining: 0,
            cycle: 0,
            no_of_cycles: 1,
            restriction: false,
            master: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub uid: u32,
    pub name: String,
    pub active: bool,
    pub start_time: String,
    pub next_run: Option<String>,
    pub status: i32,
}

#[derive(Debug)]
pub struct ControllerState {
    pub zones: BTreeMap<u32, Zone>,
    pub programs: BTreeMap<u32, Program>,
    next_program_id: u32,
    pub rain_delay_secs: i64,
    pub net_name: String,
    pub app_date: String,
    pub log_level: u32,
    pub beta: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            zones: (1..=8).map(|uid| (uid, Zone::idle(uid))).collect(),
            programs: BTreeMap::new(),
            next_program_id: 1,
            rain_delay_secs: -1,
            net_name: "Mock Sprinkler".to_string(),
            app_date: "2026-08-25 06:00".to_string(),
            log_level: 20,
            beta: false,
        }
    }
}

pub type Db = Arc<RwLock<ControllerState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(ControllerState::default()));

    let public = Router::new()
        .route("/apiVer", get(api_version))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/auth/change", post(change_password))
        .route("/zone", get(list_zones))
        .route("/zone/{id}", get(get_zone))
        .route("/zone/{id}/start", post(start_zone))
        .route("/zone/{id}/stop", post(stop_zone))
        .route("/zone/{id}/properties", get(zone_properties).post(set_zone_properties))
        .route("/program", get(list_programs).post(create_program))
        .route("/program/nextrun", get(next_runs))
        .route("/program/{id}", get(get_program).post(update_program))
        .route("/program/{id}/delete", post(delete_program))
        .route("/program/{id}/start", post(start_program))
        .route("/program/{id}/stop", post(stop_program))
        .route("/restrictions/raindelay", get(get_rain_delay).post(set_rain_delay))
        .route("/watering/queue", get(watering_queue))
        .route("/watering/stopall", post(stop_all))
        .route("/provision", get(get_provision))
        .route("/provision/name", post(set_provision_name))
        .route("/machine/time", get(get_machine_time).post(set_machine_time))
        .route("/machine/update", get(get_update))
        .route("/machine/reboot", post(reboot))
        .route("/diag", get(get_diag))
        .route("/diag/log/level", post(set_log_level))
        .route("/dev/beta", get(get_beta).post(set_beta))
        .route_layer(middleware::from_fn(require_token));

    Router::new()
        .nest("/api/4", public.merge(protected))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_token(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .uri()
        .query()
        .unwrap_or("")
        .split('&')
        .any(|pair| pair.strip_prefix("access_token=") == Some(ACCESS_TOKEN));
    if !authorized {
        log::warn!("rejecting unauthenticated call to {}", request.uri().path());
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn ok_status() -> Json<Value> {
    Json(json!({ "statusCode": 0, "message": "OK" }))
}

// --- version / auth ---

async fn api_version() -> Json<Value> {
    Json(json!({ "apiVer": "4.6.1", "hwVer": 3, "swVer": "4.0.1144" }))
}

#[derive(Deserialize)]
struct LoginBody {
    pwd: String,
    #[serde(default)]
    #[allow(dead_code)]
    remember: bool,
}

async fn login(Json(body): Json<LoginBody>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body.pwd != PASSWORD {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "statusCode": 2, "message": "Not Authenticated !" })),
        ));
    }
    Ok(Json(json!({
        "access_token": ACCESS_TOKEN,
        "checksum": "d41d8cd9",
        "expires_in": 157_680_000,
        "expiration": "Fri, 01 Jan 2027 00:00:00 GMT",
        "statusCode": 0,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordBody {
    old_pass: String,
    #[serde(rename = "newPass")]
    #[allow(dead_code)]
    new_pass: String,
}

async fn change_password(Json(body): Json<ChangePasswordBody>) -> Json<Value> {
    if body.old_pass != PASSWORD {
        return Json(json!({ "statusCode": 8, "message": "Cannot change password" }));
    }
    ok_status()
}

// --- zones ---

async fn list_zones(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    let zones: Vec<&Zone> = state.zones.values().collect();
    Json(json!({ "zones": zones }))
}

async fn get_zone(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Zone>, StatusCode> {
    let state = db.read().await;
    state.zones.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

#[derive(Deserialize)]
struct StartZoneBody {
    time: i64,
}

async fn start_zone(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(body): Json<StartZoneBody>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    let zone = state.zones.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    zone.state = 1;
    zone.user_duration = body.time;
    zone.remaining = body.time;
    Ok(ok_status())
}

async fn stop_zone(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    let zone = state.zones.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    zone.state = 0;
    zone.remaining = 0;
    Ok(ok_status())
}

async fn zone_properties(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let state = db.read().await;
    let zone = state.zones.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({
        "uid": zone.uid,
        "name": zone.name,
        "valveType": 1,
        "internet": true,
        "savings": 100,
        "waterSense": { "fieldCapacity": 0.17, "precipitationRate": 25.4 },
    })))
}

#[derive(Deserialize)]
struct ZonePropertiesBody {
    name: Option<String>,
}

async fn set_zone_properties(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(body): Json<ZonePropertiesBody>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    let zone = state.zones.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = body.name {
        zone.name = name;
    }
    Ok(ok_status())
}

// --- programs ---

async fn list_programs(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    let programs: Vec<&Program> = state.programs.values().collect();
    Json(json!({ "programs": programs }))
}

async fn get_program(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Program>, StatusCode> {
    let state = db.read().await;
    state.programs.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn next_runs(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    let runs: Vec<Value> = state
        .programs
        .values()
        .filter(|p| p.active)
        .map(|p| json!({ "pid": p.uid, "startTime": p.start_time }))
        .collect();
    Json(json!({ "nextRuns": runs }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramBody {
    name: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    active: bool,
}

async fn create_program(State(db): State<Db>, Json(body): Json<ProgramBody>) -> Json<Value> {
    let mut state = db.write().await;
    let uid = state.next_program_id;
    state.next_program_id += 1;
    state.programs.insert(
        uid,
        Program {
            uid,
            name: body.name,
            active: body.active,
            start_time: body.start_time,
            next_run: None,
            status: 0,
        },
    );
    ok_status()
}

async fn update_program(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(body): Json<ProgramBody>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    let program = state.programs.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    program.name = body.name;
    program.start_time = body.start_time;
    program.active = body.active;
    Ok(ok_status())
}

async fn delete_program(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    state.programs.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(ok_status())
}

async fn start_program(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    let program = state.programs.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    program.status = 1;
    Ok(ok_status())
}

async fn stop_program(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = db.write().await;
    let program = state.programs.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    program.status = 0;
    Ok(ok_status())
}

// --- restrictions / watering ---

async fn get_rain_delay(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({ "delayCounter": state.rain_delay_secs }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RainDelayBody {
    rain_delay: i64,
}

async fn set_rain_delay(State(db): State<Db>, Json(body): Json<RainDelayBody>) -> Json<Value> {
    let mut state = db.write().await;
    state.rain_delay_secs = if body.rain_delay > 0 {
        body.rain_delay * 86_400
    } else {
        -1
    };
    ok_status()
}

async fn watering_queue(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    let queue: Vec<Value> = state
        .zones
        .values()
        .filter(|z| z.state != 0)
        .map(|z| json!({ "zid": z.uid, "machineDuration": z.remaining, "manual": true }))
        .collect();
    Json(json!({ "queue": queue }))
}

async fn stop_all(State(db): State<Db>) -> Json<Value> {
    let mut state = db.write().await;
    for zone in state.zones.values_mut() {
        zone.state = 0;
        zone.remaining = 0;
    }
    for program in state.programs.values_mut() {
        program.status = 0;
    }
    ok_status()
}

// --- provision / machine / diag / dev ---

async fn get_provision(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({
        "system": { "netName": state.net_name, "httpEnabled": true, "uiUnitsMetric": true },
        "location": { "name": "Backyard", "timezone": "Europe/Bucharest", "elevation": 90.0 },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProvisionNameBody {
    net_name: String,
}

async fn set_provision_name(
    State(db): State<Db>,
    Json(body): Json<ProvisionNameBody>,
) -> Json<Value> {
    db.write().await.net_name = body.net_name;
    ok_status()
}

async fn get_machine_time(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({ "appDate": state.app_date }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MachineTimeBody {
    app_date: String,
}

async fn set_machine_time(State(db): State<Db>, Json(body): Json<MachineTimeBody>) -> Json<Value> {
    db.write().await.app_date = body.app_date;
    ok_status()
}

async fn get_update() -> Json<Value> {
    Json(json!({ "update": false, "updateStatus": 1, "packageDetails": [] }))
}

async fn reboot() -> Json<Value> {
    ok_status()
}

async fn get_diag(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({
        "hasWifi": true,
        "uptime": "4 days, 02:11:57",
        "cpuUsage": 2.5,
        "memUsage": 21_312,
        "logLevel": state.log_level,
        "softwareVersion": "4.0.1144",
    }))
}

#[derive(Deserialize)]
struct LogLevelBody {
    level: u32,
}

async fn set_log_level(State(db): State<Db>, Json(body): Json<LogLevelBody>) -> Json<Value> {
    db.write().await.log_level = body.level;
    ok_status()
}

async fn get_beta(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({ "enabled": state.beta }))
}

#[derive(Deserialize)]
struct BetaBody {
    enabled: bool,
}

async fn set_beta(State(db): State<Db>, Json(body): Json<BetaBody>) -> Json<Value> {
    db.write().await.beta = body.enabled;
    ok_status()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_serializes_with_camel_case_wire_names() {
        let zone = Zone::idle(3);
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["uid"], 3);
        assert_eq!(json["name"], "Zone 3");
        assert_eq!(json["userDuration"], 0);
        assert_eq!(json["noOfCycles"], 1);
    }

    #[test]
    fn program_roundtrips_through_json() {
        let program = Program {
            uid: 2,
            name: "Morning watering".to_string(),
            active: true,
            start_time: "06:00".to_string(),
            next_run: None,
            status: 0,
        };
        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn default_state_has_eight_idle_zones() {
        let state = ControllerState::default();
        assert_eq!(state.zones.len(), 8);
        assert!(state.zones.values().all(|z| z.state == 0));
        assert_eq!(state.rain_delay_secs, -1);
    }

    #[test]
    fn login_body_defaults_remember() {
        let body: LoginBody = serde_json::from_str(r#"{"pwd":"admin"}"#).unwrap();
        assert_eq!(body.pwd, "admin");
        assert!(!body.remember);
    }

    #[test]
    fn program_body_tolerates_missing_optionals() {
        let body: ProgramBody = serde_json::from_str(r#"{"name":"Evening"}"#).unwrap();
        assert_eq!(body.name, "Evening");
        assert!(body.start_time.is_empty());
        assert!(!body.active);
    }
}
