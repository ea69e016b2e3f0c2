//! Client library for a home irrigation controller's REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `SprinklerClient` is an explicit configuration value — base URL plus
//!   optional access token — owned by the call site; there is no process-wide
//!   client or token state.
//! - Each API operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `Deferred` decouples request completion from call-site code: the
//!   transport's completion callback resolves or rejects it, and registered
//!   continuations observe the single eventual result.
//! - Payloads with stable shapes are typed DTOs; firmware-defined documents
//!   pass through as `serde_json::Value`.

pub mod client;
pub mod deferred;
pub mod error;
pub mod http;
pub mod types;

pub use client::SprinklerClient;
pub use deferred::{Deferred, DeferredState, RetryPolicy};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    ApiStatus, ApiVersion, AuthResponse, BetaFlag, ControllerStatus, MachineTime, NextRunList,
    Program, ProgramList, ProgramNextRun, RainDelay, TotpResponse, UpdateInfo, Zone, ZoneList,
};
