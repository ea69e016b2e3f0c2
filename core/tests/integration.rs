//! Full client session against the live mock controller.
//!
//! # Design
//! Starts the mock server on a random port, then exercises the client over
//! real HTTP using ureq, in both styles the library supports: direct
//! build/execute/parse calls, and transport completion delivered through a
//! `Deferred` the way an event-driven host consumes it (the completion
//! callback resolves with the parsed body or rejects with the HTTP status).

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use sprinkler_core::{
    ApiError, Deferred, DeferredState, HttpMethod, HttpRequest, HttpResponse, SprinklerClient,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the client
/// handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }
            match body {
                Some(body) => builder.send(&body[..]),
                None => builder.send_empty(),
            }
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Run a request on a transport thread and complete `deferred` from its
/// completion callback: parsed JSON body on success, HTTP status on failure.
/// This is the seam the deferred primitive exists for.
fn dispatch(req: HttpRequest, deferred: Deferred<serde_json::Value>) {
    std::thread::spawn(move || {
        let response = execute(req);
        if response.status == 200 {
            match serde_json::from_str(&response.body) {
                Ok(value) => deferred.resolve(value),
                Err(_) => deferred.reject(response.status),
            }
        } else {
            deferred.reject(response.status);
        }
    });
}

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn login(client: &mut SprinklerClient) {
    let req = client.build_login(mock_server::PASSWORD, true).unwrap();
    let auth = client.parse_login(execute(req)).unwrap();
    client.set_access_token(auth.access_token);
}

#[test]
fn controller_session() {
    let addr = start_mock_server();
    let mut client = SprinklerClient::new(&format!("http://{addr}"));

    // Version probe works before authentication.
    let ver = client.parse_api_version(execute(client.build_api_version())).unwrap();
    assert_eq!(ver.api_ver, "4.6.1");

    // Unauthenticated zone listing is refused.
    let err = client.parse_zones(execute(client.build_zones())).unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));

    login(&mut client);

    // Zones: eight idle out of the box.
    let zones = client.parse_zones(execute(client.build_zones())).unwrap();
    assert_eq!(zones.zones.len(), 8);
    assert!(zones.zones.iter().all(|z| z.state == 0));

    // Start one manually, watch it in the queue, then stop everything.
    let status = client
        .parse_start_zone(execute(client.build_start_zone(3, 300).unwrap()))
        .unwrap();
    assert!(status.is_success());

    let zone = client.parse_zone(execute(client.build_zone(3))).unwrap();
    assert_eq!(zone.state, 1);
    assert_eq!(zone.remaining, 300);

    let queue = client
        .parse_watering(execute(client.build_watering_queue()))
        .unwrap();
    assert_eq!(queue["queue"][0]["zid"], 3);

    let status = client
        .parse_stop_all(execute(client.build_stop_all().unwrap()))
        .unwrap();
    assert!(status.is_success());
    let zone = client.parse_zone(execute(client.build_zone(3))).unwrap();
    assert_eq!(zone.state, 0);

    // Program lifecycle.
    let schedule =
        serde_json::json!({ "name": "Morning watering", "startTime": "06:00", "active": true });
    let status = client
        .parse_create_program(execute(client.build_create_program(&schedule).unwrap()))
        .unwrap();
    assert!(status.is_success());

    let programs = client.parse_programs(execute(client.build_programs())).unwrap();
    assert_eq!(programs.programs.len(), 1);
    let pid = programs.programs[0].uid;

    let runs = client
        .parse_programs_next_run(execute(client.build_programs_next_run()))
        .unwrap();
    assert_eq!(runs.next_runs[0].pid, pid);

    let status = client
        .parse_start_program(execute(client.build_start_program(pid).unwrap()))
        .unwrap();
    assert!(status.is_success());
    let program = client.parse_program(execute(client.build_program(pid))).unwrap();
    assert_eq!(program.status, 1);

    let status = client
        .parse_delete_program(execute(client.build_delete_program(pid).unwrap()))
        .unwrap();
    assert!(status.is_success());
    let err = client
        .parse_program(execute(client.build_program(pid)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Rain delay roundtrip.
    let delay = client
        .parse_rain_delay(execute(client.build_rain_delay()))
        .unwrap();
    assert_eq!(delay.delay_counter, -1);
    client
        .parse_set_rain_delay(execute(client.build_set_rain_delay(2).unwrap()))
        .unwrap();
    let delay = client
        .parse_rain_delay(execute(client.build_rain_delay()))
        .unwrap();
    assert_eq!(delay.delay_counter, 172_800);

    // Machine time.
    client
        .parse_machine_command(execute(
            client.build_set_machine_time("2026-09-01 05:30").unwrap(),
        ))
        .unwrap();
    let time = client
        .parse_machine_time(execute(client.build_machine_time()))
        .unwrap();
    assert_eq!(time.app_date, "2026-09-01 05:30");
}

#[test]
fn deferred_transport_resolution() {
    let addr = start_mock_server();
    let mut client = SprinklerClient::new(&format!("http://{addr}"));
    login(&mut client);

    // Continuations registered before dispatch fire in order with the parsed
    // body once the transport thread resolves.
    let deferred: Deferred<serde_json::Value> = Deferred::new();
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = mpsc::channel();

    let first = seen.clone();
    deferred.then(move |reply| {
        let count = reply["zones"].as_array().map_or(0, Vec::len);
        first.lock().unwrap().push(format!("counted {count}"));
    });
    let second = seen.clone();
    deferred.then(move |reply| {
        let name = reply["zones"][0]["name"].as_str().unwrap_or("").to_string();
        second.lock().unwrap().push(format!("first is {name}"));
        tx.send(()).unwrap();
    });

    dispatch(client.build_zones(), deferred.clone());
    rx.recv().expect("transport thread never resolved");

    assert_eq!(deferred.state(), DeferredState::Resolved);
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["counted 8".to_string(), "first is Zone 1".to_string()]
    );

    // A continuation registered after resolution replays immediately.
    let (late_tx, late_rx) = mpsc::channel();
    deferred.then(move |reply| {
        late_tx.send(reply["zones"].as_array().map_or(0, Vec::len)).unwrap();
    });
    assert_eq!(late_rx.try_recv(), Ok(8));
}

#[test]
fn deferred_transport_rejection() {
    let addr = start_mock_server();
    let client = SprinklerClient::new(&format!("http://{addr}"));

    // No token attached: the controller answers 401 and the transport rejects.
    // The error handler receives the call-site identity captured at
    // registration, not the rejection status.
    let deferred: Deferred<serde_json::Value> = Deferred::new();
    let (tx, rx) = mpsc::channel();

    let never = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = never.clone();
    deferred.then(move |_| sink.lock().unwrap().push("should not run".to_string()));
    deferred.error(move |call: &str| tx.send(call.to_string()).unwrap(), "zone/list");

    dispatch(client.build_zones(), deferred.clone());

    assert_eq!(rx.recv().expect("handler never ran"), "zone/list");
    assert_eq!(deferred.state(), DeferredState::Rejected);
    assert!(never.lock().unwrap().is_empty());
}
