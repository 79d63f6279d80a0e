//! End-to-end tests for the full ventlink stack.
//!
//! Each test wires the real LAN connector, discovery probe and orchestrator
//! against an in-process fake unit listening on a loopback TCP port.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};

use ventlink_adapter_lan::frame::RESPONSE_LEN;
use ventlink_adapter_lan::{
    ConnectionConfig, DiscoveryConfig, LanConnector, Property, RegisterMap, UdpDiscovery,
};
use ventlink_app::host_cache::HostCache;
use ventlink_app::orchestrator::Orchestrator;
use ventlink_app::ports::NotificationSink;
use ventlink_app::services::discovery_service::DiscoveryService;
use ventlink_app::state_repository::StateRepository;
use ventlink_domain::error::AirUnitError;
use ventlink_domain::mode::Mode;
use ventlink_domain::state::AirUnitState;

const READ: u16 = 0x0A01;
const WRITE: u16 = 0x0A02;
const FIRST: u16 = 0x0100;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

type Frames = Arc<Mutex<HashMap<u16, [u8; RESPONSE_LEN]>>>;

/// Loopback unit speaking the register protocol over [`RegisterMap::sequential`].
struct FakeUnit {
    port: u16,
    frames: Frames,
    writes: Arc<Mutex<Vec<(u16, Vec<u8>)>>>,
}

impl FakeUnit {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let frames: Frames = Arc::default();
        let writes: Arc<Mutex<Vec<(u16, Vec<u8>)>>> = Arc::default();

        let unit = Self {
            port,
            frames: Arc::clone(&frames),
            writes: Arc::clone(&writes),
        };
        unit.seed(Property::Mode, &[2]);
        unit.seed(Property::ManualFanStep, &[6]);
        unit.seed(Property::SupplyFanSpeed, &1450_u16.to_be_bytes());
        unit.seed(Property::RoomTemperature, &2150_i16.to_be_bytes());
        unit.seed(Property::UnitName, b"\x06w2 170");
        unit.seed(Property::UnitSerial, &[0x30, 0x39]);
        unit.seed(Property::CurrentTime, &[30, 15, 9, 12, 3, 24]);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let frames = Arc::clone(&frames);
                let writes = Arc::clone(&writes);
                tokio::spawn(async move {
                    let mut buf = [0u8; 64];
                    let Ok(read) = socket.read(&mut buf).await else {
                        return;
                    };
                    if read < 4 {
                        return;
                    }
                    let op = u16::from_be_bytes([buf[0], buf[1]]);
                    let register = u16::from_be_bytes([buf[2], buf[3]]);
                    let value = buf[4..read].to_vec();
                    let frame = {
                        let mut frames = frames.lock().unwrap();
                        let frame = frames.entry(register).or_insert([0; RESPONSE_LEN]);
                        if op == WRITE {
                            frame[..value.len()].copy_from_slice(&value);
                            writes.lock().unwrap().push((register, value));
                        }
                        *frame
                    };
                    let _ = socket.write_all(&frame).await;
                    let mut rest = [0u8; 1];
                    let _ = socket.read(&mut rest).await;
                });
            }
        });

        unit
    }

    fn seed(&self, property: Property, bytes: &[u8]) {
        let address = registers().get(property).address;
        let mut frame = [0u8; RESPONSE_LEN];
        frame[..bytes.len()].copy_from_slice(bytes);
        self.frames.lock().unwrap().insert(address, frame);
    }

    fn writes(&self) -> Vec<(u16, Vec<u8>)> {
        self.writes.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier(Arc<Mutex<Vec<String>>>);

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: String) {
        self.0.lock().unwrap().push(message);
    }
}

fn registers() -> RegisterMap {
    RegisterMap::sequential(READ, WRITE, FIRST)
}

fn silent_discovery(port: u16) -> UdpDiscovery {
    UdpDiscovery::new(DiscoveryConfig {
        broadcast_addrs: vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
        port,
        timeout_ms: 100,
    })
}

type App = Orchestrator<LanConnector, UdpDiscovery, RecordingNotifier>;

/// Orchestrator wired to the real LAN adapter. Discovery targets a loopback
/// port nobody answers on.
fn app(host: Option<&str>, unit_port: u16, notifier: RecordingNotifier) -> App {
    let connector = LanConnector::new(registers(), ConnectionConfig::default());
    let resolver = DiscoveryService::new(
        silent_discovery(unit_port),
        HostCache::new(),
        host.map(str::to_string),
    );
    let mut orchestrator = Orchestrator::new(connector, resolver, StateRepository::new(), notifier)
        .with_port(unit_port);
    orchestrator.start();
    orchestrator
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_fetch_full_snapshot_from_unit() {
    let unit = FakeUnit::start().await;
    let notifier = RecordingNotifier::default();
    let mut app = app(Some("127.0.0.1"), unit.port, notifier.clone());

    let state = app.fetch().outcome().await.unwrap().unwrap();

    assert_eq!(state.mode, Mode::Manual);
    assert_eq!(state.manual_fan_step, Some(60));
    assert_eq!(state.supply_fan_speed, Some(1450));
    assert_eq!(state.room_temperature, Some(21.5));
    assert_eq!(state.unit_name.as_deref(), Some("w2 170"));
    assert_eq!(state.unit_serial.as_deref(), Some("12345"));
    assert_eq!(state.boost, Some(false));
    assert!(state.current_time.is_some());
    assert_eq!(app.repository().current(), state);
    assert!(notifier.messages().is_empty());

    app.stop().await;
}

#[tokio::test]
async fn should_serialize_snapshot_as_json() {
    let unit = FakeUnit::start().await;
    let mut app = app(Some("127.0.0.1"), unit.port, RecordingNotifier::default());

    let state = app.fetch().outcome().await.unwrap().unwrap();
    let json = serde_json::to_value(&state).unwrap();

    assert_eq!(json["mode"], "manual");
    assert_eq!(json["unit_serial"], "12345");

    app.stop().await;
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_write_boost_and_update_snapshot() {
    let unit = FakeUnit::start().await;
    let mut app = app(Some("127.0.0.1"), unit.port, RecordingNotifier::default());

    let state = app.set_boost(true).outcome().await.unwrap().unwrap();

    assert_eq!(state.boost, Some(true));
    let boost = registers().get(Property::Boost).address;
    assert_eq!(unit.writes(), vec![(boost, vec![1])]);

    app.stop().await;
}

#[tokio::test]
async fn should_write_mode_then_read_it_back() {
    let unit = FakeUnit::start().await;
    let mut app = app(Some("127.0.0.1"), unit.port, RecordingNotifier::default());

    let state = app.set_mode(Mode::Off).outcome().await.unwrap().unwrap();
    assert_eq!(state.mode, Mode::Off);

    let state = app.fetch().outcome().await.unwrap().unwrap();
    assert_eq!(state.mode, Mode::Off);

    app.stop().await;
}

#[tokio::test]
async fn should_round_fan_step_before_sending() {
    let unit = FakeUnit::start().await;
    let mut app = app(Some("127.0.0.1"), unit.port, RecordingNotifier::default());

    let state = app.set_manual_fan_step(47).outcome().await.unwrap().unwrap();

    assert_eq!(state.manual_fan_step, Some(50));
    let step = registers().get(Property::ManualFanStep).address;
    assert_eq!(unit.writes(), vec![(step, vec![5])]);

    app.stop().await;
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_host_not_found_when_nothing_answers() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let silent_port = silent.local_addr().unwrap().port();
    let notifier = RecordingNotifier::default();
    let mut app = app(None, silent_port, notifier.clone());

    let outcome = app.fetch().outcome().await.unwrap();

    assert!(matches!(outcome, Err(AirUnitError::HostNotFound)));
    assert_eq!(
        notifier.messages(),
        vec!["No air unit found. Set its IP address or check that it is on this network."]
    );
    assert_eq!(app.repository().current(), AirUnitState::default());

    app.stop().await;
    drop(silent);
}

#[tokio::test]
async fn should_report_request_failure_when_unit_refuses() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_port = listener.local_addr().unwrap().port();
    drop(listener);
    let notifier = RecordingNotifier::default();
    let mut app = app(Some("127.0.0.1"), closed_port, notifier.clone());

    let outcome = app.fetch().outcome().await.unwrap();

    assert!(matches!(outcome, Err(AirUnitError::RequestFailed(_))));
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Air unit request failed: transport error"));

    app.stop().await;
}
