//! Orchestrator — runs device operations one at a time and publishes results.
//!
//! Every public operation is queued to a single worker task and tagged with a
//! monotonically increasing token. Issuing an operation supersedes all earlier
//! ones: a superseded operation is skipped if it has not started, a running
//! fetch stops before its next read, and any result is dropped. Only the
//! newest operation ever reaches the [`StateRepository`] or the
//! [`NotificationSink`].
//!
//! This is the only layer that turns raw [`DeviceError`]s into
//! [`AirUnitError`]s and user-facing messages.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use ventlink_domain::address::{DEFAULT_PORT, DeviceAddress};
use ventlink_domain::error::{AirUnitError, DeviceError};
use ventlink_domain::mode::Mode;
use ventlink_domain::property::{Fan, Switch, TemperatureSensor};
use ventlink_domain::state::AirUnitState;

use crate::ports::{AirUnit, AirUnitConnector, DiscoveryProbe, NotificationSink};
use crate::services::discovery_service::DiscoveryService;
use crate::state_repository::StateRepository;

/// Result of an orchestrated operation that was not superseded.
pub type Outcome = Result<AirUnitState, AirUnitError>;

/// A device operation the orchestrator can run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Read every property and publish a fresh snapshot.
    Fetch,
    SetMode(Mode),
    SetSwitch(Switch, bool),
    /// Manual fan step in percent.
    SetManualFanStep(u8),
}

struct Job {
    token: u64,
    operation: Operation,
    reply: oneshot::Sender<Outcome>,
}

/// Handle to a queued operation.
#[derive(Debug)]
pub struct Pending {
    token: u64,
    outcome: oneshot::Receiver<Outcome>,
}

impl Pending {
    /// Token assigned at issue time. Later operations have larger tokens.
    #[must_use]
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Wait for the operation to finish.
    ///
    /// Returns `None` when the operation was superseded by a newer one (or
    /// the orchestrator was stopped) before its result could be published.
    pub async fn outcome(self) -> Option<Outcome> {
        self.outcome.await.ok()
    }
}

struct Shared<C, P, N> {
    connector: C,
    discovery: DiscoveryService<P>,
    repository: StateRepository,
    notifier: N,
    latest: AtomicU64,
    port: u16,
}

/// Single-flight executor for air unit operations.
///
/// Create with [`new`](Self::new), then call [`start`](Self::start) from
/// inside a tokio runtime. Operations issued before `start` are queued.
/// [`stop`](Self::stop) discards whatever is in flight and ends the worker;
/// an orchestrator is started at most once.
pub struct Orchestrator<C, P, N> {
    shared: Arc<Shared<C, P, N>>,
    jobs: mpsc::UnboundedSender<Job>,
    queue: Option<mpsc::UnboundedReceiver<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl<C, P, N> Orchestrator<C, P, N>
where
    C: AirUnitConnector + 'static,
    P: DiscoveryProbe + 'static,
    N: NotificationSink + 'static,
{
    /// Create a stopped orchestrator talking to units on [`DEFAULT_PORT`].
    pub fn new(
        connector: C,
        discovery: DiscoveryService<P>,
        repository: StateRepository,
        notifier: N,
    ) -> Self {
        let (jobs, queue) = mpsc::unbounded_channel();
        Self {
            shared: Arc::new(Shared {
                connector,
                discovery,
                repository,
                notifier,
                latest: AtomicU64::new(0),
                port: DEFAULT_PORT,
            }),
            jobs,
            queue: Some(queue),
            worker: None,
        }
    }

    /// Use a non-standard unit port.
    ///
    /// Must be called before the orchestrator is shared or started.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        if let Some(shared) = Arc::get_mut(&mut self.shared) {
            shared.port = port;
        } else {
            tracing::warn!(port, "orchestrator already shared, keeping previous port");
        }
        self
    }

    /// Spawn the worker task.
    pub fn start(&mut self) {
        let Some(queue) = self.queue.take() else {
            tracing::warn!("orchestrator already started");
            return;
        };
        let shared = Arc::clone(&self.shared);
        self.worker = Some(tokio::spawn(run(shared, queue)));
        tracing::info!("orchestrator started");
    }

    /// Supersede everything issued so far and end the worker.
    pub async fn stop(&mut self) {
        self.shared.latest.fetch_add(1, Ordering::SeqCst);
        // Never started: dropping the queue resolves anything buffered in it.
        self.queue = None;
        if let Some(handle) = self.worker.take() {
            handle.abort();
            let _ = handle.await;
            tracing::info!("orchestrator stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    #[must_use]
    pub fn repository(&self) -> &StateRepository {
        &self.shared.repository
    }

    pub fn fetch(&self) -> Pending {
        self.submit(Operation::Fetch)
    }

    pub fn set_mode(&self, mode: Mode) -> Pending {
        self.submit(Operation::SetMode(mode))
    }

    pub fn set_boost(&self, on: bool) -> Pending {
        self.submit(Operation::SetSwitch(Switch::Boost, on))
    }

    pub fn set_bypass(&self, on: bool) -> Pending {
        self.submit(Operation::SetSwitch(Switch::Bypass, on))
    }

    pub fn set_night_cooling(&self, on: bool) -> Pending {
        self.submit(Operation::SetSwitch(Switch::NightCooling, on))
    }

    pub fn set_manual_fan_step(&self, percent: u8) -> Pending {
        self.submit(Operation::SetManualFanStep(percent))
    }

    /// Queue `operation`, superseding every operation issued before it.
    pub fn submit(&self, operation: Operation) -> Pending {
        let token = self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let (reply, outcome) = oneshot::channel();
        tracing::debug!(token, ?operation, "operation issued");
        if self
            .jobs
            .send(Job {
                token,
                operation,
                reply,
            })
            .is_err()
        {
            tracing::warn!(token, ?operation, "orchestrator stopped, operation dropped");
        }
        Pending { token, outcome }
    }
}

async fn run<C, P, N>(shared: Arc<Shared<C, P, N>>, mut queue: mpsc::UnboundedReceiver<Job>)
where
    C: AirUnitConnector,
    P: DiscoveryProbe,
    N: NotificationSink,
{
    while let Some(job) = queue.recv().await {
        if !shared.is_current(job.token) {
            tracing::debug!(token = job.token, "skipping superseded operation");
            continue;
        }

        let Some(result) = shared.execute(job.token, job.operation).await else {
            tracing::debug!(token = job.token, "fetch superseded between reads");
            continue;
        };

        if !shared.is_current(job.token) {
            tracing::debug!(token = job.token, "discarding result of superseded operation");
            continue;
        }

        match result {
            Ok(state) => {
                shared.repository.publish(state.clone());
                let _ = job.reply.send(Ok(state));
            }
            Err(err) => {
                tracing::warn!(token = job.token, error = %error_chain(&err), "air unit operation failed");
                shared.notifier.notify(user_message(&err));
                let _ = job.reply.send(Err(err));
            }
        }
    }
}

impl<C, P, N> Shared<C, P, N>
where
    C: AirUnitConnector,
    P: DiscoveryProbe,
{
    fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    /// Run `operation`. `None` when a newer operation superseded it midway.
    #[tracing::instrument(skip(self))]
    async fn execute(&self, token: u64, operation: Operation) -> Option<Outcome> {
        let Some(host) = self.discovery.scan().await else {
            return Some(Err(AirUnitError::HostNotFound));
        };
        let Ok(address) = DeviceAddress::new(host) else {
            return Some(Err(AirUnitError::HostNotFound));
        };
        let address = address.with_port(self.port);
        let unit = self.connector.bind(&address);

        let result = match operation {
            Operation::Fetch => read_state(&unit, || self.is_current(token))
                .await
                .transpose()?,
            Operation::SetMode(mode) => unit
                .set_mode(mode)
                .await
                .map(|()| self.repository.current().with_mode(mode)),
            Operation::SetSwitch(switch, on) => unit
                .set_switch(switch, on)
                .await
                .map(|()| self.repository.current().with_switch(switch, on)),
            Operation::SetManualFanStep(percent) => {
                unit.set_manual_fan_step(percent).await.map(|()| {
                    self.repository
                        .current()
                        .with_manual_fan_step(round_to_step(percent))
                })
            }
        };

        match &result {
            Ok(_) => tracing::info!(%address, "air unit request successful"),
            Err(err) if err.is_timeout() => {
                tracing::error!(%address, "air unit request timed out, maybe already bound to another client");
            }
            Err(err) => tracing::error!(%address, error = %err, "air unit request failed"),
        }

        Some(result.map_err(classify))
    }
}

/// Read every property into a fresh snapshot. One round trip per property.
///
/// `is_current` is checked before each read; `Ok(None)` means it turned
/// false and the remaining reads were skipped.
async fn read_state<U: AirUnit>(
    unit: &U,
    is_current: impl Fn() -> bool,
) -> Result<Option<AirUnitState>, DeviceError> {
    macro_rules! read {
        ($access:expr) => {{
            if !is_current() {
                return Ok(None);
            }
            $access.await?
        }};
    }

    Ok(Some(AirUnitState {
        mode: read!(unit.mode()),
        boost: Some(read!(unit.switch(Switch::Boost))),
        night_cooling: Some(read!(unit.switch(Switch::NightCooling))),
        bypass: Some(read!(unit.switch(Switch::Bypass))),
        supply_fan_speed: Some(read!(unit.fan_speed(Fan::Supply))),
        extract_fan_speed: Some(read!(unit.fan_speed(Fan::Extract))),
        manual_fan_step: Some(read!(unit.manual_fan_step())),
        supply_fan_step: Some(read!(unit.fan_step(Fan::Supply))),
        extract_fan_step: Some(read!(unit.fan_step(Fan::Extract))),
        filter_life: Some(read!(unit.filter_life())),
        filter_period: Some(read!(unit.filter_period())),
        humidity: Some(read!(unit.humidity())),
        room_temperature: read!(unit.temperature(TemperatureSensor::Room)),
        room_temperature_calculated: read!(unit.temperature(TemperatureSensor::RoomCalculated)),
        outdoor_temperature: read!(unit.temperature(TemperatureSensor::Outdoor)),
        supply_temperature: read!(unit.temperature(TemperatureSensor::Supply)),
        extract_temperature: read!(unit.temperature(TemperatureSensor::Extract)),
        exhaust_temperature: read!(unit.temperature(TemperatureSensor::Exhaust)),
        battery_life: Some(read!(unit.battery_life())),
        unit_name: Some(read!(unit.unit_name())),
        unit_serial: Some(read!(unit.unit_serial())),
        current_time: Some(read!(unit.current_time())),
    }))
}

/// Nearest multiple of ten, matching what the unit stores.
fn round_to_step(percent: u8) -> u8 {
    percent.saturating_add(5) / 10 * 10
}

fn classify(err: DeviceError) -> AirUnitError {
    if err.is_timeout() {
        AirUnitError::RequestTimeout(err)
    } else {
        AirUnitError::RequestFailed(err)
    }
}

/// Message shown to the user for a failed operation.
#[must_use]
pub fn user_message(err: &AirUnitError) -> String {
    match err {
        AirUnitError::HostNotFound => {
            "No air unit found. Set its IP address or check that it is on this network.".to_string()
        }
        AirUnitError::RequestTimeout(_) => {
            "Cannot reach the air unit. It may already be connected to another client.".to_string()
        }
        AirUnitError::RequestFailed(cause) => {
            format!("Air unit request failed: {}", error_chain(cause))
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
