//! # ventlink-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `AirUnit` / `AirUnitConnector` — typed register access to one unit
//!   - `DiscoveryProbe` — find a unit on the local network
//!   - `PreferenceStore` — persisted host preference
//!   - `NotificationSink` — user-visible messages
//! - Provide **in-process state**: the shared [`HostCache`](host_cache::HostCache)
//!   and the observable [`StateRepository`](state_repository::StateRepository)
//! - Resolve the unit's host ([`DiscoveryService`](services::discovery_service::DiscoveryService))
//! - Serialize device operations and classify their failures
//!   ([`Orchestrator`](orchestrator::Orchestrator))
//!
//! ## Dependency rule
//! Depends on `ventlink-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod host_cache;
pub mod orchestrator;
pub mod ports;
pub mod services;
pub mod state_repository;
