//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod air_unit;
pub mod discovery;
pub mod notifier;
pub mod preferences;

pub use air_unit::{AirUnit, AirUnitConnector};
pub use discovery::DiscoveryProbe;
pub use notifier::NotificationSink;
pub use preferences::PreferenceStore;
