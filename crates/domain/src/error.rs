//! Error types shared across the workspace.
//!
//! Three layers of error live here:
//!
//! - [`ValidationError`] — a value was rejected before anything was sent
//! - [`DeviceError`] — raw failure of a device round trip, surfaced by the
//!   transport and register layers without interpretation
//! - [`AirUnitError`] — the classified outcome of an orchestrated operation
//!
//! [`PreferenceError`] covers updates to the stored host preference.

use crate::mode::Mode;

/// A value failed a domain invariant.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A host was required but the given value was blank.
    #[error("host must not be blank")]
    BlankHost,

    /// The given text is neither a well-formed IP address nor blank.
    #[error("invalid IP address {0:?}")]
    InvalidIpAddress(String),

    /// The mode is a local placeholder and has no wire representation.
    #[error("mode {0} cannot be written to the unit")]
    UnwritableMode(Mode),

    /// The text does not name a mode.
    #[error("unknown mode {0:?}")]
    UnknownMode(String),

    /// Manual fan steps are percentages.
    #[error("fan step {0} is outside 0..=100")]
    FanStepOutOfRange(u8),

    /// No write opcode is configured for the property.
    #[error("property {0} is read-only")]
    ReadOnly(&'static str),
}

/// The unit answered, but with a value that has no meaning.
#[derive(Debug, thiserror::Error)]
pub enum UnexpectedValueError {
    /// Mode byte outside the known ordinals.
    #[error("unknown mode ordinal {0}")]
    ModeOrdinal(u8),

    /// Fan step byte outside `0..=10`.
    #[error("invalid fan step {0}")]
    FanStep(u8),

    /// Packed date-time fields that do not form a valid local time.
    #[error("invalid timestamp {day}.{month}.{year} {hour}:{minute}:{second}")]
    Timestamp {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },
}

/// Raw failure of a single device access.
///
/// Lower layers return this unchanged; only the orchestrator turns it into
/// an [`AirUnitError`].
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Socket-level failure (connect, write, read, short frame, timeout).
    #[error("transport error")]
    Transport(#[from] std::io::Error),

    /// A response frame decoded to a value outside its domain.
    #[error("unexpected response value")]
    UnexpectedValue(#[from] UnexpectedValueError),

    /// The request was rejected locally and never sent.
    #[error("invalid argument")]
    InvalidArgument(#[from] ValidationError),
}

impl DeviceError {
    /// Whether the failure was a socket timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport(err)
                if matches!(err.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock)
        )
    }
}

/// Classified outcome of a failed orchestrated operation.
#[derive(Debug, thiserror::Error)]
pub enum AirUnitError {
    /// No override, no cached host, and discovery found no responder.
    #[error("no air unit found")]
    HostNotFound,

    /// A socket operation exceeded its timeout.
    #[error("air unit request timed out")]
    RequestTimeout(#[source] DeviceError),

    /// Any other failure, after the transport's single retry.
    #[error("air unit request failed")]
    RequestFailed(#[source] DeviceError),
}

/// Updating the stored host preference failed.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// The new value was rejected before anything was stored.
    #[error("invalid preference")]
    Invalid(#[from] ValidationError),

    /// The preference store could not persist the value.
    #[error("failed to save preferences")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
