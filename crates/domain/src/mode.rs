//! Operating mode of the unit.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UnexpectedValueError, ValidationError};

/// Operating mode of the unit.
///
/// The unit encodes modes by ordinal: `0` demand, `1` program, `2` manual,
/// `3` off. [`NotAvailable`](Self::NotAvailable) is a local placeholder for
/// "not read yet" and has no wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[serde(rename = "n/a")]
    NotAvailable,
    Demand,
    Program,
    Manual,
    Off,
}

impl Mode {
    /// Modes that can be written to the unit, in ordinal order.
    pub const WRITABLE: [Self; 4] = [Self::Demand, Self::Program, Self::Manual, Self::Off];

    /// Decode a mode from its wire ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedValueError::ModeOrdinal`] for unknown ordinals.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, UnexpectedValueError> {
        Self::WRITABLE
            .get(usize::from(ordinal))
            .copied()
            .ok_or(UnexpectedValueError::ModeOrdinal(ordinal))
    }

    /// Wire ordinal, or `None` for [`NotAvailable`](Self::NotAvailable).
    #[must_use]
    pub fn ordinal(self) -> Option<u8> {
        match self {
            Self::NotAvailable => None,
            Self::Demand => Some(0),
            Self::Program => Some(1),
            Self::Manual => Some(2),
            Self::Off => Some(3),
        }
    }

    /// Whether boost can be engaged while the unit runs in this mode.
    #[must_use]
    pub fn is_boost_capable(self) -> bool {
        matches!(self, Self::Demand | Self::Program | Self::Manual)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAvailable => f.write_str("n/a"),
            Self::Demand => f.write_str("demand"),
            Self::Program => f.write_str("program"),
            Self::Manual => f.write_str("manual"),
            Self::Off => f.write_str("off"),
        }
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::WRITABLE
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_not_available() {
        assert_eq!(Mode::default(), Mode::NotAvailable);
    }

    #[test]
    fn should_roundtrip_every_writable_mode_through_ordinal() {
        for mode in Mode::WRITABLE {
            let ordinal = mode.ordinal().unwrap();
            assert_eq!(Mode::from_ordinal(ordinal).unwrap(), mode);
        }
    }

    #[test]
    fn should_decode_manual_from_ordinal_two() {
        assert_eq!(Mode::from_ordinal(2).unwrap(), Mode::Manual);
    }

    #[test]
    fn should_reject_unknown_ordinal() {
        let err = Mode::from_ordinal(4).unwrap_err();
        assert!(matches!(err, UnexpectedValueError::ModeOrdinal(4)));
    }

    #[test]
    fn should_have_no_ordinal_when_not_available() {
        assert_eq!(Mode::NotAvailable.ordinal(), None);
    }

    #[test]
    fn should_report_boost_capability() {
        assert!(Mode::Demand.is_boost_capable());
        assert!(Mode::Manual.is_boost_capable());
        assert!(!Mode::Off.is_boost_capable());
        assert!(!Mode::NotAvailable.is_boost_capable());
    }

    #[test]
    fn should_parse_mode_case_insensitively() {
        assert_eq!("Manual".parse::<Mode>().unwrap(), Mode::Manual);
        assert_eq!(" off ".parse::<Mode>().unwrap(), Mode::Off);
    }

    #[test]
    fn should_not_parse_placeholder_mode() {
        assert!("n/a".parse::<Mode>().is_err());
        assert!("turbo".parse::<Mode>().is_err());
    }

    #[test]
    fn should_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Demand).unwrap(), "\"demand\"");
        assert_eq!(serde_json::to_string(&Mode::NotAvailable).unwrap(), "\"n/a\"");
    }
}
