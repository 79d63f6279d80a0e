//! Named groups of like-typed unit properties.
//!
//! Grouping properties that share a wire encoding keeps the register port
//! small: one accessor per encoding instead of one per register.

use serde::{Deserialize, Serialize};

/// On/off properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Switch {
    Boost,
    NightCooling,
    Bypass,
}

impl Switch {
    /// Stable property name used in configuration and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Boost => "boost",
            Self::NightCooling => "night_cooling",
            Self::Bypass => "bypass",
        }
    }
}

/// The two air streams moved by the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fan {
    Supply,
    Extract,
}

impl Fan {
    /// Stable name used in configuration and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Supply => "supply",
            Self::Extract => "extract",
        }
    }
}

/// Temperature probes exposed by the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSensor {
    Room,
    /// Room temperature estimated by the unit when no room sensor is fitted.
    RoomCalculated,
    Outdoor,
    Supply,
    Extract,
    Exhaust,
}

impl TemperatureSensor {
    pub const ALL: [Self; 6] = [
        Self::Room,
        Self::RoomCalculated,
        Self::Outdoor,
        Self::Supply,
        Self::Extract,
        Self::Exhaust,
    ];

    /// Stable property name used in configuration and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Room => "room_temperature",
            Self::RoomCalculated => "room_temperature_calculated",
            Self::Outdoor => "outdoor_temperature",
            Self::Supply => "supply_temperature",
            Self::Extract => "extract_temperature",
            Self::Exhaust => "exhaust_temperature",
        }
    }
}
