//! Register map — where each property lives on the unit.
//!
//! The map is configuration data: every property names the opcode used to
//! read it, the opcode used to write it (if writable), its register address
//! and the byte offset of its field inside the response frame. No addresses
//! are built in.
//!
//! ```toml
//! [mode]
//! read_op = 0x0A01
//! write_op = 0x0A02
//! address = 0x0203
//! ```

use serde::Deserialize;

use ventlink_domain::property::{Fan, Switch, TemperatureSensor};

use crate::error::RegisterMapError;
use crate::frame::RESPONSE_LEN;

/// Location and access opcodes of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterSpec {
    /// Opcode for reading the register.
    pub read_op: u16,
    /// Opcode for writing the register; `None` for read-only properties.
    #[serde(default)]
    pub write_op: Option<u16>,
    /// Register address.
    pub address: u16,
    /// Offset of the field inside the response frame.
    #[serde(default)]
    pub offset: usize,
}

/// Every property the facade can access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Mode,
    Boost,
    NightCooling,
    Bypass,
    ManualFanStep,
    SupplyFanSpeed,
    ExtractFanSpeed,
    SupplyFanStep,
    ExtractFanStep,
    FilterLife,
    FilterPeriod,
    Humidity,
    RoomTemperature,
    RoomTemperatureCalculated,
    OutdoorTemperature,
    SupplyTemperature,
    ExtractTemperature,
    ExhaustTemperature,
    BatteryLife,
    UnitName,
    UnitSerial,
    CurrentTime,
}

impl Property {
    pub const ALL: [Self; 22] = [
        Self::Mode,
        Self::Boost,
        Self::NightCooling,
        Self::Bypass,
        Self::ManualFanStep,
        Self::SupplyFanSpeed,
        Self::ExtractFanSpeed,
        Self::SupplyFanStep,
        Self::ExtractFanStep,
        Self::FilterLife,
        Self::FilterPeriod,
        Self::Humidity,
        Self::RoomTemperature,
        Self::RoomTemperatureCalculated,
        Self::OutdoorTemperature,
        Self::SupplyTemperature,
        Self::ExtractTemperature,
        Self::ExhaustTemperature,
        Self::BatteryLife,
        Self::UnitName,
        Self::UnitSerial,
        Self::CurrentTime,
    ];

    /// Configuration key of the property.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Boost => Switch::Boost.name(),
            Self::NightCooling => Switch::NightCooling.name(),
            Self::Bypass => Switch::Bypass.name(),
            Self::ManualFanStep => "manual_fan_step",
            Self::SupplyFanSpeed => "supply_fan_speed",
            Self::ExtractFanSpeed => "extract_fan_speed",
            Self::SupplyFanStep => "supply_fan_step",
            Self::ExtractFanStep => "extract_fan_step",
            Self::FilterLife => "filter_life",
            Self::FilterPeriod => "filter_period",
            Self::Humidity => "humidity",
            Self::RoomTemperature => TemperatureSensor::Room.name(),
            Self::RoomTemperatureCalculated => TemperatureSensor::RoomCalculated.name(),
            Self::OutdoorTemperature => TemperatureSensor::Outdoor.name(),
            Self::SupplyTemperature => TemperatureSensor::Supply.name(),
            Self::ExtractTemperature => TemperatureSensor::Extract.name(),
            Self::ExhaustTemperature => TemperatureSensor::Exhaust.name(),
            Self::BatteryLife => "battery_life",
            Self::UnitName => "unit_name",
            Self::UnitSerial => "unit_serial",
            Self::CurrentTime => "current_time",
        }
    }

    /// Minimum number of frame bytes the field occupies.
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            Self::SupplyFanSpeed
            | Self::ExtractFanSpeed
            | Self::RoomTemperature
            | Self::RoomTemperatureCalculated
            | Self::OutdoorTemperature
            | Self::SupplyTemperature
            | Self::ExtractTemperature
            | Self::ExhaustTemperature
            | Self::UnitSerial => 2,
            Self::CurrentTime => 6,
            _ => 1,
        }
    }

    #[must_use]
    pub fn fan_speed(fan: Fan) -> Self {
        match fan {
            Fan::Supply => Self::SupplyFanSpeed,
            Fan::Extract => Self::ExtractFanSpeed,
        }
    }

    #[must_use]
    pub fn fan_step(fan: Fan) -> Self {
        match fan {
            Fan::Supply => Self::SupplyFanStep,
            Fan::Extract => Self::ExtractFanStep,
        }
    }
}

impl From<Switch> for Property {
    fn from(switch: Switch) -> Self {
        match switch {
            Switch::Boost => Self::Boost,
            Switch::NightCooling => Self::NightCooling,
            Switch::Bypass => Self::Bypass,
        }
    }
}

impl From<TemperatureSensor> for Property {
    fn from(sensor: TemperatureSensor) -> Self {
        match sensor {
            TemperatureSensor::Room => Self::RoomTemperature,
            TemperatureSensor::RoomCalculated => Self::RoomTemperatureCalculated,
            TemperatureSensor::Outdoor => Self::OutdoorTemperature,
            TemperatureSensor::Supply => Self::SupplyTemperature,
            TemperatureSensor::Extract => Self::ExtractTemperature,
            TemperatureSensor::Exhaust => Self::ExhaustTemperature,
        }
    }
}

/// Register location of every property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterMap {
    pub mode: RegisterSpec,
    pub boost: RegisterSpec,
    pub night_cooling: RegisterSpec,
    pub bypass: RegisterSpec,
    pub manual_fan_step: RegisterSpec,
    pub supply_fan_speed: RegisterSpec,
    pub extract_fan_speed: RegisterSpec,
    pub supply_fan_step: RegisterSpec,
    pub extract_fan_step: RegisterSpec,
    pub filter_life: RegisterSpec,
    pub filter_period: RegisterSpec,
    pub humidity: RegisterSpec,
    pub room_temperature: RegisterSpec,
    pub room_temperature_calculated: RegisterSpec,
    pub outdoor_temperature: RegisterSpec,
    pub supply_temperature: RegisterSpec,
    pub extract_temperature: RegisterSpec,
    pub exhaust_temperature: RegisterSpec,
    pub battery_life: RegisterSpec,
    pub unit_name: RegisterSpec,
    pub unit_serial: RegisterSpec,
    pub current_time: RegisterSpec,
}

impl RegisterMap {
    #[must_use]
    pub fn get(&self, property: Property) -> &RegisterSpec {
        match property {
            Property::Mode => &self.mode,
            Property::Boost => &self.boost,
            Property::NightCooling => &self.night_cooling,
            Property::Bypass => &self.bypass,
            Property::ManualFanStep => &self.manual_fan_step,
            Property::SupplyFanSpeed => &self.supply_fan_speed,
            Property::ExtractFanSpeed => &self.extract_fan_speed,
            Property::SupplyFanStep => &self.supply_fan_step,
            Property::ExtractFanStep => &self.extract_fan_step,
            Property::FilterLife => &self.filter_life,
            Property::FilterPeriod => &self.filter_period,
            Property::Humidity => &self.humidity,
            Property::RoomTemperature => &self.room_temperature,
            Property::RoomTemperatureCalculated => &self.room_temperature_calculated,
            Property::OutdoorTemperature => &self.outdoor_temperature,
            Property::SupplyTemperature => &self.supply_temperature,
            Property::ExtractTemperature => &self.extract_temperature,
            Property::ExhaustTemperature => &self.exhaust_temperature,
            Property::BatteryLife => &self.battery_life,
            Property::UnitName => &self.unit_name,
            Property::UnitSerial => &self.unit_serial,
            Property::CurrentTime => &self.current_time,
        }
    }

    /// Check that every field fits inside a response frame.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegisterMapError`] found.
    pub fn validate(&self) -> Result<(), RegisterMapError> {
        for property in Property::ALL {
            let spec = self.get(property);
            let width = property.width();
            if spec.offset.saturating_add(width) > RESPONSE_LEN {
                return Err(RegisterMapError::OffsetOutOfFrame {
                    property: property.name(),
                    offset: spec.offset,
                    width,
                    frame_len: RESPONSE_LEN,
                });
            }
        }
        Ok(())
    }

    /// A map placing every property at offset 0 of its own register, with
    /// one shared read and one shared write opcode. Registers are numbered
    /// from `first_address` in [`Property::ALL`] order.
    #[must_use]
    pub fn sequential(read_op: u16, write_op: u16, first_address: u16) -> Self {
        let spec = |property: Property| {
            let index = Property::ALL
                .iter()
                .position(|p| *p == property)
                .and_then(|i| u16::try_from(i).ok())
                .unwrap_or_default();
            RegisterSpec {
                read_op,
                write_op: Some(write_op),
                address: first_address.wrapping_add(index),
                offset: 0,
            }
        };
        Self {
            mode: spec(Property::Mode),
            boost: spec(Property::Boost),
            night_cooling: spec(Property::NightCooling),
            bypass: spec(Property::Bypass),
            manual_fan_step: spec(Property::ManualFanStep),
            supply_fan_speed: spec(Property::SupplyFanSpeed),
            extract_fan_speed: spec(Property::ExtractFanSpeed),
            supply_fan_step: spec(Property::SupplyFanStep),
            extract_fan_step: spec(Property::ExtractFanStep),
            filter_life: spec(Property::FilterLife),
            filter_period: spec(Property::FilterPeriod),
            humidity: spec(Property::Humidity),
            room_temperature: spec(Property::RoomTemperature),
            room_temperature_calculated: spec(Property::RoomTemperatureCalculated),
            outdoor_temperature: spec(Property::OutdoorTemperature),
            supply_temperature: spec(Property::SupplyTemperature),
            extract_temperature: spec(Property::ExtractTemperature),
            exhaust_temperature: spec(Property::ExhaustTemperature),
            battery_life: spec(Property::BatteryLife),
            unit_name: spec(Property::UnitName),
            unit_serial: spec(Property::UnitSerial),
            current_time: spec(Property::CurrentTime),
        }
    }
}
