//! Air unit snapshot — every decoded property at one point in time.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::property::{Fan, Switch, TemperatureSensor};
use crate::time::DeviceTime;

/// Immutable aggregate of the unit's decoded properties.
///
/// A freshly created snapshot has [`Mode::NotAvailable`] and every other
/// field absent. Fields are filled wholesale by a full read, or one at a
/// time by the `with_*` methods after a confirmed write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirUnitState {
    pub mode: Mode,
    pub boost: Option<bool>,
    pub night_cooling: Option<bool>,
    pub bypass: Option<bool>,
    /// Supply fan speed in rpm.
    pub supply_fan_speed: Option<u16>,
    /// Extract fan speed in rpm.
    pub extract_fan_speed: Option<u16>,
    /// Manual fan step as a percentage, in tens.
    pub manual_fan_step: Option<u8>,
    pub supply_fan_step: Option<u8>,
    pub extract_fan_step: Option<u8>,
    /// Remaining filter life in percent.
    pub filter_life: Option<f32>,
    /// Filter replacement period in months.
    pub filter_period: Option<u8>,
    /// Relative humidity in percent.
    pub humidity: Option<f32>,
    pub room_temperature: Option<f32>,
    pub room_temperature_calculated: Option<f32>,
    pub outdoor_temperature: Option<f32>,
    pub supply_temperature: Option<f32>,
    pub extract_temperature: Option<f32>,
    pub exhaust_temperature: Option<f32>,
    /// Remote control battery life in percent.
    pub battery_life: Option<u8>,
    pub unit_name: Option<String>,
    pub unit_serial: Option<String>,
    pub current_time: Option<DeviceTime>,
}

impl AirUnitState {
    /// Reading of the given temperature sensor.
    #[must_use]
    pub fn temperature(&self, sensor: TemperatureSensor) -> Option<f32> {
        match sensor {
            TemperatureSensor::Room => self.room_temperature,
            TemperatureSensor::RoomCalculated => self.room_temperature_calculated,
            TemperatureSensor::Outdoor => self.outdoor_temperature,
            TemperatureSensor::Supply => self.supply_temperature,
            TemperatureSensor::Extract => self.extract_temperature,
            TemperatureSensor::Exhaust => self.exhaust_temperature,
        }
    }

    #[must_use]
    pub fn switch(&self, switch: Switch) -> Option<bool> {
        match switch {
            Switch::Boost => self.boost,
            Switch::NightCooling => self.night_cooling,
            Switch::Bypass => self.bypass,
        }
    }

    #[must_use]
    pub fn fan_speed(&self, fan: Fan) -> Option<u16> {
        match fan {
            Fan::Supply => self.supply_fan_speed,
            Fan::Extract => self.extract_fan_speed,
        }
    }

    /// Copy of this snapshot with `mode` replaced.
    #[must_use]
    pub fn with_mode(&self, mode: Mode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Copy of this snapshot with one switch replaced.
    #[must_use]
    pub fn with_switch(&self, switch: Switch, on: bool) -> Self {
        let mut next = self.clone();
        match switch {
            Switch::Boost => next.boost = Some(on),
            Switch::NightCooling => next.night_cooling = Some(on),
            Switch::Bypass => next.bypass = Some(on),
        }
        next
    }

    /// Copy of this snapshot with the manual fan step replaced.
    #[must_use]
    pub fn with_manual_fan_step(&self, percent: u8) -> Self {
        Self {
            manual_fan_step: Some(percent),
            ..self.clone()
        }
    }
}
