//! Air unit port — typed access to the properties of one unit.
//!
//! Every method is exactly one round trip to the unit. Implementations return
//! raw [`DeviceError`]s; classifying them is the orchestrator's job.

use std::future::Future;

use ventlink_domain::address::DeviceAddress;
use ventlink_domain::error::DeviceError;
use ventlink_domain::mode::Mode;
use ventlink_domain::property::{Fan, Switch, TemperatureSensor};
use ventlink_domain::time::DeviceTime;

/// Typed register access to a single unit.
pub trait AirUnit: Send + Sync {
    fn mode(&self) -> impl Future<Output = Result<Mode, DeviceError>> + Send;

    /// Write the operating mode. [`Mode::NotAvailable`] is rejected locally.
    fn set_mode(&self, mode: Mode) -> impl Future<Output = Result<(), DeviceError>> + Send;

    fn switch(&self, switch: Switch) -> impl Future<Output = Result<bool, DeviceError>> + Send;

    fn set_switch(
        &self,
        switch: Switch,
        on: bool,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Manual fan step as a percentage (multiples of ten).
    fn manual_fan_step(&self) -> impl Future<Output = Result<u8, DeviceError>> + Send;

    /// Write the manual fan step; `percent` is rounded to the nearest ten.
    fn set_manual_fan_step(&self, percent: u8)
    -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Fan speed in rpm.
    fn fan_speed(&self, fan: Fan) -> impl Future<Output = Result<u16, DeviceError>> + Send;

    fn fan_step(&self, fan: Fan) -> impl Future<Output = Result<u8, DeviceError>> + Send;

    fn filter_life(&self) -> impl Future<Output = Result<f32, DeviceError>> + Send;

    fn filter_period(&self) -> impl Future<Output = Result<u8, DeviceError>> + Send;

    fn humidity(&self) -> impl Future<Output = Result<f32, DeviceError>> + Send;

    /// Temperature in °C, or `None` when the sensor reports an implausible value.
    fn temperature(
        &self,
        sensor: TemperatureSensor,
    ) -> impl Future<Output = Result<Option<f32>, DeviceError>> + Send;

    fn battery_life(&self) -> impl Future<Output = Result<u8, DeviceError>> + Send;

    fn unit_name(&self) -> impl Future<Output = Result<String, DeviceError>> + Send;

    fn unit_serial(&self) -> impl Future<Output = Result<String, DeviceError>> + Send;

    fn current_time(&self) -> impl Future<Output = Result<DeviceTime, DeviceError>> + Send;
}

/// Builds [`AirUnit`]s bound to a resolved address.
///
/// Called once per orchestrated operation so that every operation talks to
/// the host resolved for it.
pub trait AirUnitConnector: Send + Sync {
    type Unit: AirUnit;

    fn bind(&self, address: &DeviceAddress) -> Self::Unit;
}
