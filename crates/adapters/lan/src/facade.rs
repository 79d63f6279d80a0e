//! Typed register facade — [`AirUnit`] over a [`FrameTransport`].
//!
//! Each accessor is one request: look up the property in the
//! [`RegisterMap`], send the read or write opcode, decode the field.

use std::future::Future;
use std::io;
use std::sync::Arc;

use ventlink_app::ports::AirUnit;
use ventlink_domain::error::{DeviceError, ValidationError};
use ventlink_domain::mode::Mode;
use ventlink_domain::property::{Fan, Switch, TemperatureSensor};
use ventlink_domain::time::DeviceTime;

use crate::codec;
use crate::controller::FrameTransport;
use crate::registers::{Property, RegisterMap};

/// Register-level view of one unit.
#[derive(Debug)]
pub struct RegisterFacade<T> {
    transport: T,
    registers: Arc<RegisterMap>,
}

impl<T: FrameTransport> RegisterFacade<T> {
    #[must_use]
    pub fn new(transport: T, registers: Arc<RegisterMap>) -> Self {
        Self {
            transport,
            registers,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn read<const N: usize>(&self, property: Property) -> Result<[u8; N], DeviceError> {
        let spec = *self.registers.get(property);
        let response = self
            .transport
            .request(spec.read_op, spec.address, &[])
            .await?;
        Ok(response.field::<N>(spec.offset).map_err(io::Error::from)?)
    }

    async fn read_byte(&self, property: Property) -> Result<u8, DeviceError> {
        let [byte] = self.read::<1>(property).await?;
        Ok(byte)
    }

    async fn read_tail(&self, property: Property) -> Result<Vec<u8>, DeviceError> {
        let spec = *self.registers.get(property);
        let response = self
            .transport
            .request(spec.read_op, spec.address, &[])
            .await?;
        let tail = response.tail(spec.offset).map_err(io::Error::from)?;
        Ok(tail.to_vec())
    }

    async fn write(&self, property: Property, value: u8) -> Result<(), DeviceError> {
        let spec = *self.registers.get(property);
        let op = spec
            .write_op
            .ok_or(ValidationError::ReadOnly(property.name()))?;
        self.transport.request(op, spec.address, &[value]).await?;
        tracing::debug!(property = property.name(), value, "register written");
        Ok(())
    }
}

impl<T: FrameTransport> AirUnit for RegisterFacade<T> {
    fn mode(&self) -> impl Future<Output = Result<Mode, DeviceError>> + Send {
        async move {
            let byte = self.read_byte(Property::Mode).await?;
            Ok(codec::decode_mode(byte)?)
        }
    }

    fn set_mode(&self, mode: Mode) -> impl Future<Output = Result<(), DeviceError>> + Send {
        async move {
            let value = codec::encode_mode(mode)?;
            self.write(Property::Mode, value).await
        }
    }

    fn switch(&self, switch: Switch) -> impl Future<Output = Result<bool, DeviceError>> + Send {
        async move {
            let byte = self.read_byte(switch.into()).await?;
            Ok(codec::decode_switch(byte))
        }
    }

    fn set_switch(
        &self,
        switch: Switch,
        on: bool,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.write(switch.into(), codec::encode_switch(on))
    }

    fn manual_fan_step(&self) -> impl Future<Output = Result<u8, DeviceError>> + Send {
        async move {
            let byte = self.read_byte(Property::ManualFanStep).await?;
            Ok(codec::decode_fan_step(byte)?)
        }
    }

    fn set_manual_fan_step(
        &self,
        percent: u8,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send {
        async move {
            let value = codec::encode_fan_step(percent)?;
            self.write(Property::ManualFanStep, value).await
        }
    }

    fn fan_speed(&self, fan: Fan) -> impl Future<Output = Result<u16, DeviceError>> + Send {
        async move {
            let bytes = self.read::<2>(Property::fan_speed(fan)).await?;
            Ok(codec::decode_word(bytes))
        }
    }

    fn fan_step(&self, fan: Fan) -> impl Future<Output = Result<u8, DeviceError>> + Send {
        self.read_byte(Property::fan_step(fan))
    }

    fn filter_life(&self) -> impl Future<Output = Result<f32, DeviceError>> + Send {
        async move {
            let byte = self.read_byte(Property::FilterLife).await?;
            Ok(codec::decode_percent(byte))
        }
    }

    fn filter_period(&self) -> impl Future<Output = Result<u8, DeviceError>> + Send {
        self.read_byte(Property::FilterPeriod)
    }

    fn humidity(&self) -> impl Future<Output = Result<f32, DeviceError>> + Send {
        async move {
            let byte = self.read_byte(Property::Humidity).await?;
            Ok(codec::decode_percent(byte))
        }
    }

    fn temperature(
        &self,
        sensor: TemperatureSensor,
    ) -> impl Future<Output = Result<Option<f32>, DeviceError>> + Send {
        async move {
            let bytes = self.read::<2>(sensor.into()).await?;
            let value = codec::decode_temperature(bytes);
            if value.is_none() {
                tracing::info!(sensor = sensor.name(), raw = ?bytes, "implausible temperature dropped");
            }
            Ok(value)
        }
    }

    fn battery_life(&self) -> impl Future<Output = Result<u8, DeviceError>> + Send {
        self.read_byte(Property::BatteryLife)
    }

    fn unit_name(&self) -> impl Future<Output = Result<String, DeviceError>> + Send {
        async move {
            let bytes = self.read_tail(Property::UnitName).await?;
            Ok(codec::decode_name(&bytes))
        }
    }

    fn unit_serial(&self) -> impl Future<Output = Result<String, DeviceError>> + Send {
        async move {
            let bytes = self.read::<2>(Property::UnitSerial).await?;
            Ok(codec::decode_serial(bytes))
        }
    }

    fn current_time(&self) -> impl Future<Output = Result<DeviceTime, DeviceError>> + Send {
        async move {
            let bytes = self.read::<6>(Property::CurrentTime).await?;
            Ok(codec::decode_time(bytes)?)
        }
    }
}
