//! Value codecs — raw frame fields to domain values and back.
//!
//! Pure functions, no I/O. Multi-byte fields are big-endian.

use ventlink_domain::error::{UnexpectedValueError, ValidationError};
use ventlink_domain::mode::Mode;
use ventlink_domain::time::{DeviceTime, local_time};

/// Temperatures at or below this are sensor faults.
const MIN_TEMPERATURE: f32 = -274.0;
/// Temperatures above this are sensor faults.
const MAX_TEMPERATURE: f32 = 100.0;
/// Manual fan steps are sent as tenths.
const FAN_STEPS: u8 = 10;

/// Mode ordinal to [`Mode`].
///
/// # Errors
///
/// Returns [`UnexpectedValueError::ModeOrdinal`] for unknown ordinals.
pub fn decode_mode(byte: u8) -> Result<Mode, UnexpectedValueError> {
    Mode::from_ordinal(byte)
}

/// [`Mode`] to its ordinal byte.
///
/// # Errors
///
/// Returns [`ValidationError::UnwritableMode`] for [`Mode::NotAvailable`].
pub fn encode_mode(mode: Mode) -> Result<u8, ValidationError> {
    mode.ordinal().ok_or(ValidationError::UnwritableMode(mode))
}

/// Any non-zero byte is on.
#[must_use]
pub fn decode_switch(byte: u8) -> bool {
    byte != 0
}

#[must_use]
pub fn encode_switch(on: bool) -> u8 {
    u8::from(on)
}

/// Manual fan step `0..=10` to a percentage.
///
/// # Errors
///
/// Returns [`UnexpectedValueError::FanStep`] outside `0..=10`.
pub fn decode_fan_step(byte: u8) -> Result<u8, UnexpectedValueError> {
    if byte > FAN_STEPS {
        return Err(UnexpectedValueError::FanStep(byte));
    }
    Ok(byte * 10)
}

/// Percentage to the nearest manual fan step.
///
/// # Errors
///
/// Returns [`ValidationError::FanStepOutOfRange`] above 100.
pub fn encode_fan_step(percent: u8) -> Result<u8, ValidationError> {
    if percent > 100 {
        return Err(ValidationError::FanStepOutOfRange(percent));
    }
    Ok((percent + 5) / 10)
}

#[must_use]
pub fn decode_word(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Byte scaled from `0..=255` to `0.0..=100.0`.
#[must_use]
pub fn decode_percent(byte: u8) -> f32 {
    f32::from(byte) * 100.0 / 255.0
}

/// Hundredths of a degree to °C; implausible readings become `None`.
#[must_use]
pub fn decode_temperature(bytes: [u8; 2]) -> Option<f32> {
    let celsius = f32::from(i16::from_be_bytes(bytes)) / 100.0;
    (celsius > MIN_TEMPERATURE && celsius <= MAX_TEMPERATURE).then_some(celsius)
}

/// Length-prefixed ASCII text.
///
/// The length is clamped to the bytes available. Padding (NUL and spaces)
/// is trimmed.
#[must_use]
pub fn decode_name(bytes: &[u8]) -> String {
    let Some((&len, rest)) = bytes.split_first() else {
        return String::new();
    };
    let text = &rest[..usize::from(len).min(rest.len())];
    text.iter()
        .map(|b| if b.is_ascii() { char::from(*b) } else { '?' })
        .collect::<String>()
        .trim_matches(|c: char| c == '\0' || c == ' ')
        .to_string()
}

/// Serial number as decimal text.
#[must_use]
pub fn decode_serial(bytes: [u8; 2]) -> String {
    u16::from_be_bytes(bytes).to_string()
}

/// Packed local time: second, minute, hour, day, month, year since 2000.
///
/// Hour and day carry flags in their high bits and are masked to five bits.
///
/// # Errors
///
/// Returns [`UnexpectedValueError::Timestamp`] when the fields do not form
/// a valid local time.
pub fn decode_time(bytes: [u8; 6]) -> Result<DeviceTime, UnexpectedValueError> {
    let [second, minute, hour, day, month, year] = bytes;
    let second = u32::from(second);
    let minute = u32::from(minute);
    let hour = u32::from(hour & 0x1f);
    let day = u32::from(day & 0x1f);
    let month = u32::from(month);
    let year = i32::from(i8::from_be_bytes([year])) + 2000;
    local_time(year, month, day, hour, minute, second).ok_or(UnexpectedValueError::Timestamp {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn should_decode_mode_ordinals() {
        assert_eq!(decode_mode(0).unwrap(), Mode::Demand);
        assert_eq!(decode_mode(2).unwrap(), Mode::Manual);
        assert_eq!(decode_mode(3).unwrap(), Mode::Off);
        assert!(matches!(
            decode_mode(4),
            Err(UnexpectedValueError::ModeOrdinal(4))
        ));
    }

    #[test]
    fn should_encode_writable_modes_and_reject_placeholder() {
        for mode in Mode::WRITABLE {
            assert_eq!(decode_mode(encode_mode(mode).unwrap()).unwrap(), mode);
        }
        assert!(matches!(
            encode_mode(Mode::NotAvailable),
            Err(ValidationError::UnwritableMode(Mode::NotAvailable))
        ));
    }

    #[test]
    fn should_treat_any_non_zero_byte_as_on() {
        assert!(!decode_switch(0));
        assert!(decode_switch(1));
        assert!(decode_switch(0x80));
        assert_eq!(encode_switch(true), 1);
        assert_eq!(encode_switch(false), 0);
    }

    #[test]
    fn should_decode_fan_step_as_percentage() {
        assert_eq!(decode_fan_step(0).unwrap(), 0);
        assert_eq!(decode_fan_step(4).unwrap(), 40);
        assert_eq!(decode_fan_step(10).unwrap(), 100);
        assert!(matches!(
            decode_fan_step(11),
            Err(UnexpectedValueError::FanStep(11))
        ));
        assert!(decode_fan_step(0xFF).is_err());
    }

    #[test]
    fn should_round_fan_step_to_nearest_ten() {
        assert_eq!(encode_fan_step(0).unwrap(), 0);
        assert_eq!(encode_fan_step(44).unwrap(), 4);
        assert_eq!(encode_fan_step(45).unwrap(), 5);
        assert_eq!(encode_fan_step(100).unwrap(), 10);
        assert!(matches!(
            encode_fan_step(101),
            Err(ValidationError::FanStepOutOfRange(101))
        ));
    }

    #[test]
    fn should_decode_big_endian_word() {
        assert_eq!(decode_word([0x05, 0xDC]), 1500);
        assert_eq!(decode_word([0xFF, 0xFF]), u16::MAX);
    }

    #[test]
    fn should_scale_percent_byte() {
        assert!((decode_percent(255) - 100.0).abs() < f32::EPSILON);
        assert!(decode_percent(0).abs() < f32::EPSILON);
        assert!((decode_percent(128) - 50.196).abs() < 0.001);
    }

    #[test]
    fn should_decode_temperature_in_hundredths() {
        let value = decode_temperature(2150_i16.to_be_bytes()).unwrap();
        assert!((value - 21.5).abs() < f32::EPSILON);
        let value = decode_temperature((-550_i16).to_be_bytes()).unwrap();
        assert!((value + 5.5).abs() < f32::EPSILON);
    }

    #[test]
    fn should_drop_implausible_temperatures() {
        assert_eq!(decode_temperature((-27_400_i16).to_be_bytes()), None);
        assert_eq!(decode_temperature(10_001_i16.to_be_bytes()), None);
        assert!(decode_temperature(10_000_i16.to_be_bytes()).is_some());
        assert!(decode_temperature((-27_399_i16).to_be_bytes()).is_some());
    }

    #[test]
    fn should_decode_length_prefixed_name() {
        let mut bytes = vec![6];
        bytes.extend_from_slice(b"w2 170");
        bytes.extend_from_slice(b"garbage");
        assert_eq!(decode_name(&bytes), "w2 170");
    }

    #[test]
    fn should_trim_name_padding_and_clamp_length() {
        let bytes = [40, b'a', b'b', b' ', 0, 0];
        assert_eq!(decode_name(&bytes), "ab");
        assert_eq!(decode_name(&[]), "");
        assert_eq!(decode_name(&[0, b'x']), "");
    }

    #[test]
    fn should_render_serial_as_decimal() {
        assert_eq!(decode_serial([0x30, 0x39]), "12345");
        assert_eq!(decode_serial([0, 0]), "0");
    }

    #[test]
    fn should_decode_packed_time() {
        let time = decode_time([30, 15, 0x80 | 9, 0x40 | 12, 3, 24]).unwrap();
        assert_eq!(time.year(), 2024);
        assert_eq!(time.month(), 3);
        assert_eq!(time.day(), 12);
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 15);
        assert_eq!(time.second(), 30);
    }

    #[test]
    fn should_reject_invalid_packed_time() {
        let err = decode_time([0, 0, 0, 31, 2, 24]).unwrap_err();
        assert_eq!(err.to_string(), "invalid timestamp 31.2.2024 0:0:0");
        assert!(decode_time([0, 0, 0, 1, 13, 24]).is_err());
    }
}
