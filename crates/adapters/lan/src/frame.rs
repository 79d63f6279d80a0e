//! Wire frames of the register protocol.
//!
//! | Direction | Layout |
//! |-----------|--------|
//! | request | opcode (u16 BE) · register (u16 BE) · value (0..n bytes) |
//! | response | exactly [`RESPONSE_LEN`] bytes |

use crate::error::FrameError;

/// Size of every response frame.
pub const RESPONSE_LEN: usize = 63;

/// An outgoing request. Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    bytes: Vec<u8>,
}

impl RequestFrame {
    /// Concatenate opcode, register address and value.
    ///
    /// Reads carry an empty value.
    #[must_use]
    pub fn new(op: u16, register: u16, value: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(4 + value.len());
        bytes.extend_from_slice(&op.to_be_bytes());
        bytes.extend_from_slice(&register.to_be_bytes());
        bytes.extend_from_slice(value);
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A complete response frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response([u8; RESPONSE_LEN]);

impl Response {
    #[must_use]
    pub fn new(bytes: [u8; RESPONSE_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; RESPONSE_LEN] {
        &self.0
    }

    /// `N` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::FieldOutOfRange`] when the field does not fit.
    pub fn field<const N: usize>(&self, offset: usize) -> Result<[u8; N], FrameError> {
        offset
            .checked_add(N)
            .and_then(|end| self.0.get(offset..end))
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(FrameError::FieldOutOfRange { offset, width: N })
    }

    /// Every byte from `offset` to the end of the frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::FieldOutOfRange`] when `offset` is past the end.
    pub fn tail(&self, offset: usize) -> Result<&[u8], FrameError> {
        self.0
            .get(offset..)
            .filter(|rest| !rest.is_empty())
            .ok_or(FrameError::FieldOutOfRange { offset, width: 1 })
    }
}
