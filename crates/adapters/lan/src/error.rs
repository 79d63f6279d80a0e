//! LAN adapter error types.
//!
//! Frame-level failures are wrapped into [`std::io::Error`] so the connection
//! controller treats them like any other transport failure (and retries).

use std::io;

/// Problems with a single response frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The one read of the response returned fewer bytes than a frame holds.
    #[error("short response: read {read} of {expected} bytes")]
    ShortResponse {
        /// Bytes actually read.
        read: usize,
        /// Fixed response size.
        expected: usize,
    },

    /// A configured field does not fit inside the response frame.
    #[error("field of {width} bytes at offset {offset} is outside the response frame")]
    FieldOutOfRange {
        /// Configured byte offset.
        offset: usize,
        /// Field width in bytes.
        width: usize,
    },
}

impl FrameError {
    /// Wrap as an I/O error with a kind matching the failure.
    #[must_use]
    pub fn into_io(self) -> io::Error {
        let kind = match self {
            Self::ShortResponse { .. } => io::ErrorKind::UnexpectedEof,
            Self::FieldOutOfRange { .. } => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, self)
    }
}

impl From<FrameError> for io::Error {
    fn from(err: FrameError) -> Self {
        err.into_io()
    }
}

/// Register map configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum RegisterMapError {
    /// The field of a property would be read past the end of the frame.
    #[error("register {property}: field of {width} bytes at offset {offset} exceeds the {frame_len}-byte frame")]
    OffsetOutOfFrame {
        property: &'static str,
        offset: usize,
        width: usize,
        frame_len: usize,
    },
}
