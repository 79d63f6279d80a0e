//! Connection controller — one TCP connection per request, retried once.
//!
//! Every request connects (if needed), writes the frame, reads one response
//! frame and disconnects. When the exchange fails the controller drops the
//! connection, reconnects and tries exactly once more. A failed initial
//! connect is returned as is.
//!
//! Requests on one controller are serialised by an async mutex around the
//! stream.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use ventlink_domain::address::DeviceAddress;

use crate::error::FrameError;
use crate::frame::{RESPONSE_LEN, RequestFrame, Response};

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default response read timeout.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one request frame and returns the response frame.
pub trait FrameTransport: Send + Sync {
    fn request(
        &self,
        op: u16,
        register: u16,
        value: &[u8],
    ) -> impl Future<Output = io::Result<Response>> + Send;
}

/// TCP client for the register protocol of one unit.
#[derive(Debug)]
pub struct ConnectionController {
    address: DeviceAddress,
    connect_timeout: Duration,
    read_timeout: Duration,
    stream: Mutex<Option<TcpStream>>,
}

impl ConnectionController {
    #[must_use]
    pub fn new(address: DeviceAddress) -> Self {
        Self::with_timeouts(address, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeouts(
        address: DeviceAddress,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        Self {
            address,
            connect_timeout,
            read_timeout,
            stream: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Open the connection. Does nothing when already connected.
    ///
    /// # Errors
    ///
    /// Returns the socket error, or [`io::ErrorKind::TimedOut`] when the
    /// connect timeout elapses.
    pub async fn connect(&self) -> io::Result<()> {
        let mut slot = self.stream.lock().await;
        self.open(&mut slot).await
    }

    /// Close the connection. Close errors are logged and swallowed.
    pub async fn disconnect(&self) {
        let mut slot = self.stream.lock().await;
        self.close(&mut slot).await;
    }

    pub async fn is_connected(&self) -> bool {
        self.stream.lock().await.is_some()
    }

    /// Send one request with a single retry and always disconnect afterwards.
    ///
    /// # Errors
    ///
    /// Returns the connect error, or the error of the retried exchange.
    pub async fn send(&self, frame: &RequestFrame) -> io::Result<Response> {
        let mut slot = self.stream.lock().await;
        self.open(&mut slot).await?;

        let result = match self.exchange(&mut slot, frame).await {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::debug!(address = %self.address, error = %err, "request failed, retrying once");
                self.close(&mut slot).await;
                match self.open(&mut slot).await {
                    Ok(()) => self.exchange(&mut slot, frame).await,
                    Err(err) => Err(err),
                }
            }
        };

        self.close(&mut slot).await;
        result
    }

    async fn open(&self, slot: &mut Option<TcpStream>) -> io::Result<()> {
        if slot.is_some() {
            return Ok(());
        }

        tracing::debug!(address = %self.address, timeout_ms = self.connect_timeout.as_millis(), "connecting");
        let target = (self.address.host(), self.address.port());
        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(target))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;

        if let Err(err) = stream.set_nodelay(true) {
            tracing::debug!(address = %self.address, error = %err, "unable to set TCP_NODELAY");
        }

        *slot = Some(stream);
        Ok(())
    }

    async fn close(&self, slot: &mut Option<TcpStream>) {
        if let Some(mut stream) = slot.take() {
            if let Err(err) = stream.shutdown().await {
                tracing::debug!(address = %self.address, error = %err, "connection not closed gracefully");
            }
        }
    }

    async fn exchange(
        &self,
        slot: &mut Option<TcpStream>,
        frame: &RequestFrame,
    ) -> io::Result<Response> {
        let stream = slot
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "not connected"))?;

        stream.write_all(frame.as_bytes()).await?;
        stream.flush().await?;

        let mut buf = [0u8; RESPONSE_LEN];
        let read = tokio::time::timeout(self.read_timeout, stream.read(&mut buf))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "read timed out"))??;
        if read < RESPONSE_LEN {
            return Err(FrameError::ShortResponse {
                read,
                expected: RESPONSE_LEN,
            }
            .into());
        }

        tracing::trace!(address = %self.address, request = ?frame.as_bytes(), "response received");
        Ok(Response::new(buf))
    }
}

impl FrameTransport for ConnectionController {
    fn request(
        &self,
        op: u16,
        register: u16,
        value: &[u8],
    ) -> impl Future<Output = io::Result<Response>> + Send {
        let frame = RequestFrame::new(op, register, value);
        async move { self.send(&frame).await }
    }
}
