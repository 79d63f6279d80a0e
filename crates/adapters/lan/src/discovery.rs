//! UDP broadcast discovery of units on the local network.
//!
//! A fixed query is broadcast to every configured address, or to each local
//! interface's subnet broadcast address when none is configured. Units
//! answer with a fixed 7-byte reply; the source address of the first exact
//! reply is the unit's host.

use std::future::Future;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::UdpSocket;

use ventlink_app::ports::DiscoveryProbe;

use crate::config::DiscoveryConfig;
use crate::interfaces;

/// Discovery query datagram.
pub const QUERY: [u8; 9] = [0x0c, 0x00, 0x30, 0x00, 0x11, 0x00, 0x12, 0x00, 0x13];
/// Reply datagram of a unit.
pub const REPLY: [u8; 7] = [0x0d, 0x00, 0x07, 0x00, 0x02, 0x02, 0x00];

/// [`DiscoveryProbe`] backed by UDP broadcast.
#[derive(Debug, Clone, Default)]
pub struct UdpDiscovery {
    config: DiscoveryConfig,
}

impl UdpDiscovery {
    #[must_use]
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Query every broadcast address in turn until one yields a unit.
    ///
    /// # Errors
    ///
    /// Returns socket errors; silence is `Ok(None)`.
    pub async fn scan(&self) -> io::Result<Option<IpAddr>> {
        for addr in self.targets() {
            let target = SocketAddr::new(addr, self.config.port);
            if let Some(host) = self.query(target).await? {
                return Ok(Some(host));
            }
        }
        Ok(None)
    }

    fn targets(&self) -> Vec<IpAddr> {
        if self.config.broadcast_addrs.is_empty() {
            interfaces::broadcast_addresses()
        } else {
            self.config.broadcast_addrs.clone()
        }
    }

    async fn query(&self, target: SocketAddr) -> io::Result<Option<IpAddr>> {
        let local: IpAddr = if target.is_ipv4() {
            Ipv4Addr::UNSPECIFIED.into()
        } else {
            Ipv6Addr::UNSPECIFIED.into()
        };
        let socket = UdpSocket::bind(SocketAddr::new(local, 0)).await?;
        socket.set_broadcast(true)?;
        socket.send_to(&QUERY, target).await?;
        tracing::debug!(%target, "discovery query sent");

        let deadline = tokio::time::Instant::now() + self.config.timeout();
        let mut buf = [0u8; 64];
        loop {
            let Ok(received) = tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await
            else {
                tracing::debug!(%target, "no unit answered");
                return Ok(None);
            };
            let (len, source) = received?;
            if buf[..len] == REPLY {
                tracing::info!(host = %source.ip(), "unit discovered");
                return Ok(Some(source.ip()));
            }
            tracing::trace!(%source, len, "ignoring unrelated datagram");
        }
    }
}

impl DiscoveryProbe for UdpDiscovery {
    fn probe(&self) -> impl Future<Output = Option<String>> + Send {
        async move {
            match self.scan().await {
                Ok(host) => host.map(|ip| ip.to_string()),
                Err(err) => {
                    tracing::warn!(error = %err, "discovery failed");
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Answer the first query with the given datagrams, in order.
    async fn fake_unit(replies: Vec<Vec<u8>>) -> (u16, tokio::task::JoinHandle<Vec<u8>>) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let (len, peer) = socket.recv_from(&mut buf).await.unwrap();
            for reply in replies {
                socket.send_to(&reply, peer).await.unwrap();
            }
            buf[..len].to_vec()
        });
        (port, handle)
    }

    fn loopback(port: u16) -> UdpDiscovery {
        UdpDiscovery::new(DiscoveryConfig {
            broadcast_addrs: vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
            port,
            timeout_ms: 200,
        })
    }

    #[tokio::test]
    async fn should_return_host_of_replying_unit() {
        let (port, unit) = fake_unit(vec![REPLY.to_vec()]).await;

        let host = loopback(port).probe().await;

        assert_eq!(host.as_deref(), Some("127.0.0.1"));
        assert_eq!(unit.await.unwrap(), QUERY.to_vec());
    }

    #[tokio::test]
    async fn should_skip_unrelated_datagrams() {
        let mut longer = REPLY.to_vec();
        longer.push(0);
        let (port, _unit) = fake_unit(vec![vec![1, 2, 3], longer, REPLY.to_vec()]).await;

        let host = loopback(port).probe().await;

        assert_eq!(host.as_deref(), Some("127.0.0.1"));
    }

    #[tokio::test]
    async fn should_return_none_when_only_garbage_arrives() {
        let (port, _unit) = fake_unit(vec![vec![0x0d, 0x00]]).await;

        assert_eq!(loopback(port).probe().await, None);
    }

    #[test]
    fn should_prefer_configured_addresses_over_interfaces() {
        assert_eq!(loopback(1).targets(), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
        assert!(!UdpDiscovery::default().targets().is_empty());
    }

    #[tokio::test]
    async fn should_return_none_when_nothing_answers() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();

        let started = tokio::time::Instant::now();
        let host = loopback(port).probe().await;

        assert_eq!(host, None);
        assert!(started.elapsed() >= Duration::from_millis(200));
        drop(socket);
    }
}
