//! Subnet broadcast addresses of the host's network interfaces.

use std::net::{IpAddr, Ipv4Addr};

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

/// Broadcast address of every IPv4 network on an up, broadcast-capable,
/// non-loopback interface.
///
/// Falls back to the limited broadcast address `255.255.255.255` when no
/// such interface exists.
#[must_use]
pub fn broadcast_addresses() -> Vec<IpAddr> {
    let interfaces = datalink::interfaces();
    tracing::debug!(count = interfaces.len(), "listed network interfaces");
    let addrs = subnet_broadcasts(&interfaces);
    if addrs.is_empty() {
        tracing::debug!("no broadcast-capable interface, using limited broadcast");
        return vec![IpAddr::V4(Ipv4Addr::BROADCAST)];
    }
    addrs
}

fn subnet_broadcasts(interfaces: &[NetworkInterface]) -> Vec<IpAddr> {
    let mut addrs = Vec::new();
    let candidates = interfaces.iter().filter(|i| {
        i.is_up() && i.is_broadcast() && !i.is_loopback() && !i.is_point_to_point()
    });
    for interface in candidates {
        for network in &interface.ips {
            let IpNetwork::V4(network) = network else {
                continue;
            };
            let addr = IpAddr::V4(network.broadcast());
            if !addrs.contains(&addr) {
                tracing::trace!(interface = %interface.name, %addr, "broadcast address");
                addrs.push(addr);
            }
        }
    }
    addrs
}
