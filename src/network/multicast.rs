use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, info, trace};

use crate::core::{ControlConfig, Error, Result};
use super::Transport;

/// Status and command channels on the receiver's multicast group
pub struct McastTransport {
    /// Socket joined to the group, used for status
    status: UdpSocket,
    /// Socket connected to the group, used for commands
    control: UdpSocket,
}

impl McastTransport {
    /// Resolves the configured radio and opens both channels
    pub async fn open(config: &ControlConfig) -> Result<Self> {
        let group = resolve_group(&config.radio, config.status_port).await?;

        let status = listen(group).map_err(|e| {
            Error::network(format!(
                "Can't open status socket to radio control channel {}: {}",
                config.radio, e
            ))
        })?;

        let control = connect(group, config.mcast_ttl, config.ip_tos).map_err(|e| {
            Error::network(format!(
                "Can't open cmd socket to radio control channel {}: {}",
                config.radio, e
            ))
        })?;

        info!(radio = %config.radio, %group, "opened radio control channel");
        Ok(McastTransport {
            status,
            control,
        })
    }
}

impl Transport for McastTransport {
    async fn send(&self, packet: &[u8]) -> io::Result<usize> {
        self.control.send(packet).await
    }

    async fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, source) = self.status.recv_from(buf).await?;
        // The source cannot be verified, so it is only logged
        trace!(%source, len, "status datagram");
        Ok(len)
    }
}

/// Resolves a `host[:port]` target to a multicast group address.
///
/// IP literals are used as-is; names go through the system resolver. The
/// first multicast address found wins.
pub async fn resolve_group(target: &str, default_port: u16) -> Result<SocketAddr> {
    let target = target.trim();
    if target.is_empty() {
        return Err(Error::config("radio control channel not specified"));
    }

    let candidates: Vec<SocketAddr> = if let Ok(addr) = target.parse::<SocketAddr>() {
        vec![addr]
    } else if let Ok(ip) = target
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
    {
        vec![SocketAddr::new(ip, default_port)]
    } else {
        let (host, port) = split_host_port(target, default_port)?;
        lookup_host((host, port))
            .await
            .map_err(|e| Error::network(format!("Failed to resolve {}: {}", target, e)))?
            .collect()
    };
    debug!(radio = target, ?candidates, "resolved radio");

    candidates
        .into_iter()
        .find(|addr| addr.ip().is_multicast())
        .ok_or_else(|| Error::network(format!("{} is not a multicast group", target)))
}

fn split_host_port(target: &str, default_port: u16) -> Result<(&str, u16)> {
    match target.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => port
            .parse()
            .map(|port| (host, port))
            .map_err(|_| Error::config(format!("invalid port in {}", target))),
        _ => Ok((target, default_port)),
    }
}

/// Opens a socket that receives datagrams sent to `group`
pub fn listen(group: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(group), Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos"))))]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;

    match group.ip() {
        IpAddr::V4(ip) => {
            socket.bind(&group.into())?;
            socket.join_multicast_v4(&ip, &Ipv4Addr::UNSPECIFIED)?;
        }
        IpAddr::V6(ip) => {
            socket.set_only_v6(true)?;
            socket.bind(&group.into())?;
            socket.join_multicast_v6(&ip, 0)?;
        }
    }

    UdpSocket::from_std(socket.into())
}

/// Opens a socket whose sends go to `group`
pub fn connect(group: SocketAddr, ttl: u32, tos: u32) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(group), Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_nonblocking(true)?;

    match group.ip() {
        IpAddr::V4(_) => {
            socket.set_multicast_ttl_v4(ttl)?;
            socket.set_multicast_loop_v4(true)?;
            socket.set_tos(tos)?;
        }
        IpAddr::V6(_) => {
            socket.set_multicast_hops_v6(ttl)?;
            socket.set_multicast_loop_v6(true)?;
        }
    }
    socket.connect(&group.into())?;

    UdpSocket::from_std(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[tokio::test]
    async fn test_resolve_literal_with_port() {
        let addr = resolve_group("239.1.2.3:5555", 5006).await.unwrap();
        assert_eq!(addr, SocketAddr::new(Ipv4Addr::new(239, 1, 2, 3).into(), 5555));
    }

    #[tokio::test]
    async fn test_resolve_literal_default_port() {
        let addr = resolve_group("239.1.2.3", 5006).await.unwrap();
        assert_eq!(addr.port(), 5006);

        let addr = resolve_group("[ff02::fb]", 5006).await.unwrap();
        assert_eq!(addr.ip(), IpAddr::V6(Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb)));
        assert_eq!(addr.port(), 5006);
    }

    #[tokio::test]
    async fn test_resolve_rejects_unicast() {
        let err = resolve_group("10.0.0.1:5006", 5006).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_resolve_bad_input() {
        assert!(matches!(resolve_group("  ", 5006).await, Err(Error::Config(_))));
        assert!(matches!(
            resolve_group("radio.local:port", 5006).await,
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("hf.local:5010", 1).unwrap(), ("hf.local", 5010));
        assert_eq!(split_host_port("hf.local", 5006).unwrap(), ("hf.local", 5006));
    }
}
