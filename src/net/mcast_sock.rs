//! multicast sender socket setup
//!
//! TTL of 1 keeps the datagrams on the local segment.  The speakers sit on
//! the same switch as the sender, so nothing should cross a router.
use crate::common::box_error::BoxError;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

pub fn new_sender() -> Result<UdpSocket, BoxError> {
    let raw_sock = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    raw_sock.set_multicast_ttl_v4(1)?;
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 0);
    let addr2 = SockAddr::from(addr);
    raw_sock.bind(&addr2)?;
    Ok(UdpSocket::from(raw_sock))
}
