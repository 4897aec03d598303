//! Network transport module
//!
//! The control session only needs to send one datagram and receive many.
//! `Transport` captures that; `McastTransport` provides it over the
//! receiver's multicast group.

mod multicast;

pub use self::multicast::{connect, listen, resolve_group, McastTransport};

use std::future::Future;
use std::io;

/// Datagram send/receive over an already joined group
pub trait Transport {
    /// Sends one packet on the command channel, returning the bytes sent
    fn send(&self, packet: &[u8]) -> impl Future<Output = io::Result<usize>>;

    /// Waits for one packet on the status channel, returning its length
    fn receive(&mut self, buf: &mut [u8]) -> impl Future<Output = io::Result<usize>>;
}
