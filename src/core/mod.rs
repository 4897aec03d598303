//! Core types for the setfilt control protocol
//!
//! This module contains the fundamental building blocks used throughout the library.

pub mod error;
pub mod types;

pub use self::error::{Error, Result};
pub use self::types::{
    CommandTag,
    ControlConfig,
    FilterEdges,
    PacketKind,
};

/// Default port of the receiver's status/control group
pub const DEFAULT_STATUS_PORT: u16 = 5006;

/// Maximum packet size in bytes, both directions
pub const MAX_PACKET_SIZE: usize = 8192;

/// Default multicast TTL for commands
pub const DEFAULT_MCAST_TTL: u32 = 5;

/// Default IP type of service for commands
pub const DEFAULT_IP_TOS: u32 = 0;

/// Locale used when neither --locale nor $LANG is given
pub const DEFAULT_LOCALE: &str = "en_US.UTF-8";
