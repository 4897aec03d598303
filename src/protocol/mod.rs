//! Protocol implementation module
//!
//! This module defines the tagged TLV status/command packets, their
//! encoding and defensive decoding, and the state machine that matches a
//! sent command with the status that acknowledges it.

pub mod codec;
pub mod message;
pub mod state;
pub mod status;
pub mod tlv;

pub use self::codec::PacketCodec;
pub use self::message::{Command, Packet};
pub use self::state::{Correlator, CorrelatorState, Disposition};
pub use self::status::StatusType;
pub use self::tlv::{Tlv, TlvReader, TlvWriter};
