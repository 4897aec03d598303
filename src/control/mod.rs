//! Control session module
//!
//! Turns command line frequencies into filter edges, sends the command and
//! waits for the receiver's acknowledgement.

pub mod edges;
pub mod session;

pub use self::edges::{normalize_edges, parse_frequency};
pub use self::session::ControlContext;
