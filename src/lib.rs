//! setfilt: set a receiver's predetection filter over its control channel
//!
//! A command carrying the new filter edges and a random tag is multicast to
//! the receiver; success is confirmed by the status broadcast that echoes
//! the tag. Without edges, the first status seen reports the current filter.
pub mod core;

pub mod control;
pub mod network;
pub mod protocol;
pub mod util;

// Re-export commonly used items
pub use crate::control::{normalize_edges, ControlContext};
pub use crate::core::{CommandTag, ControlConfig, Error, FilterEdges, Result};
pub use crate::network::{McastTransport, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
