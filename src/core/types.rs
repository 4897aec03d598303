use std::fmt;
use std::time::Duration;

/// Passband bounds of the predetection filter, in Hz relative to the carrier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterEdges {
    /// Lower edge in Hz (negative is below the carrier)
    pub low: f32,
    /// Upper edge in Hz
    pub high: f32,
}

impl FilterEdges {
    /// Creates a pair of edges, swapping them if needed so that `low <= high`
    pub fn new(a: f32, b: f32) -> Self {
        if a > b {
            FilterEdges { low: b, high: a }
        } else {
            FilterEdges { low: a, high: b }
        }
    }

    /// Returns whether both edges are numbers
    pub fn is_valid(&self) -> bool {
        !self.low.is_nan() && !self.high.is_nan()
    }
}

impl fmt::Display for FilterEdges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} <-> {:.0} Hz", self.low, self.high)
    }
}

/// Correlation token attached to a command and echoed by the matching status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandTag(pub u32);

impl CommandTag {
    /// Generates a new random tag
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        CommandTag(rng.gen())
    }

    /// Returns the raw tag value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Discriminator carried in the first byte of every packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    /// Status broadcast from the receiver
    Status,
    /// Command sent to the receiver
    Command,
    /// Anything else seen on the channel
    Unknown(u8),
}

impl PacketKind {
    /// Returns the wire value of this kind
    pub fn as_byte(&self) -> u8 {
        match self {
            PacketKind::Status => 0,
            PacketKind::Command => 1,
            PacketKind::Unknown(b) => *b,
        }
    }
}

impl From<u8> for PacketKind {
    fn from(b: u8) -> Self {
        match b {
            0 => PacketKind::Status,
            1 => PacketKind::Command,
            other => PacketKind::Unknown(other),
        }
    }
}

/// Configuration for a control session
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Control channel of the target receiver, `host[:port]`
    pub radio: String,
    /// Port used when the target names none
    pub status_port: u16,
    /// Multicast TTL for outgoing commands
    pub mcast_ttl: u32,
    /// IP type of service for outgoing commands
    pub ip_tos: u32,
    /// Pause after a failed receive before trying again
    pub retry_delay: Duration,
    /// How long to wait for a qualifying status; `None` waits forever
    pub deadline: Option<Duration>,
    /// Locale used when printing results
    pub locale: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        ControlConfig {
            radio: String::new(),
            status_port: super::DEFAULT_STATUS_PORT,
            mcast_ttl: super::DEFAULT_MCAST_TTL,
            ip_tos: super::DEFAULT_IP_TOS,
            retry_delay: Duration::from_secs(1),
            deadline: None,
            locale: super::DEFAULT_LOCALE.to_string(),
        }
    }
}
