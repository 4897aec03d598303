use crate::core::{CommandTag, Error, FilterEdges, PacketKind, Result};
use super::message::Packet;

/// Where the correlator is in its wait for a status
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrelatorState {
    /// Nothing registered yet
    Idle,
    /// No command was sent; the first valid status wins
    AwaitingFirstStatus,
    /// A command was sent; only a status echoing its tag wins
    AwaitingAck(CommandTag),
    /// A status was accepted
    Accepted(FilterEdges),
}

/// What happened to one observed packet
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disposition {
    /// The packet ended the wait with these edges
    Accepted(FilterEdges),
    /// Not a status packet
    NotStatus(PacketKind),
    /// One or both edges absent or not a number
    MissingEdges,
    /// A command is outstanding and the packet does not echo its tag
    TagMismatch {
        /// Tag of the outstanding command
        expected: CommandTag,
        /// Tag carried by the packet, if any
        received: Option<CommandTag>,
    },
    /// The correlator is idle or already accepted a status
    NotWaiting,
}

/// Single-slot correlation of one outstanding command with its status.
///
/// At most one tag can be pending; a second registration is refused.
#[derive(Debug)]
pub struct Correlator {
    state: CorrelatorState,
}

impl Correlator {
    /// Creates an idle correlator
    pub fn new() -> Self {
        Correlator {
            state: CorrelatorState::Idle,
        }
    }

    /// Returns the current state
    pub fn state(&self) -> CorrelatorState {
        self.state
    }

    /// Returns the accepted edges, once there are any
    pub fn result(&self) -> Option<FilterEdges> {
        match self.state {
            CorrelatorState::Accepted(edges) => Some(edges),
            _ => None,
        }
    }

    /// Waits for the first valid status without a command outstanding
    pub fn watch(&mut self) -> Result<()> {
        match self.state {
            CorrelatorState::Idle => {
                self.state = CorrelatorState::AwaitingFirstStatus;
                Ok(())
            }
            CorrelatorState::AwaitingFirstStatus => Ok(()),
            other => Err(Error::invalid_state(format!("cannot watch while {:?}", other))),
        }
    }

    /// Records the tag of a command that was just sent
    pub fn register(&mut self, tag: CommandTag) -> Result<()> {
        match self.state {
            CorrelatorState::Idle => {
                self.state = CorrelatorState::AwaitingAck(tag);
                Ok(())
            }
            other => Err(Error::invalid_state(format!(
                "command {} already registered or finished ({:?})",
                tag, other
            ))),
        }
    }

    /// Evaluates a received packet and advances the state
    pub fn observe(&mut self, packet: &Packet) -> Disposition {
        let expected = match self.state {
            CorrelatorState::AwaitingFirstStatus => None,
            CorrelatorState::AwaitingAck(tag) => Some(tag),
            CorrelatorState::Idle | CorrelatorState::Accepted(_) => return Disposition::NotWaiting,
        };

        if packet.kind != PacketKind::Status {
            return Disposition::NotStatus(packet.kind);
        }

        let Some(edges) = packet.edges() else {
            return Disposition::MissingEdges;
        };

        if let Some(expected) = expected {
            if packet.tag != Some(expected) {
                return Disposition::TagMismatch {
                    expected,
                    received: packet.tag,
                };
            }
        }

        self.state = CorrelatorState::Accepted(edges);
        Disposition::Accepted(edges)
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new()
    }
}
