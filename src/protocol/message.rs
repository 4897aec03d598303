use bytes::BytesMut;

use crate::core::{CommandTag, FilterEdges, PacketKind, Result};
use super::status::StatusType;
use super::tlv::{decode_float, decode_int, TlvReader, TlvWriter};

/// Request to move the receiver's filter edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    /// Tag the receiver echoes in its acknowledging status
    pub tag: CommandTag,
    /// Requested edges
    pub edges: FilterEdges,
}

impl Command {
    /// Creates a command with a fresh random tag
    pub fn new(edges: FilterEdges) -> Self {
        Command {
            tag: CommandTag::random(),
            edges,
        }
    }

    /// Creates a command with a caller-chosen tag
    pub fn with_tag(tag: CommandTag, edges: FilterEdges) -> Self {
        Command { tag, edges }
    }

    /// Appends the encoded command to `dst`, writing at most `limit` bytes
    pub fn encode(&self, dst: &mut BytesMut, limit: usize) -> Result<usize> {
        let mut w = TlvWriter::new(dst, limit);
        w.put_byte(PacketKind::Command.as_byte())?;
        w.put_int(StatusType::CommandTag, self.tag.value() as u64)?;
        w.put_float(StatusType::LowEdge, self.edges.low)?;
        w.put_float(StatusType::HighEdge, self.edges.high)?;
        w.put_eol()?;
        Ok(w.written())
    }
}

/// Fields recovered from one datagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packet {
    /// Kind byte
    pub kind: PacketKind,
    /// Echoed command tag, if present
    pub tag: Option<CommandTag>,
    /// Lower edge, if present
    pub low: Option<f32>,
    /// Upper edge, if present
    pub high: Option<f32>,
    /// Whether the record sequence ended without an EOL
    pub truncated: bool,
}

impl Packet {
    /// Parses a datagram. Returns `None` for an empty buffer.
    ///
    /// Records that are cut short end the parse; whatever was read before
    /// them is kept. Later occurrences of a field replace earlier ones.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let (&kind, body) = buf.split_first()?;
        let mut packet = Packet {
            kind: PacketKind::from(kind),
            tag: None,
            low: None,
            high: None,
            truncated: false,
        };

        let mut reader = TlvReader::new(body);
        for record in reader.by_ref() {
            match StatusType::from_byte(record.kind) {
                Some(StatusType::CommandTag) => {
                    packet.tag = Some(CommandTag(decode_int(record.value) as u32));
                }
                Some(StatusType::LowEdge) => packet.low = Some(decode_float(record.value)),
                Some(StatusType::HighEdge) => packet.high = Some(decode_float(record.value)),
                _ => {}
            }
        }
        packet.truncated = !reader.saw_eol();
        Some(packet)
    }

    /// Returns the edges when both are present and numeric, as reported
    pub fn edges(&self) -> Option<FilterEdges> {
        let edges = FilterEdges {
            low: self.low?,
            high: self.high?,
        };
        edges.is_valid().then_some(edges)
    }
}
