use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::core::{Error, MAX_PACKET_SIZE};
use super::message::{Command, Packet};

/// Datagram codec for control and status packets.
///
/// Each call to `decode` consumes the whole buffer as one datagram; there is
/// no framing beyond the datagram boundary.
#[derive(Clone, Debug)]
pub struct PacketCodec {
    max_packet_size: usize,
}

impl PacketCodec {
    /// Creates a codec bounded by the protocol's maximum packet size
    pub fn new() -> Self {
        Self::with_max_packet_size(MAX_PACKET_SIZE)
    }

    /// Creates a codec with a custom packet size bound
    pub fn with_max_packet_size(max_packet_size: usize) -> Self {
        PacketCodec { max_packet_size }
    }

    /// Returns the packet size bound
    pub fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }
}

impl Default for PacketCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let datagram = src.split();
        // Anything past the size bound cannot have been sent by a conforming peer
        let len = datagram.len().min(self.max_packet_size);
        Ok(Packet::parse(&datagram[..len]))
    }
}

impl Encoder<Command> for PacketCodec {
    type Error = Error;

    fn encode(&mut self, item: Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.encode(dst, self.max_packet_size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommandTag, FilterEdges, PacketKind};

    #[test]
    fn test_codec_command_round_trip() {
        let mut codec = PacketCodec::new();
        let mut bytes = BytesMut::new();

        let command = Command::with_tag(CommandTag(0x5eed), FilterEdges::new(-200.0, 300.0));
        codec.encode(command, &mut bytes).unwrap();

        let packet = codec.decode(&mut bytes).unwrap().expect("packet");
        assert_eq!(packet.kind, PacketKind::Command);
        assert_eq!(packet.tag, Some(CommandTag(0x5eed)));
        assert_eq!(packet.edges(), Some(command.edges));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_codec_empty_buffer() {
        let mut codec = PacketCodec::new();
        let mut bytes = BytesMut::new();
        assert!(codec.decode(&mut bytes).unwrap().is_none());
    }

    #[test]
    fn test_codec_capacity() {
        let mut codec = PacketCodec::with_max_packet_size(12);
        let mut bytes = BytesMut::new();
        let command = Command::new(FilterEdges::new(0.0, 1.0));
        assert!(matches!(
            codec.encode(command, &mut bytes),
            Err(Error::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_codec_ignores_bytes_past_bound() {
        let mut codec = PacketCodec::with_max_packet_size(3);
        // The tag record would need four bytes
        let mut bytes = BytesMut::from(&[0u8, 1, 1, 7, 0][..]);
        let packet = codec.decode(&mut bytes).unwrap().unwrap();
        assert_eq!(packet.tag, None);
        assert!(packet.truncated);
    }
}
