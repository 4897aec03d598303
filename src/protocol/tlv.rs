//! Type-length-value records
//!
//! Each record is a type byte, a length byte and `length` value bytes. The
//! EOL type ends a packet and is written as the type byte alone.

use bytes::{BufMut, BytesMut};

use crate::core::{Error, Result};
use super::status::StatusType;

/// Largest value a single record can carry
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// Bounded cursor that appends records to a packet buffer.
///
/// `limit` is the total packet size the writer may fill; every write checks
/// it first and fails with `CapacityExceeded` instead of overrunning.
pub struct TlvWriter<'a> {
    dst: &'a mut BytesMut,
    start: usize,
    limit: usize,
}

impl<'a> TlvWriter<'a> {
    /// Creates a writer appending to `dst`, allowing at most `limit` bytes
    pub fn new(dst: &'a mut BytesMut, limit: usize) -> Self {
        let start = dst.len();
        TlvWriter { dst, start, limit }
    }

    /// Returns the number of bytes written so far
    pub fn written(&self) -> usize {
        self.dst.len() - self.start
    }

    /// Returns the number of bytes still available
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.written())
    }

    fn reserve(&mut self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(Error::capacity(needed, remaining));
        }
        self.dst.reserve(needed);
        Ok(())
    }

    /// Writes a single raw byte, used for the packet kind
    pub fn put_byte(&mut self, b: u8) -> Result<()> {
        self.reserve(1)?;
        self.dst.put_u8(b);
        Ok(())
    }

    /// Writes a record with an arbitrary type code and value
    pub fn put_record(&mut self, kind: u8, value: &[u8]) -> Result<()> {
        if value.len() > MAX_VALUE_LEN {
            return Err(Error::protocol(format!(
                "TLV value of {} bytes exceeds {}",
                value.len(),
                MAX_VALUE_LEN
            )));
        }
        self.reserve(2 + value.len())?;
        self.dst.put_u8(kind);
        self.dst.put_u8(value.len() as u8);
        self.dst.put_slice(value);
        Ok(())
    }

    /// Writes an integer using the fewest big-endian bytes
    pub fn put_int(&mut self, kind: StatusType, x: u64) -> Result<()> {
        let bytes = x.to_be_bytes();
        let skip = (x.leading_zeros() / 8) as usize;
        self.put_record(kind.as_byte(), &bytes[skip..])
    }

    /// Writes a float as its four big-endian IEEE-754 bytes
    pub fn put_float(&mut self, kind: StatusType, f: f32) -> Result<()> {
        self.put_record(kind.as_byte(), &f.to_bits().to_be_bytes())
    }

    /// Terminates the record sequence
    pub fn put_eol(&mut self) -> Result<()> {
        self.put_byte(StatusType::Eol.as_byte())
    }
}

/// One record borrowed from a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    /// Raw type code
    pub kind: u8,
    /// Value bytes, exactly as long as the record declared
    pub value: &'a [u8],
}

/// Iterator over the records of a packet body.
///
/// Stops at EOL, at the end of the buffer, or at the first record whose
/// declared length runs past the buffer. Records before that point are
/// still yielded.
pub struct TlvReader<'a> {
    buf: &'a [u8],
    pos: usize,
    done: bool,
    eol: bool,
}

impl<'a> TlvReader<'a> {
    /// Creates a reader over the records in `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        TlvReader {
            buf,
            pos: 0,
            done: false,
            eol: false,
        }
    }

    /// Returns whether the EOL record was reached
    pub fn saw_eol(&self) -> bool {
        self.eol
    }
}

impl<'a> Iterator for TlvReader<'a> {
    type Item = Tlv<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.buf.len() {
            self.done = true;
            return None;
        }

        let kind = self.buf[self.pos];
        self.pos += 1;
        if kind == StatusType::Eol.as_byte() {
            self.done = true;
            self.eol = true;
            return None;
        }

        let Some(&len) = self.buf.get(self.pos) else {
            self.done = true;
            return None;
        };
        self.pos += 1;

        let end = self.pos + len as usize;
        if end > self.buf.len() {
            // Declared length runs past the buffer; treat the rest as truncated
            self.done = true;
            return None;
        }

        let value = &self.buf[self.pos..end];
        self.pos = end;
        Some(Tlv { kind, value })
    }
}

/// Decodes a big-endian integer of any width, keeping the low 64 bits
pub fn decode_int(value: &[u8]) -> u64 {
    value.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// Decodes a float.
///
/// An empty value is zero, an eight byte value is a double narrowed to
/// single precision, and anything else is the big-endian bit pattern of a
/// single, zero-extended when shorter than four bytes.
pub fn decode_float(value: &[u8]) -> f32 {
    match value.len() {
        0 => 0.0,
        8 => f64::from_bits(decode_int(value)) as f32,
        _ => f32::from_bits(decode_int(value) as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(buf: &[u8]) -> Vec<(u8, Vec<u8>)> {
        TlvReader::new(buf).map(|t| (t.kind, t.value.to_vec())).collect()
    }

    #[test]
    fn test_int_minimal_width() {
        let mut buf = BytesMut::new();
        let mut w = TlvWriter::new(&mut buf, 64);
        w.put_int(StatusType::CommandTag, 0).unwrap();
        w.put_int(StatusType::CommandTag, 0x7f).unwrap();
        w.put_int(StatusType::CommandTag, 0x1234).unwrap();
        w.put_int(StatusType::CommandTag, 0xdead_beef).unwrap();
        assert_eq!(
            &buf[..],
            &[1, 0, 1, 1, 0x7f, 1, 2, 0x12, 0x34, 1, 4, 0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn test_float_fixed_width() {
        let mut buf = BytesMut::new();
        let mut w = TlvWriter::new(&mut buf, 64);
        w.put_float(StatusType::LowEdge, 0.0).unwrap();
        w.put_float(StatusType::HighEdge, 1.0).unwrap();
        w.put_eol().unwrap();
        assert_eq!(w.written(), 13);
        assert_eq!(
            &buf[..],
            &[39, 4, 0, 0, 0, 0, 40, 4, 0x3f, 0x80, 0, 0, 0]
        );
    }

    #[test]
    fn test_writer_capacity() {
        let mut buf = BytesMut::new();
        let mut w = TlvWriter::new(&mut buf, 8);
        w.put_byte(1).unwrap();
        w.put_float(StatusType::LowEdge, 100.0).unwrap();
        assert_eq!(w.remaining(), 1);
        let err = w.put_float(StatusType::HighEdge, 200.0).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { needed: 6, remaining: 1 }));
        // Failed writes leave the buffer untouched
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_writer_rejects_oversized_value() {
        let mut buf = BytesMut::new();
        let mut w = TlvWriter::new(&mut buf, 1024);
        let value = [0u8; 256];
        assert!(matches!(w.put_record(99, &value), Err(Error::Protocol(_))));
        assert!(w.put_record(99, &value[..255]).is_ok());
    }

    #[test]
    fn test_writer_appends_after_existing_bytes() {
        let mut buf = BytesMut::from(&b"xyz"[..]);
        let mut w = TlvWriter::new(&mut buf, 2);
        w.put_eol().unwrap();
        w.put_byte(0).unwrap();
        assert!(w.put_byte(0).is_err());
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_reader_stops_at_eol() {
        let buf = [1, 1, 0x2a, 0, 39, 4, 0, 0, 0, 0];
        let mut reader = TlvReader::new(&buf);
        assert_eq!(reader.next(), Some(Tlv { kind: 1, value: &[0x2a] }));
        assert_eq!(reader.next(), None);
        assert!(reader.saw_eol());
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn test_reader_skips_unknown_types() {
        let buf = [7, 3, 9, 9, 9, 1, 1, 5, 0];
        assert_eq!(records(&buf), vec![(7, vec![9, 9, 9]), (1, vec![5])]);
    }

    #[test]
    fn test_reader_keeps_records_before_bad_length() {
        let buf = [1, 1, 5, 39, 200, 1, 2, 3];
        let mut reader = TlvReader::new(&buf);
        assert_eq!(reader.next(), Some(Tlv { kind: 1, value: &[5] }));
        assert_eq!(reader.next(), None);
        assert!(!reader.saw_eol());
    }

    #[test]
    fn test_every_prefix_is_safe() {
        let mut buf = BytesMut::new();
        let mut w = TlvWriter::new(&mut buf, 64);
        w.put_int(StatusType::CommandTag, 0x0102_0304).unwrap();
        w.put_float(StatusType::LowEdge, -200.0).unwrap();
        w.put_float(StatusType::HighEdge, 300.0).unwrap();
        w.put_eol().unwrap();

        let full = records(&buf);
        assert_eq!(full.len(), 3);
        // Boundaries where each record becomes complete
        let ends = [6, 12, 18];
        for cut in 0..=buf.len() {
            let got = records(&buf[..cut]);
            let complete = ends.iter().filter(|&&e| e <= cut).count();
            assert_eq!(got, full[..complete].to_vec(), "prefix {}", cut);
        }
    }

    #[test]
    fn test_decode_int_widths() {
        assert_eq!(decode_int(&[]), 0);
        assert_eq!(decode_int(&[0x12]), 0x12);
        assert_eq!(decode_int(&[0x12, 0x34, 0x56]), 0x12_3456);
        let wide = [0xff, 1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(decode_int(&wide), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_decode_float_widths() {
        assert_eq!(decode_float(&[]), 0.0);
        assert_eq!(decode_float(&300.0f32.to_bits().to_be_bytes()), 300.0);
        assert_eq!(decode_float(&(-2400.5f64).to_bits().to_be_bytes()), -2400.5);
        // Short values are zero-extended bit patterns
        assert_eq!(decode_float(&[0x01]), f32::from_bits(1));
        assert_eq!(decode_float(&[0x3f, 0x80, 0x00, 0x00]), 1.0);
    }
}
