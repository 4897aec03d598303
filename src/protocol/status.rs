/// TLV type codes understood by this tool.
///
/// The receiver's status enumeration has many more entries; the ones not
/// listed here are legal on the wire and skipped by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusType {
    /// End of the record sequence, carries no length or value
    Eol = 0,
    /// Correlation tag echoed from a command
    CommandTag = 1,
    /// Lower filter edge, Hz
    LowEdge = 39,
    /// Upper filter edge, Hz
    HighEdge = 40,
}

impl StatusType {
    /// Maps a wire type byte to a known type
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(StatusType::Eol),
            1 => Some(StatusType::CommandTag),
            39 => Some(StatusType::LowEdge),
            40 => Some(StatusType::HighEdge),
            _ => None,
        }
    }

    /// Returns the wire type byte
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}
