//! RFC 1035 wire format: header flags, domain names, RDATA and whole messages.
//!
//! Every function here is pure; [`WireCodec`] is a zero-sized handle for code
//! that wants to hold "a codec" rather than call free functions.
pub mod flags;
pub mod message;
pub mod name;
pub mod rdata;

pub use flags::{decode_flags, encode_flags};
pub use message::{decode_header, decode_message, encode_message, HEADER_LEN};
pub use name::{
    decode_name, encode_name, fqdn, trim_root, write_name, MAX_LABEL_LEN, MAX_NAME_LEN,
};
pub use rdata::{decode_rdata, encode_rdata};

use crate::{DnsMessage, DomainError};

#[derive(Debug, Clone, Copy, Default)]
pub struct WireCodec;

impl WireCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, buf: &[u8]) -> Result<DnsMessage, DomainError> {
        decode_message(buf)
    }

    pub fn encode(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        encode_message(message)
    }
}

pub(crate) fn read_u16(buf: &[u8], pos: usize) -> Option<u16> {
    buf.get(pos..pos + 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn read_u32(buf: &[u8], pos: usize) -> Option<u32> {
    buf.get(pos..pos + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
