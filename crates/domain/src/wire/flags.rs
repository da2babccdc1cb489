use crate::Flags;

pub fn decode_flags(raw: u16) -> Flags {
    Flags {
        qr: (raw >> 15) & 0x1 == 1,
        opcode: ((raw >> 11) & 0xF) as u8,
        aa: (raw >> 10) & 0x1 == 1,
        tc: (raw >> 9) & 0x1 == 1,
        rd: (raw >> 8) & 0x1 == 1,
        ra: (raw >> 7) & 0x1 == 1,
        z: ((raw >> 4) & 0x7) as u8,
        rcode: (raw & 0xF) as u8,
    }
}

/// Packs `flags` into the header field. Multi-bit fields are masked to
/// their width, so out-of-range values never bleed into neighbours.
pub fn encode_flags(flags: &Flags) -> u16 {
    let mut raw = 0u16;
    raw |= (flags.qr as u16) << 15;
    raw |= (flags.opcode as u16 & 0xF) << 11;
    raw |= (flags.aa as u16) << 10;
    raw |= (flags.tc as u16) << 9;
    raw |= (flags.rd as u16) << 8;
    raw |= (flags.ra as u16) << 7;
    raw |= (flags.z as u16 & 0x7) << 4;
    raw |= flags.rcode as u16 & 0xF;
    raw
}

impl From<u16> for Flags {
    fn from(raw: u16) -> Self {
        decode_flags(raw)
    }
}

impl From<Flags> for u16 {
    fn from(flags: Flags) -> Self {
        encode_flags(&flags)
    }
}
