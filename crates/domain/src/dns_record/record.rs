use super::RecordType;

/// Class IN, the only class the zone store serves.
pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum_ttl: u32,
}

/// EDNS0 pseudo-record contents (RFC 6891 §6.1.3).
///
/// The OPT record reuses CLASS as the requester's UDP payload size and splits
/// TTL into extended RCODE, version and flags. Options are kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptData {
    pub udp_payload_size: u16,
    pub ext_rcode: u8,
    pub version: u8,
    pub flags: u16,
    pub options: Vec<u8>,
}

impl OptData {
    pub fn from_class_ttl(class: u16, ttl: u32, options: Vec<u8>) -> Self {
        Self {
            udp_payload_size: class,
            ext_rcode: (ttl >> 24) as u8,
            version: (ttl >> 16) as u8,
            flags: ttl as u16,
            options,
        }
    }

    pub fn packed_ttl(&self) -> u32 {
        ((self.ext_rcode as u32) << 24) | ((self.version as u32) << 16) | self.flags as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// Dotted-decimal address. Kept textual: zone files may carry garbage,
    /// which encodes as `0.0.0.0`.
    A(String),
    Aaaa(String),
    Ns(String),
    Cname(String),
    Ptr(String),
    Soa(SoaData),
    Mx { priority: u16, exchange: String },
    Txt(String),
    Opt(OptData),
    /// AXFR and ANY carry no payload.
    Empty,
    /// RDATA of a type outside the registry, passed through verbatim.
    Unknown(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        class: u16,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        Self {
            name: name.into(),
            rtype: record_type.to_u16(),
            class,
            ttl,
            data,
        }
    }

    /// Builds an OPT pseudo-record; CLASS and TTL are derived from `opt`.
    pub fn opt(opt: OptData) -> Self {
        Self {
            name: ".".to_string(),
            rtype: RecordType::OPT.to_u16(),
            class: opt.udp_payload_size,
            ttl: opt.packed_ttl(),
            data: RecordData::Opt(opt),
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.rtype)
    }
}
