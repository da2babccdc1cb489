use crate::dns_record::{RecordType, ResourceRecord};

/// The 16-bit header flag field, unpacked.
///
/// Layout, most significant bit first:
/// `QR | OPCODE(4) | AA | TC | RD | RA | Z(3) | RCODE(4)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
}

impl Flags {
    /// Flags of a standard recursion-desired query.
    pub fn query() -> Self {
        Self {
            rd: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dotted name with trailing dot, or `"."` for the root.
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, record_type: RecordType, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype: record_type.to_u16(),
            qclass,
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.qtype)
    }

    /// Lookup key: trailing dot stripped, ASCII-lowercased.
    pub fn normalized_domain(&self) -> String {
        normalize_domain(&self.name)
    }
}

pub fn normalize_domain(domain: &str) -> String {
    crate::wire::trim_root(domain).to_ascii_lowercase()
}

/// A decoded (or to-be-encoded) DNS message. Built fresh for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsMessage {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl DnsMessage {
    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn flags(&self) -> Flags {
        self.header.flags
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Recomputes the header counts from the section lengths.
    pub fn sync_counts(&mut self) {
        self.header.qdcount = self.questions.len() as u16;
        self.header.ancount = self.answers.len() as u16;
        self.header.nscount = self.authority.len() as u16;
        self.header.arcount = self.additional.len() as u16;
    }

    /// The requester's EDNS0 UDP payload size, if it sent an OPT record.
    pub fn edns_payload_size(&self) -> Option<u16> {
        self.additional.iter().find_map(|rr| match &rr.data {
            crate::RecordData::Opt(opt) => Some(opt.udp_payload_size),
            _ => None,
        })
    }
}
