#![allow(dead_code)]
use stackdns_domain::{
    DnsMessage, Flags, Header, OptData, Question, RecordData, RecordType, ResourceRecord, SoaData,
    CLASS_IN,
};

/// Hand-assembles query packets byte by byte, independent of the encoder.
pub struct RawQueryBuilder {
    id: u16,
    flags: u16,
    qdcount: Option<u16>,
    questions: Vec<(Vec<u8>, u16)>,
    tail: Vec<u8>,
    arcount: u16,
}

impl RawQueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            flags: 0x0100,
            qdcount: None,
            questions: Vec::new(),
            tail: Vec::new(),
            arcount: 0,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn question(mut self, domain: &str, qtype: u16) -> Self {
        self.questions.push((labels(domain), qtype));
        self
    }

    /// Overrides the QDCOUNT written to the header.
    pub fn declared_qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = Some(qdcount);
        self
    }

    pub fn opt_record(mut self, udp_size: u16) -> Self {
        self.tail.push(0x00);
        self.tail.extend_from_slice(&41u16.to_be_bytes());
        self.tail.extend_from_slice(&udp_size.to_be_bytes());
        self.tail.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        self.tail.extend_from_slice(&[0x00, 0x00]);
        self.arcount += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let qdcount = self.qdcount.unwrap_or(self.questions.len() as u16);
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&qdcount.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(&self.arcount.to_be_bytes());
        for (name, qtype) in self.questions {
            buf.extend_from_slice(&name);
            buf.extend_from_slice(&qtype.to_be_bytes());
            buf.extend_from_slice(&[0x00, 0x01]);
        }
        buf.extend_from_slice(&self.tail);
        buf
    }
}

pub fn labels(domain: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0x00);
    buf
}

pub fn record(name: &str, record_type: RecordType, ttl: u32, data: RecordData) -> ResourceRecord {
    ResourceRecord::new(name, record_type, CLASS_IN, ttl, data)
}

/// A response carrying one record of every type the codec understands.
pub fn message_with_every_type() -> DnsMessage {
    let mut message = DnsMessage {
        header: Header {
            id: 0xBEEF,
            flags: Flags {
                qr: true,
                rd: true,
                aa: true,
                ..Flags::default()
            },
            ..Header::default()
        },
        questions: vec![Question::new("example.com.", RecordType::ANY, CLASS_IN)],
        answers: vec![
            record("example.com.", RecordType::A, 300, RecordData::A("1.2.3.4".into())),
            record(
                "example.com.",
                RecordType::AAAA,
                300,
                RecordData::Aaaa("2001:db8::1".into()),
            ),
            record(
                "www.example.com.",
                RecordType::CNAME,
                60,
                RecordData::Cname("example.com.".into()),
            ),
            record(
                "example.com.",
                RecordType::MX,
                3600,
                RecordData::Mx {
                    priority: 20,
                    exchange: "mail.example.com.".into(),
                },
            ),
            record(
                "example.com.",
                RecordType::TXT,
                120,
                RecordData::Txt("v=spf1 -all".into()),
            ),
            record(
                "4.3.2.1.in-addr.arpa.",
                RecordType::PTR,
                86400,
                RecordData::Ptr("example.com.".into()),
            ),
        ],
        authority: vec![
            record(
                "example.com.",
                RecordType::NS,
                172800,
                RecordData::Ns("ns1.example.com.".into()),
            ),
            record(
                "example.com.",
                RecordType::SOA,
                3600,
                RecordData::Soa(SoaData {
                    mname: "ns1.example.com.".into(),
                    rname: "hostmaster.example.com.".into(),
                    serial: 2024010101,
                    refresh: 7200,
                    retry: 900,
                    expire: 1209600,
                    minimum_ttl: 300,
                }),
            ),
        ],
        additional: vec![ResourceRecord::opt(OptData {
            udp_payload_size: 4096,
            ext_rcode: 0,
            version: 0,
            flags: 0x8000,
            options: vec![0xFD, 0xE9, 0x00, 0x02, 0xAB, 0xCD],
        })],
    };
    message.sync_counts();
    message
}
