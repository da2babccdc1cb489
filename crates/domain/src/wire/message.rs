use super::flags::{decode_flags, encode_flags};
use super::name::{decode_name, write_name};
use super::rdata::{decode_rdata, encode_rdata};
use super::{read_u16, read_u32};
use crate::{DnsMessage, DomainError, Header, Question, RecordData, RecordType, ResourceRecord};
use tracing::debug;

pub const HEADER_LEN: usize = 12;
/// TYPE, CLASS, TTL and RDLENGTH.
const RR_FIXED_LEN: usize = 10;

fn malformed(msg: String) -> DomainError {
    DomainError::MalformedPacket(msg)
}

/// Decodes a complete message. Sections are read in wire order with a single
/// cursor starting right after the header.
pub fn decode_message(buf: &[u8]) -> Result<DnsMessage, DomainError> {
    let header = decode_header(buf)?;
    let mut pos = HEADER_LEN;

    let mut questions = Vec::new();
    for index in 0..header.qdcount {
        let (name, next) = decode_name(buf, pos)?;
        let (qtype, qclass) = read_u16(buf, next)
            .zip(read_u16(buf, next + 2))
            .ok_or_else(|| {
                malformed(format!(
                    "question {} of {} truncated at offset {}",
                    index + 1,
                    header.qdcount,
                    next
                ))
            })?;
        questions.push(Question {
            name,
            qtype,
            qclass,
        });
        pos = next + 4;
    }

    let answers = decode_records(buf, &mut pos, header.ancount, "answer")?;
    let authority = decode_records(buf, &mut pos, header.nscount, "authority")?;
    let additional = decode_records(buf, &mut pos, header.arcount, "additional")?;

    Ok(DnsMessage {
        header,
        questions,
        answers,
        authority,
        additional,
    })
}

/// Reads just the 12-byte header.
pub fn decode_header(buf: &[u8]) -> Result<Header, DomainError> {
    if buf.len() < HEADER_LEN {
        return Err(malformed(format!(
            "{} bytes is shorter than the {}-byte header",
            buf.len(),
            HEADER_LEN
        )));
    }
    let field = |i: usize| read_u16(buf, i * 2).unwrap_or_default();

    Ok(Header {
        id: field(0),
        flags: decode_flags(field(1)),
        qdcount: field(2),
        ancount: field(3),
        nscount: field(4),
        arcount: field(5),
    })
}

fn decode_records(
    buf: &[u8],
    pos: &mut usize,
    count: u16,
    section: &str,
) -> Result<Vec<ResourceRecord>, DomainError> {
    let mut records = Vec::new();

    for index in 0..count {
        let (name, next) = decode_name(buf, *pos)?;
        let fixed = buf.get(next..next + RR_FIXED_LEN).ok_or_else(|| {
            malformed(format!(
                "{} record {} of {} truncated at offset {}",
                section,
                index + 1,
                count,
                next
            ))
        })?;

        let rtype = read_u16(fixed, 0).unwrap_or_default();
        let class = read_u16(fixed, 2).unwrap_or_default();
        let ttl = read_u32(fixed, 4).unwrap_or_default();
        let rdlength = read_u16(fixed, 8).unwrap_or_default() as usize;

        let start = next + RR_FIXED_LEN;
        let end = start + rdlength;
        if end > buf.len() {
            return Err(malformed(format!(
                "{} record '{}' declares {} bytes of RDATA but only {} remain",
                section,
                name,
                rdlength,
                buf.len().saturating_sub(start)
            )));
        }

        let data = match decode_rdata(rtype, class, ttl, buf, start..end) {
            Ok(data) => data,
            Err(DomainError::UnsupportedType(type_name)) => {
                debug!(name = %name, record_type = %type_name, section, "Passing through record of unsupported type");
                RecordData::Unknown(buf[start..end].to_vec())
            }
            Err(e) => return Err(e),
        };

        records.push(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            data,
        });
        *pos = end;
    }

    Ok(records)
}

/// Encodes `message`. Header counts are taken from the section lengths, never
/// from `message.header`.
pub fn encode_message(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
    let counts = [
        message.questions.len(),
        message.answers.len(),
        message.authority.len(),
        message.additional.len(),
    ];
    let mut out = Vec::with_capacity(512);
    out.extend_from_slice(&message.header.id.to_be_bytes());
    out.extend_from_slice(&encode_flags(&message.header.flags).to_be_bytes());
    for count in counts {
        let count = u16::try_from(count)
            .map_err(|_| malformed(format!("section of {} entries does not fit", count)))?;
        out.extend_from_slice(&count.to_be_bytes());
    }

    for question in &message.questions {
        write_name(&question.name, &mut out)?;
        out.extend_from_slice(&question.qtype.to_be_bytes());
        out.extend_from_slice(&question.qclass.to_be_bytes());
    }

    for record in message
        .answers
        .iter()
        .chain(&message.authority)
        .chain(&message.additional)
    {
        write_record(record, &mut out)?;
    }

    Ok(out)
}

fn write_record(record: &ResourceRecord, out: &mut Vec<u8>) -> Result<(), DomainError> {
    write_name(&record.name, out)?;

    let (class, ttl) = match &record.data {
        RecordData::Opt(opt) => (opt.udp_payload_size, opt.packed_ttl()),
        _ => (record.class, record.ttl),
    };
    out.extend_from_slice(&record.rtype.to_be_bytes());
    out.extend_from_slice(&class.to_be_bytes());
    out.extend_from_slice(&ttl.to_be_bytes());

    let length_at = out.len();
    out.extend_from_slice(&[0, 0]);
    encode_rdata(&record.data, out)?;

    let rdlength = out.len() - length_at - 2;
    let rdlength = u16::try_from(rdlength).map_err(|_| {
        malformed(format!(
            "{} RDATA for '{}' is {} bytes",
            RecordType::describe(record.rtype),
            record.name,
            rdlength
        ))
    })?;
    out[length_at..length_at + 2].copy_from_slice(&rdlength.to_be_bytes());
    Ok(())
}
