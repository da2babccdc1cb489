use super::name::{decode_name, fqdn, write_name};
use super::{read_u16, read_u32};
use crate::{DomainError, OptData, RecordData, RecordType, SoaData};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::Range;
use tracing::warn;

const MAX_TXT_LEN: usize = 255;

fn truncated(what: &str, rdata: &Range<usize>) -> DomainError {
    DomainError::MalformedPacket(format!(
        "{} RDATA at {}..{} is truncated",
        what, rdata.start, rdata.end
    ))
}

/// Decodes the RDATA occupying `rdata` within `message`.
///
/// Names inside RDATA are read with a cursor local to the RDATA; compression
/// pointers still resolve against the whole message. `class` and `ttl` are
/// only consulted for OPT, whose header fields carry EDNS0 data.
///
/// Types outside the registry yield [`DomainError::UnsupportedType`]; the raw
/// bytes are `message[rdata]`.
pub fn decode_rdata(
    rtype: u16,
    class: u16,
    ttl: u32,
    message: &[u8],
    rdata: Range<usize>,
) -> Result<RecordData, DomainError> {
    let bytes = message
        .get(rdata.clone())
        .ok_or_else(|| truncated(&RecordType::describe(rtype), &rdata))?;

    let record_type = RecordType::from_u16(rtype)
        .ok_or_else(|| DomainError::UnsupportedType(RecordType::describe(rtype)))?;

    let read_name = |at: usize| -> Result<(String, usize), DomainError> {
        let (name, next) = decode_name(message, at)?;
        if next > rdata.end {
            return Err(truncated(record_type.as_str(), &rdata));
        }
        Ok((name, next))
    };

    let data = match record_type {
        RecordType::A => {
            let octets: [u8; 4] = bytes
                .try_into()
                .map_err(|_| truncated("A", &rdata))?;
            RecordData::A(Ipv4Addr::from(octets).to_string())
        }
        RecordType::AAAA => {
            let octets: [u8; 16] = bytes
                .try_into()
                .map_err(|_| truncated("AAAA", &rdata))?;
            RecordData::Aaaa(Ipv6Addr::from(octets).to_string())
        }
        RecordType::NS => RecordData::Ns(read_name(rdata.start)?.0),
        RecordType::CNAME => RecordData::Cname(read_name(rdata.start)?.0),
        RecordType::PTR => RecordData::Ptr(read_name(rdata.start)?.0),
        RecordType::SOA => {
            let (mname, next) = read_name(rdata.start)?;
            let (rname, next) = read_name(next)?;
            if next + 20 > rdata.end {
                return Err(truncated("SOA", &rdata));
            }
            let field = |i: usize| read_u32(message, next + 4 * i).unwrap_or_default();
            RecordData::Soa(SoaData {
                mname,
                rname,
                serial: field(0),
                refresh: field(1),
                retry: field(2),
                expire: field(3),
                minimum_ttl: field(4),
            })
        }
        RecordType::MX => {
            let priority = read_u16(bytes, 0).ok_or_else(|| truncated("MX", &rdata))?;
            let (exchange, _) = read_name(rdata.start + 2)?;
            RecordData::Mx { priority, exchange }
        }
        RecordType::TXT => {
            let (&len, rest) = bytes
                .split_first()
                .ok_or_else(|| truncated("TXT", &rdata))?;
            let text = rest
                .get(..len as usize)
                .ok_or_else(|| truncated("TXT", &rdata))?;
            RecordData::Txt(String::from_utf8_lossy(text).into_owned())
        }
        RecordType::OPT => RecordData::Opt(OptData::from_class_ttl(class, ttl, bytes.to_vec())),
        RecordType::AXFR | RecordType::ANY => RecordData::Empty,
    };

    Ok(data)
}

/// Appends the RDATA encoding of `data` to `out`.
///
/// Names are written fully qualified and uncompressed. An address that does
/// not parse is written as the all-zero address of the right family.
pub fn encode_rdata(data: &RecordData, out: &mut Vec<u8>) -> Result<(), DomainError> {
    match data {
        RecordData::A(addr) => {
            let ip = addr.parse::<Ipv4Addr>().unwrap_or_else(|_| {
                warn!(address = %addr, "Unparsable A address, encoding 0.0.0.0");
                Ipv4Addr::UNSPECIFIED
            });
            out.extend_from_slice(&ip.octets());
        }
        RecordData::Aaaa(addr) => {
            let ip = addr.parse::<Ipv6Addr>().unwrap_or_else(|_| {
                warn!(address = %addr, "Unparsable AAAA address, encoding ::");
                Ipv6Addr::UNSPECIFIED
            });
            out.extend_from_slice(&ip.octets());
        }
        RecordData::Ns(name) | RecordData::Cname(name) | RecordData::Ptr(name) => {
            write_name(&fqdn(name), out)?;
        }
        RecordData::Soa(soa) => {
            write_name(&fqdn(&soa.mname), out)?;
            write_name(&fqdn(&soa.rname), out)?;
            for value in [soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum_ttl] {
                out.extend_from_slice(&value.to_be_bytes());
            }
        }
        RecordData::Mx { priority, exchange } => {
            out.extend_from_slice(&priority.to_be_bytes());
            write_name(&fqdn(exchange), out)?;
        }
        RecordData::Txt(text) => {
            let bytes = text.as_bytes();
            let bytes = &bytes[..bytes.len().min(MAX_TXT_LEN)];
            out.push(bytes.len() as u8);
            out.extend_from_slice(bytes);
        }
        RecordData::Opt(opt) => out.extend_from_slice(&opt.options),
        RecordData::Empty => {}
        RecordData::Unknown(raw) => out.extend_from_slice(raw),
    }
    Ok(())
}
