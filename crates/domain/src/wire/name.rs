use crate::DomainError;
use smallvec::SmallVec;
use std::fmt::Write;

pub const MAX_LABEL_LEN: usize = 63;
/// Upper bound on a name's wire length, terminator included (RFC 1035 §2.3.4).
pub const MAX_NAME_LEN: usize = 255;

const LABEL_KIND_MASK: u8 = 0xC0;
const POINTER: u8 = 0xC0;
const LITERAL: u8 = 0x00;

fn malformed(msg: String) -> DomainError {
    DomainError::MalformedName(msg)
}

/// Decodes the name starting at `offset`, following compression pointers.
///
/// Returns the dotted name (trailing dot, `"."` for the root) in presentation
/// format: `.` and `\\` inside a label are backslash-escaped and bytes outside
/// printable ASCII are written as `\DDD` (RFC 4343). Also returns the offset
/// just past the name as it appears at `offset`: after the terminating zero
/// byte, or two bytes past the first pointer if one was followed.
///
/// Out-of-bounds reads, reserved label kinds, names longer than
/// [`MAX_NAME_LEN`] and pointer chains that revisit an offset are rejected.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut wire_len = 0usize;
    let mut resume_at: Option<usize> = None;
    let mut visited: SmallVec<[usize; 8]> = SmallVec::new();
    visited.push(offset);

    loop {
        let len_byte = *buf.get(pos).ok_or_else(|| {
            malformed(format!(
                "label at offset {} is past the end of a {}-byte buffer",
                pos,
                buf.len()
            ))
        })?;

        match len_byte & LABEL_KIND_MASK {
            LITERAL => {
                let len = len_byte as usize;
                if len == 0 {
                    pos += 1;
                    break;
                }
                if len > MAX_LABEL_LEN {
                    return Err(malformed(format!("label of {} bytes at offset {}", len, pos)));
                }
                wire_len += len + 1;
                if wire_len + 1 > MAX_NAME_LEN {
                    return Err(malformed(format!(
                        "name exceeds {} bytes starting at offset {}",
                        MAX_NAME_LEN, offset
                    )));
                }
                let label = buf.get(pos + 1..pos + 1 + len).ok_or_else(|| {
                    malformed(format!(
                        "label of {} bytes at offset {} runs past the end of the buffer",
                        len, pos
                    ))
                })?;
                push_escaped_label(&mut name, label);
                name.push('.');
                pos += len + 1;
            }
            POINTER => {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    malformed(format!("truncated compression pointer at offset {}", pos))
                })?;
                let target = (((len_byte & !LABEL_KIND_MASK) as usize) << 8) | low as usize;
                if visited.contains(&target) {
                    return Err(malformed(format!(
                        "compression pointer at offset {} loops back to offset {}",
                        pos, target
                    )));
                }
                visited.push(target);
                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }
                pos = target;
            }
            kind => {
                return Err(malformed(format!(
                    "reserved label type {:#04x} at offset {}",
                    kind, pos
                )));
            }
        }
    }

    if name.is_empty() {
        name.push('.');
    }

    Ok((name, resume_at.unwrap_or(pos)))
}

/// Encodes `name` as uncompressed labels ending in a zero byte.
///
/// A trailing dot is optional; `"."` and `""` both encode as the root.
pub fn encode_name(name: &str) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(name.len() + 2);
    write_name(name, &mut out)?;
    Ok(out)
}

/// Appends the encoding of `name` to `out`. On error `out` is left unchanged.
///
/// `name` is in presentation format: an unescaped `.` separates labels, and
/// `\X` or `\DDD` put a literal byte into the current label. Empty labels are
/// skipped.
pub fn write_name(name: &str, out: &mut Vec<u8>) -> Result<(), DomainError> {
    let start = out.len();
    let result = write_labels(name, out);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

fn write_labels(name: &str, out: &mut Vec<u8>) -> Result<(), DomainError> {
    let start = out.len();
    let mut label: Vec<u8> = Vec::with_capacity(MAX_LABEL_LEN);
    let mut bytes = name.bytes();

    loop {
        let next = bytes.next();
        match next {
            Some(b'.') | None => {
                if label.len() > MAX_LABEL_LEN {
                    return Err(malformed(format!(
                        "label of {} bytes in '{}' is longer than {} bytes",
                        label.len(),
                        name,
                        MAX_LABEL_LEN
                    )));
                }
                if !label.is_empty() {
                    out.push(label.len() as u8);
                    out.extend_from_slice(&label);
                    label.clear();
                }
                if next.is_none() {
                    break;
                }
            }
            Some(b'\\') => label.push(unescape(name, &mut bytes)?),
            Some(byte) => label.push(byte),
        }
    }
    out.push(0);

    if out.len() - start > MAX_NAME_LEN {
        return Err(malformed(format!(
            "name '{}' is longer than {} bytes",
            name, MAX_NAME_LEN
        )));
    }

    Ok(())
}

/// Reads the escape following a backslash: `\DDD` or a single literal byte.
fn unescape(name: &str, bytes: &mut std::str::Bytes<'_>) -> Result<u8, DomainError> {
    let first = bytes
        .next()
        .ok_or_else(|| malformed(format!("dangling escape at the end of '{}'", name)))?;
    if !first.is_ascii_digit() {
        return Ok(first);
    }

    let mut value = u32::from(first - b'0');
    for _ in 0..2 {
        match bytes.next() {
            Some(digit) if digit.is_ascii_digit() => {
                value = value * 10 + u32::from(digit - b'0');
            }
            _ => {
                return Err(malformed(format!(
                    "escape in '{}' needs exactly three digits",
                    name
                )))
            }
        }
    }
    u8::try_from(value)
        .map_err(|_| malformed(format!("escape \\{} in '{}' is above 255", value, name)))
}

fn push_escaped_label(name: &mut String, label: &[u8]) {
    for &byte in label {
        match byte {
            b'.' | b'\\' => {
                name.push('\\');
                name.push(byte as char);
            }
            0x21..=0x7E => name.push(byte as char),
            _ => {
                let _ = write!(name, "\\{:03}", byte);
            }
        }
    }
}

/// `name` without its root dots. A dot preceded by an unescaped backslash
/// belongs to the last label and is kept.
pub fn trim_root(name: &str) -> &str {
    let mut trimmed = name;
    while let Some(rest) = trimmed.strip_suffix('.') {
        let backslashes = rest.bytes().rev().take_while(|&b| b == b'\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        trimmed = rest;
    }
    trimmed
}

/// `name` with exactly one trailing root dot.
pub fn fqdn(name: &str) -> String {
    format!("{}.", trim_root(name))
}
