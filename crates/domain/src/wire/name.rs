//! Domain names in wire form (RFC 1035 §3.1, §4.1.4).
//!
//! A [`Name`] always holds the expanded label sequence: length-prefixed labels
//! followed by a single zero byte. Compression pointers are resolved while
//! decoding and never written back out.

use crate::DomainError;
use bytes::BufMut;
use std::fmt;

/// Upper bound on labels plus pointer jumps walked for a single name.
pub const MAX_NAME_STEPS: usize = 1000;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_TAG: u8 = 0xC0;
const POINTER_OFFSET_MASK: u16 = 0x3FFF;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(Vec<u8>);

impl Name {
    pub fn root() -> Self {
        Self(vec![0])
    }

    /// Builds a name from presentation text such as `"www.example.com"`.
    ///
    /// A trailing dot is accepted. Labels must be 1 to 63 bytes and the
    /// encoded name at most 255 bytes.
    pub fn from_dotted(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.strip_suffix('.').unwrap_or(text);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut wire = Vec::with_capacity(trimmed.len() + 2);
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "empty label in '{}'",
                    text
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' exceeds {} bytes",
                    label, MAX_LABEL_LEN
                )));
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
        wire.push(0);

        if wire.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' exceeds {} bytes in wire form",
                text, MAX_NAME_LEN
            )));
        }
        Ok(Self(wire))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn wire_len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0 == [0]
    }

    pub fn labels(&self) -> Labels<'_> {
        Labels {
            wire: &self.0,
            pos: 0,
        }
    }

    /// Writes the stored bytes unchanged.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.0);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for &b in label {
                match b {
                    b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x21..=0x7E => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
        }
        Ok(())
    }
}

pub struct Labels<'a> {
    wire: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let len = *self.wire.get(self.pos)? as usize;
        if len == 0 {
            return None;
        }
        let start = self.pos + 1;
        let label = self.wire.get(start..start + len)?;
        self.pos = start + len;
        Some(label)
    }
}

/// Decodes the name starting at `offset`.
///
/// Returns the expanded name and the number of bytes the name occupies at
/// `offset` itself. Once a pointer has been followed nothing read at the
/// target counts, so a name that starts with a pointer always reports 2.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(Name, usize), DomainError> {
    let mut wire = Vec::with_capacity(32);
    let mut cursor = offset;
    let mut consumed = 0usize;
    let mut jumped = false;

    for _ in 0..MAX_NAME_STEPS {
        let len_byte = *buf
            .get(cursor)
            .ok_or_else(|| DomainError::malformed_name(cursor, "name runs past end of message"))?;

        if len_byte & POINTER_TAG == POINTER_TAG {
            let low = *buf
                .get(cursor + 1)
                .ok_or_else(|| DomainError::malformed_name(cursor, "incomplete pointer"))?;
            let target = (u16::from_be_bytes([len_byte, low]) & POINTER_OFFSET_MASK) as usize;
            if target >= buf.len() {
                return Err(DomainError::malformed_name(
                    cursor,
                    format!("pointer target {} out of bounds", target),
                ));
            }
            if !jumped {
                consumed += 2;
                jumped = true;
            }
            cursor = target;
            continue;
        }

        if len_byte == 0 {
            wire.push(0);
            if !jumped {
                consumed += 1;
            }
            return Ok((Name(wire), consumed));
        }

        let end = cursor + 1 + len_byte as usize;
        if end > buf.len() {
            return Err(DomainError::malformed_name(
                cursor,
                format!("label length {} runs past end of message", len_byte),
            ));
        }
        wire.extend_from_slice(&buf[cursor..end]);
        if !jumped {
            consumed += end - cursor;
        }
        cursor = end;
    }

    Err(DomainError::malformed_name(
        offset,
        format!("exceeded {} labels or pointer jumps", MAX_NAME_STEPS),
    ))
}
