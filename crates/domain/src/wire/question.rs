use super::name::{decode_name, Name};
use super::record_type::describe_type;
use crate::DomainError;
use bytes::BufMut;
use std::fmt;

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: Name,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: Name, qtype: u16, qclass: u16) -> Self {
        Self {
            name,
            qtype,
            qclass,
        }
    }

    /// Decodes the question at `offset`, returning it with the offset of the
    /// first byte after it.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, consumed) = decode_name(buf, offset)?;
        let pos = offset + consumed;
        let fixed = buf
            .get(pos..pos + 4)
            .ok_or(DomainError::TruncatedQuestion(pos))?;

        let question = Self {
            name,
            qtype: u16::from_be_bytes([fixed[0], fixed[1]]),
            qclass: u16::from_be_bytes([fixed[2], fixed[3]]),
        };
        Ok((question, pos + 4))
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        self.name.encode(buf);
        buf.put_u16(self.qtype);
        buf.put_u16(self.qclass);
    }

    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 4
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, describe_type(self.qtype))?;
        if self.qclass != CLASS_IN {
            write!(f, " CLASS{}", self.qclass)?;
        }
        Ok(())
    }
}
