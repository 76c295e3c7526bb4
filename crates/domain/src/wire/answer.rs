use super::name::{decode_name, Name};
use super::question::Question;
use crate::DomainError;
use bytes::BufMut;

/// TYPE(2) + CLASS(2) + TTL(4) + RDLENGTH(2)
const FIXED_LEN: usize = 10;

/// A resource record from the answer section.
///
/// RDLENGTH is not stored separately; it is always `rdata.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Answer {
    pub name: Name,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl Answer {
    pub fn new(name: Name, rtype: u16, class: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        Self {
            name,
            rtype,
            class,
            ttl,
            rdata,
        }
    }

    /// An answer for `question` carrying its name, type and class.
    pub fn for_question(question: &Question, ttl: u32, rdata: Vec<u8>) -> Self {
        Self::new(
            question.name.clone(),
            question.qtype,
            question.qclass,
            ttl,
            rdata,
        )
    }

    pub fn rd_length(&self) -> u16 {
        self.rdata.len() as u16
    }

    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, consumed) = decode_name(buf, offset)?;
        let mut pos = offset + consumed;

        let fixed = buf
            .get(pos..pos + FIXED_LEN)
            .ok_or_else(|| DomainError::TruncatedAnswer {
                offset: pos,
                reason: "TYPE/CLASS/TTL/RDLENGTH missing".to_string(),
            })?;
        let rtype = u16::from_be_bytes([fixed[0], fixed[1]]);
        let class = u16::from_be_bytes([fixed[2], fixed[3]]);
        let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        let rd_length = u16::from_be_bytes([fixed[8], fixed[9]]) as usize;
        pos += FIXED_LEN;

        let rdata = buf
            .get(pos..pos + rd_length)
            .ok_or_else(|| DomainError::TruncatedAnswer {
                offset: pos,
                reason: format!(
                    "RDATA needs {} bytes, {} available",
                    rd_length,
                    buf.len().saturating_sub(pos)
                ),
            })?
            .to_vec();
        pos += rd_length;

        Ok((
            Self {
                name,
                rtype,
                class,
                ttl,
                rdata,
            },
            pos,
        ))
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        self.name.encode(buf);
        buf.put_u16(self.rtype);
        buf.put_u16(self.class);
        buf.put_u32(self.ttl);
        buf.put_u16(self.rd_length());
        buf.put_slice(&self.rdata);
    }

    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + FIXED_LEN + self.rdata.len()
    }
}
