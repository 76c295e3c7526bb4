//! The fixed 12-byte message header (RFC 1035 §4.1.1).
//!
//! ```text
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::DomainError;
use bytes::BufMut;
use std::fmt;

pub const HEADER_LEN: usize = 12;

const QR_BIT: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F;
const AA_BIT: u16 = 0x0400;
const TC_BIT: u16 = 0x0200;
const RD_BIT: u16 = 0x0100;
const RA_BIT: u16 = 0x0080;
const Z_SHIFT: u16 = 4;
const Z_MASK: u16 = 0x07;
const RCODE_MASK: u16 = 0x0F;

pub const OPCODE_QUERY: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u16);

impl Flags {
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn qr(self) -> bool {
        self.0 & QR_BIT != 0
    }

    pub fn opcode(self) -> u8 {
        ((self.0 >> OPCODE_SHIFT) & OPCODE_MASK) as u8
    }

    pub fn aa(self) -> bool {
        self.0 & AA_BIT != 0
    }

    pub fn tc(self) -> bool {
        self.0 & TC_BIT != 0
    }

    pub fn rd(self) -> bool {
        self.0 & RD_BIT != 0
    }

    pub fn ra(self) -> bool {
        self.0 & RA_BIT != 0
    }

    pub fn z(self) -> u8 {
        ((self.0 >> Z_SHIFT) & Z_MASK) as u8
    }

    pub fn rcode(self) -> u8 {
        (self.0 & RCODE_MASK) as u8
    }

    pub fn response_code(self) -> ResponseCode {
        ResponseCode::from_u8(self.rcode())
    }

    pub fn with_qr(self, on: bool) -> Self {
        self.with_bit(QR_BIT, on)
    }

    pub fn with_opcode(self, opcode: u8) -> Self {
        let cleared = self.0 & !(OPCODE_MASK << OPCODE_SHIFT);
        Self(cleared | ((opcode as u16 & OPCODE_MASK) << OPCODE_SHIFT))
    }

    pub fn with_aa(self, on: bool) -> Self {
        self.with_bit(AA_BIT, on)
    }

    pub fn with_tc(self, on: bool) -> Self {
        self.with_bit(TC_BIT, on)
    }

    pub fn with_rd(self, on: bool) -> Self {
        self.with_bit(RD_BIT, on)
    }

    pub fn with_ra(self, on: bool) -> Self {
        self.with_bit(RA_BIT, on)
    }

    pub fn with_rcode(self, rcode: ResponseCode) -> Self {
        Self((self.0 & !RCODE_MASK) | (rcode.to_u8() as u16 & RCODE_MASK))
    }

    fn with_bit(self, bit: u16, on: bool) -> Self {
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => code & 0x0F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::TruncatedHeader(buf.len()));
        }
        let word = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
        Ok(Self {
            id: word(0),
            flags: Flags(word(2)),
            qd_count: word(4),
            an_count: word(6),
            ns_count: word(8),
            ar_count: word(10),
        })
    }

    /// Derives the header of a reply to `request`.
    ///
    /// QR is set, OPCODE and RD are copied, AA/TC/RA/Z are cleared. Only
    /// standard queries get NOERROR; any other OPCODE gets NOTIMP. All section
    /// counts are left at zero for the caller to fill in.
    pub fn build_response(request: &Header) -> Self {
        let opcode = request.flags.opcode();
        let rcode = if opcode == OPCODE_QUERY {
            ResponseCode::NoError
        } else {
            ResponseCode::NotImp
        };
        let flags = Flags::default()
            .with_qr(true)
            .with_opcode(opcode)
            .with_rd(request.flags.rd())
            .with_rcode(rcode);

        Self {
            id: request.id,
            flags,
            ..Self::default()
        }
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u16(self.id);
        buf.put_u16(self.flags.bits());
        buf.put_u16(self.qd_count);
        buf.put_u16(self.an_count);
        buf.put_u16(self.ns_count);
        buf.put_u16(self.ar_count);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        self.encode(&mut &mut out[..]);
        out
    }
}
