#![allow(dead_code)]
use relay_dns_domain::{Answer, Flags, Header, Message, Name, Question};

pub const TYPE_A: u16 = 1;
pub const TYPE_AAAA: u16 = 28;
pub const CLASS_IN: u16 = 1;

/// Assembles raw datagrams byte by byte, including compression pointers the
/// codec itself never writes.
pub struct PacketBuilder {
    buf: Vec<u8>,
}

impl PacketBuilder {
    pub fn new(id: u16, flags: u16) -> Self {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&flags.to_be_bytes());
        buf.extend_from_slice(&[0; 8]);
        Self { buf }
    }

    pub fn counts(mut self, qd: u16, an: u16, ns: u16, ar: u16) -> Self {
        self.buf[4..6].copy_from_slice(&qd.to_be_bytes());
        self.buf[6..8].copy_from_slice(&an.to_be_bytes());
        self.buf[8..10].copy_from_slice(&ns.to_be_bytes());
        self.buf[10..12].copy_from_slice(&ar.to_be_bytes());
        self
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn name(mut self, dotted: &str) -> Self {
        self.buf
            .extend_from_slice(Name::from_dotted(dotted).unwrap().as_bytes());
        self
    }

    /// Labels followed by a pointer instead of the root label.
    pub fn name_with_pointer(mut self, prefix: &[&str], target: u16) -> Self {
        for label in prefix {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self.pointer(target)
    }

    pub fn pointer(mut self, target: u16) -> Self {
        self.buf.extend_from_slice(&(0xC000 | target).to_be_bytes());
        self
    }

    pub fn type_class(mut self, rtype: u16, class: u16) -> Self {
        self.buf.extend_from_slice(&rtype.to_be_bytes());
        self.buf.extend_from_slice(&class.to_be_bytes());
        self
    }

    pub fn ttl_rdata(mut self, ttl: u32, rdata: &[u8]) -> Self {
        self.buf.extend_from_slice(&ttl.to_be_bytes());
        self.buf
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(rdata);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

pub fn question(name: &str, qtype: u16) -> Question {
    Question::new(Name::from_dotted(name).unwrap(), qtype, CLASS_IN)
}

pub fn a_answer(name: &str, ttl: u32, ip: [u8; 4]) -> Answer {
    Answer::new(
        Name::from_dotted(name).unwrap(),
        TYPE_A,
        CLASS_IN,
        ttl,
        ip.to_vec(),
    )
}

/// A standard query (RD set) for each name, type A.
pub fn query(id: u16, names: &[&str]) -> Message {
    let questions: Vec<Question> = names.iter().map(|n| question(n, TYPE_A)).collect();
    Message {
        header: Header {
            id,
            flags: Flags::default().with_rd(true),
            qd_count: questions.len() as u16,
            ..Header::default()
        },
        questions,
        answers: Vec::new(),
    }
}
