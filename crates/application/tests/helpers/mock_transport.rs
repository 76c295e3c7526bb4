#![allow(dead_code)]

use async_trait::async_trait;
use relay_dns_application::ports::UpstreamTransport;
use relay_dns_domain::{
    Answer, DomainError, Flags, Header, Message, Name, Question, Sections,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

enum Scripted {
    Reply(Vec<u8>),
    Fail(DomainError),
}

/// Upstream stand-in keyed by the first question's name.
///
/// Names with no script get an echo reply: the query itself with QR set and
/// no answers. Every query received is recorded in order.
#[derive(Clone)]
pub struct MockUpstreamTransport {
    scripts: Arc<Mutex<HashMap<String, Scripted>>>,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockUpstreamTransport {
    pub fn new() -> Self {
        Self {
            scripts: Arc::new(Mutex::new(HashMap::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_reply(&self, name: &str, reply: Vec<u8>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(name.to_string(), Scripted::Reply(reply));
    }

    pub fn set_failure(&self, name: &str, error: DomainError) {
        self.scripts
            .lock()
            .unwrap()
            .insert(name.to_string(), Scripted::Fail(error));
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    pub fn received_messages(&self) -> Vec<Message> {
        self.received()
            .iter()
            .map(|q| Message::decode(q, Sections::Questions).unwrap())
            .collect()
    }
}

#[async_trait]
impl UpstreamTransport for MockUpstreamTransport {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.received.lock().unwrap().push(query.to_vec());

        let message = Message::decode(query, Sections::Questions)
            .map_err(|e| DomainError::UpstreamDecodeFailure(e.to_string()))?;
        let key = message
            .questions
            .first()
            .map(|q| q.name.to_string())
            .unwrap_or_default();

        match self.scripts.lock().unwrap().get(&key) {
            Some(Scripted::Reply(bytes)) => Ok(bytes.clone()),
            Some(Scripted::Fail(e)) => Err(e.clone()),
            None => Ok(Message::rejection_response(&message)
                .encode()),
        }
    }

    fn server(&self) -> String {
        "mock-upstream:53".to_string()
    }
}

pub fn question(name: &str) -> Question {
    Question::new(Name::from_dotted(name).unwrap(), TYPE_A, CLASS_IN)
}

pub fn a_answer(name: &str, ttl: u32, ip: [u8; 4]) -> Answer {
    Answer::new(Name::from_dotted(name).unwrap(), TYPE_A, CLASS_IN, ttl, ip.to_vec())
}

/// A query for each name, type A, with the given raw flags.
pub fn query_with_flags(id: u16, flags: u16, names: &[&str]) -> Message {
    let questions: Vec<Question> = names.iter().map(|n| question(n)).collect();
    Message {
        header: Header {
            id,
            flags: Flags::from_bits(flags),
            qd_count: questions.len() as u16,
            ..Header::default()
        },
        questions,
        answers: Vec::new(),
    }
}

/// Standard query with RD set.
pub fn query(id: u16, names: &[&str]) -> Message {
    query_with_flags(id, 0x0100, names)
}

/// Upstream-style reply to a single-question query carrying `answers`.
pub fn upstream_reply(id: u16, name: &str, answers: Vec<Answer>) -> Vec<u8> {
    Message {
        header: Header {
            id,
            flags: Flags::from_bits(0x8180),
            ..Header::default()
        },
        questions: vec![question(name)],
        answers,
    }
    .with_section_counts()
    .encode()
}
