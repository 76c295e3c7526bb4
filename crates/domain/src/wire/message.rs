use super::answer::Answer;
use super::header::{Header, HEADER_LEN};
use super::question::Question;
use crate::DomainError;
use bytes::BytesMut;

/// TTL carried by synthesized answers.
pub const STANDALONE_TTL: u32 = 60;

/// RDATA carried by synthesized answers (`8.8.8.8`).
pub const STANDALONE_RDATA: [u8; 4] = [8, 8, 8, 8];

/// Which sections [`Message::decode`] should read after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sections {
    /// Client requests: header and questions.
    Questions,
    /// Resolver replies: header, questions and answers.
    QuestionsAndAnswers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl Message {
    pub fn decode(buf: &[u8], sections: Sections) -> Result<Self, DomainError> {
        let header = Header::decode(buf)?;
        let mut offset = HEADER_LEN;

        let mut questions = Vec::with_capacity(header.qd_count as usize);
        for _ in 0..header.qd_count {
            let (question, next) = Question::decode(buf, offset)?;
            questions.push(question);
            offset = next;
        }

        let mut answers = Vec::new();
        if sections == Sections::QuestionsAndAnswers {
            answers.reserve(header.an_count as usize);
            for _ in 0..header.an_count {
                let (answer, next) = Answer::decode(buf, offset)?;
                answers.push(answer);
                offset = next;
            }
        }

        Ok(Self {
            header,
            questions,
            answers,
        })
    }

    /// Header, then questions, then answers, in stored order. Names are
    /// written expanded.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.header.encode(&mut buf);
        for question in &self.questions {
            question.encode(&mut buf);
        }
        for answer in &self.answers {
            answer.encode(&mut buf);
        }
        buf.to_vec()
    }

    pub fn wire_len(&self) -> usize {
        HEADER_LEN
            + self.questions.iter().map(Question::wire_len).sum::<usize>()
            + self.answers.iter().map(Answer::wire_len).sum::<usize>()
    }

    /// Echoes every question with a fixed `8.8.8.8` answer, TTL 60, using
    /// the question's own TYPE and CLASS.
    pub fn standalone_response(request: &Message) -> Self {
        let answers = request
            .questions
            .iter()
            .map(|q| Answer::for_question(q, STANDALONE_TTL, STANDALONE_RDATA.to_vec()))
            .collect();
        Self::response_with(request, answers)
    }

    /// A one-question query carrying the request's ID and flags verbatim.
    pub fn single_question_query(request: &Message, question: &Question) -> Self {
        Self {
            header: Header {
                id: request.header.id,
                flags: request.header.flags,
                qd_count: 1,
                an_count: 0,
                ns_count: 0,
                ar_count: 0,
            },
            questions: vec![question.clone()],
            answers: Vec::new(),
        }
    }

    /// Response to `request` carrying all of its questions and `answers`.
    pub fn merged_response(request: &Message, answers: Vec<Answer>) -> Self {
        Self::response_with(request, answers)
    }

    /// Response with the questions echoed and no answers. Its RCODE follows
    /// [`Header::build_response`].
    pub fn rejection_response(request: &Message) -> Self {
        Self::response_with(request, Vec::new())
    }

    /// Rewrites QDCOUNT/ANCOUNT from the stored sections and zeroes
    /// NSCOUNT/ARCOUNT, whose sections are never retained.
    pub fn with_section_counts(mut self) -> Self {
        self.header.qd_count = self.questions.len() as u16;
        self.header.an_count = self.answers.len() as u16;
        self.header.ns_count = 0;
        self.header.ar_count = 0;
        self
    }

    fn response_with(request: &Message, answers: Vec<Answer>) -> Self {
        Self {
            header: Header::build_response(&request.header),
            questions: request.questions.clone(),
            answers,
        }
        .with_section_counts()
    }
}
