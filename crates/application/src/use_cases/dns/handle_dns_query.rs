use super::ResolutionMode;
use crate::ports::UpstreamTransport;
use relay_dns_domain::{DomainError, Message, Sections};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of handling one client datagram.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub id: u16,
    pub mode: ResolutionMode,
    pub questions: usize,
    /// Forward-multi sub-queries that contributed no answers because they failed.
    pub failed_subqueries: usize,
    pub response: Vec<u8>,
}

pub struct HandleDnsQueryUseCase {
    upstream: Option<Arc<dyn UpstreamTransport>>,
}

impl HandleDnsQueryUseCase {
    /// Standalone mode: every question gets a synthesized answer.
    pub fn new() -> Self {
        Self { upstream: None }
    }

    pub fn with_upstream(mut self, upstream: Arc<dyn UpstreamTransport>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn is_forwarding(&self) -> bool {
        self.upstream.is_some()
    }

    /// Decodes a client datagram and produces the bytes to send back.
    ///
    /// Any decode failure on the request is returned and the caller should
    /// drop the datagram. Upstream failures only surface here in
    /// forward-single mode; forward-multi absorbs them per sub-query.
    pub async fn execute(&self, datagram: &[u8]) -> Result<QueryOutcome, DomainError> {
        let request = Message::decode(datagram, Sections::Questions)?;

        debug!(
            id = request.header.id,
            flags = %request.header.flags,
            opcode = request.header.flags.opcode(),
            questions = request.questions.len(),
            "Request parsed"
        );
        for question in &request.questions {
            debug!(id = request.header.id, question = %question, "Question");
        }

        let mode = ResolutionMode::select(&request, self.is_forwarding());
        let mut failed_subqueries = 0;

        let response = match (mode, self.upstream.as_deref()) {
            (ResolutionMode::ForwardSingle, Some(upstream)) => {
                let query = request.clone().with_section_counts();
                forward_single(upstream, &query).await?
            }
            (ResolutionMode::ForwardMulti, Some(upstream)) => {
                let (merged, failed) = forward_multi(upstream, &request).await;
                failed_subqueries = failed;
                merged.encode()
            }
            (ResolutionMode::Reject, _) => Message::rejection_response(&request).encode(),
            _ => Message::standalone_response(&request).encode(),
        };

        Ok(QueryOutcome {
            id: request.header.id,
            mode,
            questions: request.questions.len(),
            failed_subqueries,
            response,
        })
    }
}

impl Default for HandleDnsQueryUseCase {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends `query` and returns the reply datagram exactly as received.
async fn forward_single(
    upstream: &dyn UpstreamTransport,
    query: &Message,
) -> Result<Vec<u8>, DomainError> {
    let reply = upstream.exchange(&query.encode()).await?;

    if reply.len() >= 2 && reply[..2] != query.header.id.to_be_bytes() {
        warn!(
            server = %upstream.server(),
            expected_id = query.header.id,
            received_id = u16::from_be_bytes([reply[0], reply[1]]),
            "Upstream reply ID mismatch"
        );
    }

    debug!(
        server = %upstream.server(),
        id = query.header.id,
        bytes = reply.len(),
        "Upstream reply received"
    );
    Ok(reply)
}

/// Splits `request` into one query per question, sequentially and in order,
/// and merges every answer received. Returns the merged message and the
/// number of sub-queries that failed.
async fn forward_multi(upstream: &dyn UpstreamTransport, request: &Message) -> (Message, usize) {
    let mut answers = Vec::new();
    let mut failed = 0;

    for (index, question) in request.questions.iter().enumerate() {
        let sub_query = Message::single_question_query(request, question);

        let reply = match forward_single(upstream, &sub_query).await {
            Ok(bytes) => Message::decode(&bytes, Sections::QuestionsAndAnswers)
                .map_err(|e| DomainError::UpstreamDecodeFailure(e.to_string())),
            Err(e) => Err(e),
        };

        match reply {
            Ok(reply) => {
                debug!(
                    id = request.header.id,
                    index,
                    question = %question,
                    answers = reply.answers.len(),
                    "Sub-query answered"
                );
                answers.extend(reply.answers);
            }
            Err(e) => {
                failed += 1;
                warn!(
                    id = request.header.id,
                    index,
                    question = %question,
                    error = %e,
                    "Sub-query failed, omitting its answers"
                );
            }
        }
    }

    (Message::merged_response(request, answers), failed)
}
