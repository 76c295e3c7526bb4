use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated header: need 12 bytes, got {0}")]
    TruncatedHeader(usize),

    #[error("Malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: String },

    #[error("Truncated question at offset {0}: QTYPE/QCLASS missing")]
    TruncatedQuestion(usize),

    #[error("Truncated answer at offset {offset}: {reason}")]
    TruncatedAnswer { offset: usize, reason: String },

    #[error("Upstream {server} unreachable: {reason}")]
    UpstreamUnreachable { server: String, reason: String },

    #[error("Failed to decode upstream reply: {0}")]
    UpstreamDecodeFailure(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstreamAddress(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),
}

impl DomainError {
    pub(crate) fn malformed_name(offset: usize, reason: impl Into<String>) -> Self {
        DomainError::MalformedName {
            offset,
            reason: reason.into(),
        }
    }

    pub fn unreachable(server: impl ToString, reason: impl ToString) -> Self {
        DomainError::UpstreamUnreachable {
            server: server.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for the decode failures a malformed datagram can produce.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            DomainError::TruncatedHeader(_)
                | DomainError::MalformedName { .. }
                | DomainError::TruncatedQuestion(_)
                | DomainError::TruncatedAnswer { .. }
        )
    }
}
