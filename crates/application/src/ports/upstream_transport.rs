use async_trait::async_trait;
use relay_dns_domain::DomainError;

/// One request/reply exchange with the upstream resolver.
///
/// Implementations open a fresh channel per call and read exactly one reply
/// datagram; nothing is pooled or reused between calls.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError>;

    /// Human-readable upstream address for logs.
    fn server(&self) -> String;
}
