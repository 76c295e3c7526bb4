use relay_dns_application::use_cases::HandleDnsQueryUseCase;
use relay_dns_domain::wire::MAX_UDP_MESSAGE;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns one client datagram into the reply datagram, if any.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when the datagram must be dropped: the request did not
    /// parse, or a forwarded single-question exchange failed.
    pub async fn handle_datagram(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        if datagram.len() > MAX_UDP_MESSAGE {
            debug!(client = %client, bytes = datagram.len(), "Oversized datagram, parsing first 512 bytes");
        }
        let datagram = &datagram[..datagram.len().min(MAX_UDP_MESSAGE)];

        match self.use_case.execute(datagram).await {
            Ok(outcome) => {
                info!(
                    client = %client,
                    id = outcome.id,
                    questions = outcome.questions,
                    mode = %outcome.mode,
                    failed_subqueries = outcome.failed_subqueries,
                    bytes = outcome.response.len(),
                    "DNS query answered"
                );
                Some(outcome.response)
            }
            Err(e) if e.is_decode_error() => {
                warn!(client = %client, bytes = datagram.len(), error = %e, "Dropping malformed request");
                None
            }
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping request, upstream exchange failed");
                None
            }
        }
    }
}
