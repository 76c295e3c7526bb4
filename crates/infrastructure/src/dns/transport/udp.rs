//! UDP transport to the upstream resolver (RFC 1035 §4.2.1).
//!
//! One fresh socket per exchange, connected to the resolver, one datagram
//! out and one datagram in. Replies larger than 512 bytes are cut at 512.

use super::resolver::resolve_upstream;
use async_trait::async_trait;
use relay_dns_application::ports::UpstreamTransport;
use relay_dns_domain::wire::MAX_UDP_MESSAGE;
use relay_dns_domain::{DomainError, UpstreamAddr};
use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

pub struct UdpTransport {
    server: UpstreamAddr,
    timeout: Option<Duration>,
}

impl UdpTransport {
    pub fn new(server: UpstreamAddr) -> Self {
        Self {
            server,
            timeout: None,
        }
    }

    /// Bounds the lookup, send and receive steps individually.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn upstream(&self) -> &UpstreamAddr {
        &self.server
    }

    async fn bounded<T, F>(&self, step: &str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = std::io::Result<T>>,
    {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| DomainError::unreachable(&self.server, format!("{} timed out", step)))?,
            None => fut.await,
        };
        result.map_err(|e| DomainError::unreachable(&self.server, format!("{} failed: {}", step, e)))
    }
}

#[async_trait]
impl UpstreamTransport for UdpTransport {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server_addr = resolve_upstream(&self.server, self.timeout).await?;

        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::unreachable(&self.server, format!("bind failed: {}", e)))?;
        socket
            .connect(server_addr)
            .await
            .map_err(|e| DomainError::unreachable(&self.server, format!("connect failed: {}", e)))?;

        let bytes_sent = self.bounded("send", socket.send(query)).await?;
        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE];
        let bytes_received = self.bounded("receive", socket.recv(&mut recv_buf)).await?;
        recv_buf.truncate(bytes_received);

        debug!(server = %server_addr, bytes_received, "UDP reply received");
        Ok(recv_buf)
    }

    fn server(&self) -> String {
        self.server.to_string()
    }
}
