use relay_dns_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a hostname to all its IP addresses (IPv4 + IPv6).
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Option<Duration>,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = format!("{}:{}", hostname, port);

    let lookup = tokio::net::lookup_host(target.as_str());
    let addrs_iter = match timeout {
        Some(limit) => tokio::time::timeout(limit, lookup)
            .await
            .map_err(|_| DomainError::unreachable(&target, "hostname lookup timed out"))?,
        None => lookup.await,
    }
    .map_err(|e| DomainError::unreachable(&target, format!("hostname lookup failed: {}", e)))?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::unreachable(&target, "no addresses found"));
    }

    Ok(addrs)
}

/// Socket address for `upstream`, looking the hostname up when needed.
/// The first address returned by the system resolver wins.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Option<Duration>,
) -> Result<SocketAddr, DomainError> {
    match upstream {
        UpstreamAddr::Resolved(addr) => Ok(*addr),
        UpstreamAddr::Unresolved { hostname, port } => {
            let addrs = resolve_all(hostname, *port, timeout).await?;
            Ok(addrs[0])
        }
    }
}
