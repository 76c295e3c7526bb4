use crate::{DomainError, UpstreamAddr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver to forward to. Empty selects standalone mode.
    #[serde(default)]
    pub resolver: String,

    /// Bound on each upstream send and receive. Unset waits indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl UpstreamConfig {
    pub fn is_standalone(&self) -> bool {
        self.resolver.trim().is_empty()
    }

    /// Parsed resolver address, `None` in standalone mode.
    pub fn resolver_addr(&self) -> Result<Option<UpstreamAddr>, DomainError> {
        if self.is_standalone() {
            return Ok(None);
        }
        self.resolver.parse().map(Some)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
