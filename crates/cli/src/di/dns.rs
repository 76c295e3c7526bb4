use relay_dns_application::use_cases::HandleDnsQueryUseCase;
use relay_dns_domain::Config;
use relay_dns_infrastructure::dns::{DnsServerHandler, UdpTransport};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let use_case = Self::build_use_case(config)?;
        let handler = Arc::new(DnsServerHandler::new(Arc::new(use_case)));
        Ok(Self { handler })
    }

    fn build_use_case(config: &Config) -> anyhow::Result<HandleDnsQueryUseCase> {
        let use_case = HandleDnsQueryUseCase::new();

        let Some(resolver) = config.upstream.resolver_addr()? else {
            info!("No upstream resolver configured, answering every question locally");
            return Ok(use_case);
        };

        let timeout = config.upstream.timeout();
        info!(
            resolver = %resolver,
            timeout_ms = ?config.upstream.timeout_ms,
            "Forwarding queries to upstream resolver"
        );
        let transport = UdpTransport::new(resolver).with_timeout(timeout);
        Ok(use_case.with_upstream(Arc::new(transport)))
    }
}
