mod handle_dns_query;
mod resolution_mode;

pub use handle_dns_query::{HandleDnsQueryUseCase, QueryOutcome};
pub use resolution_mode::ResolutionMode;
