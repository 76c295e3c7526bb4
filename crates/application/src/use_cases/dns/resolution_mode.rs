use relay_dns_domain::wire::header::OPCODE_QUERY;
use relay_dns_domain::Message;
use std::fmt;

/// How a single request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// No resolver configured: synthesize answers locally.
    Local,
    /// Resolver configured but the OPCODE is not a standard query: answer
    /// NOTIMP locally without contacting the resolver.
    Reject,
    /// Resolver configured, at most one question: pass the reply through.
    ForwardSingle,
    /// Resolver configured, several questions: one sub-query per question,
    /// answers merged into a single response.
    ForwardMulti,
}

impl ResolutionMode {
    pub fn select(request: &Message, forwarding: bool) -> Self {
        if !forwarding {
            return ResolutionMode::Local;
        }
        if request.header.flags.opcode() != OPCODE_QUERY {
            return ResolutionMode::Reject;
        }
        if request.questions.len() > 1 {
            ResolutionMode::ForwardMulti
        } else {
            ResolutionMode::ForwardSingle
        }
    }

    pub fn is_forwarded(&self) -> bool {
        matches!(
            self,
            ResolutionMode::ForwardSingle | ResolutionMode::ForwardMulti
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Local => "local",
            ResolutionMode::Reject => "reject",
            ResolutionMode::ForwardSingle => "forward_single",
            ResolutionMode::ForwardMulti => "forward_multi",
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
