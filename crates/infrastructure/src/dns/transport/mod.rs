pub mod resolver;
pub mod udp;

pub use udp::UdpTransport;
