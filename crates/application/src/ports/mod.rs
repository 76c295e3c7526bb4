mod upstream_transport;

pub use upstream_transport::UpstreamTransport;
