use relay_dns_domain::config::ServerConfig;
use relay_dns_domain::wire::MAX_UDP_MESSAGE;
use relay_dns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

pub async fn start_dns_server(
    config: &ServerConfig,
    handler: Arc<DnsServerHandler>,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = config.listen_address.parse()?;
    let socket = create_udp_socket(socket_addr)?;

    info!(bind_address = %socket.local_addr()?, "DNS server ready");

    run_udp_loop(socket, handler, config.max_consecutive_recv_errors).await
}

/// Receives, handles and answers one datagram at a time.
async fn run_udp_loop(
    socket: UdpSocket,
    handler: Arc<DnsServerHandler>,
    max_consecutive_errors: u32,
) -> anyhow::Result<()> {
    let mut recv_buf = [0u8; MAX_UDP_MESSAGE];
    let mut consecutive_errors = 0u32;

    loop {
        let (len, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => {
                consecutive_errors = 0;
                received
            }
            Err(e) => {
                consecutive_errors += 1;
                warn!(error = %e, consecutive_errors, "UDP receive failed");
                if consecutive_errors > max_consecutive_errors {
                    error!(consecutive_errors, "Too many consecutive receive failures");
                    return Err(e.into());
                }
                continue;
            }
        };

        debug!(client = %from, bytes = len, "Datagram received");

        if let Some(response) = handler.handle_datagram(&recv_buf[..len], from).await {
            if let Err(e) = socket.send_to(&response, from).await {
                warn!(client = %from, error = %e, "Failed to send response");
            }
        }
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
