use clap::Parser;
use relay_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "relay-dns")]
#[command(version)]
#[command(about = "relay-dns - UDP DNS forwarder that splits multi-question queries")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (ip:port)
    #[arg(short = 'l', long, value_name = "ADDR")]
    listen: Option<String>,

    /// Upstream resolver (ip:port or host:port); omit to answer locally
    #[arg(short = 'r', long, value_name = "ADDR")]
    resolver: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen_address: cli.listen,
        resolver: cli.resolver,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting relay-dns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;

    tokio::select! {
        result = server::start_dns_server(&config.server, dns_services.handler) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Server shutdown complete");
    Ok(())
}
