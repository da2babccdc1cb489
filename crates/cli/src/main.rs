use clap::Parser;
use stackdns_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "stackdns")]
#[command(version)]
#[command(about = "stackdns - authoritative-first DNS server with recursive fallback")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Number of UDP workers
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// JSON zone file served by the static provider
    #[arg(short = 'r', long, value_name = "FILE")]
    record_file: Option<String>,

    /// Provider chain: standard, static or recursive
    #[arg(long)]
    resolver_factory: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        workers: cli.workers,
        record_file: cli.record_file,
        resolver_factory: cli.resolver_factory,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting stackdns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let workers = config.server.workers;

    tokio::select! {
        result = server::start_dns_server(dns_addr, services.handler, workers) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
