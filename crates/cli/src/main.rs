use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use masqstat_domain::{CliOverrides, Config};
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "masqstat")]
#[command(version)]
#[command(about = "Masqstat - dnsmasq and network metrics exporter for Prometheus")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Address and port to expose metrics on
    #[arg(long)]
    listen_address: Option<String>,

    /// Path under which to expose metrics
    #[arg(long)]
    telemetry_path: Option<String>,

    /// DNS server to export metrics for, including port
    #[arg(long)]
    dns_server: Option<String>,

    /// Path to the proc file system to scrape metrics from
    #[arg(long)]
    proc_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        listen_address: cli.listen_address,
        telemetry_path: cli.telemetry_path,
        dns_server: cli.dns_server,
        proc_path: cli.proc_path,
        log_level: cli.log_level,
    };

    let config = Config::load(cli.config.as_deref(), overrides)?;
    config.validate()?;

    bootstrap::init_logging(&config);

    info!("Starting masqstat v{}", env!("CARGO_PKG_VERSION"));

    let registry = bootstrap::build_registry(&config)?;

    let bind_addr: SocketAddr = config.server.listen_address.parse()?;
    server::start_web_server(
        bind_addr,
        config.server.telemetry_path.clone(),
        Arc::new(registry),
    )
    .await
}
