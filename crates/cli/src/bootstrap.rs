use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use masqstat_domain::Config;
use masqstat_infrastructure::dns::{DnsmasqReader, UdpTransport};
use masqstat_infrastructure::metrics::{DnsmasqCollector, NetDevCollector, NetStatCollector};
use masqstat_infrastructure::procfs::{ProcNetDevReader, ProcNetStatReader};
use prometheus_client::registry::Registry;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the exposition registry and register every collector whose source
/// is present. The dnsmasq collector is always registered; the proc
/// collectors are probed first since their files do not exist everywhere.
pub fn build_registry(config: &Config) -> anyhow::Result<Registry> {
    let mut registry = Registry::default();

    let dns_addr: SocketAddr = config
        .dns
        .server
        .parse()
        .with_context(|| format!("invalid DNS server address '{}'", config.dns.server))?;
    let transport = UdpTransport::new(dns_addr, Duration::from_secs(config.dns.timeout_secs));
    let reader = DnsmasqReader::new(transport, config.dns.server.clone());
    registry.register_collector(Box::new(DnsmasqCollector::new(reader)));
    info!(server = %config.dns.server, "registered dnsmasq collector");

    let net_dev = ProcNetDevReader::new(&config.proc.path);
    if net_dev.exists() {
        info!(path = %net_dev.path().display(), "registered net/dev collector");
        registry.register_collector(Box::new(NetDevCollector::new(net_dev)));
    } else {
        warn!(
            path = %net_dev.path().display(),
            "net/dev not present, skipping collector"
        );
    }

    for subsystem in &config.proc.net_stat_subsystems {
        let reader = ProcNetStatReader::new(&config.proc.path, subsystem.clone());
        if reader.exists() {
            info!(
                subsystem = %subsystem,
                path = %reader.path().display(),
                "registered net/stat collector"
            );
            registry.register_collector(Box::new(NetStatCollector::new(reader)));
        } else {
            debug!(
                subsystem = %subsystem,
                "net/stat file not present, skipping collector"
            );
        }
    }

    Ok(registry)
}
