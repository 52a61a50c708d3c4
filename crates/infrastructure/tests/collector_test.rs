mod support;

use std::fs;
use std::path::Path;

use masqstat_infrastructure::dns::DnsmasqReader;
use masqstat_infrastructure::metrics::{DnsmasqCollector, NetDevCollector, NetStatCollector};
use masqstat_infrastructure::procfs::{ProcNetDevReader, ProcNetStatReader};
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use support::{stock_answers, MockTransport};

fn encode_registry(registry: &Registry) -> String {
    let mut buffer = String::new();
    encode(&mut buffer, registry).unwrap();
    buffer
}

fn write_proc_file(base: &Path, relative: &str, contents: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_dnsmasq_collector_exposition() {
    let reader = DnsmasqReader::new(MockTransport::answering(stock_answers()), "127.0.0.1:53");
    let mut registry = Registry::default();
    registry.register_collector(Box::new(DnsmasqCollector::new(reader)));

    let output = encode_registry(&registry);
    assert!(output.contains("# TYPE masqstat_dns_cache_size counter"));
    assert!(output.contains("masqstat_dns_cache_size_total{server=\"127.0.0.1:53\"} 1000"));
    assert!(output.contains("masqstat_dns_cache_hits_total{server=\"127.0.0.1:53\"} 1004"));
    assert!(output.contains("masqstat_dns_authoritative_total{server=\"127.0.0.1:53\"} 1005"));
    assert!(output.contains(
        "masqstat_dns_upstream_queries_total{server=\"127.0.0.1:53\",upstream=\"1.1.1.1:53\"} 1000"
    ));
    assert!(output.contains(
        "masqstat_dns_upstream_errors_total{server=\"127.0.0.1:53\",upstream=\"8.8.8.8:53\"} 501"
    ));
}

#[test]
fn test_dnsmasq_collector_failure_emits_nothing() {
    let reader = DnsmasqReader::new(MockTransport::failing("connection refused"), "127.0.0.1:53");
    let mut registry = Registry::default();
    registry.register_collector(Box::new(DnsmasqCollector::new(reader)));

    let output = encode_registry(&registry);
    assert!(!output.contains("masqstat_dns"));
}

#[test]
fn test_net_dev_collector_exposition() {
    let dir = tempfile::tempdir().unwrap();
    write_proc_file(
        dir.path(),
        "net/dev",
        "Inter-| Receive | Transmit\n face |bytes packets|bytes packets\n  eth0: 1000 10 2000 20\n    lo: 500 5 600 6\n",
    );

    let mut registry = Registry::default();
    registry.register_collector(Box::new(NetDevCollector::new(ProcNetDevReader::new(
        dir.path(),
    ))));

    let output = encode_registry(&registry);
    assert!(output.contains("masqstat_net_rx_bytes_total{interface=\"eth0\"} 1000"));
    assert!(output.contains("masqstat_net_rx_bytes_total{interface=\"lo\"} 500"));
    assert!(output.contains("masqstat_net_tx_packets_total{interface=\"eth0\"} 20"));
}

#[test]
fn test_net_stat_collector_exposition() {
    let dir = tempfile::tempdir().unwrap();
    write_proc_file(
        dir.path(),
        "net/stat/nf_conntrack",
        "entries drops\n0000002a 00000003\n0000002a 00000005\n",
    );

    let mut registry = Registry::default();
    registry.register_collector(Box::new(NetStatCollector::new(ProcNetStatReader::new(
        dir.path(),
        "nf_conntrack",
    ))));

    let output = encode_registry(&registry);
    assert!(output.contains("# TYPE masqstat_nf_conntrack_entries gauge"));
    assert!(output.contains("masqstat_nf_conntrack_entries 42"));
    assert!(output.contains("masqstat_nf_conntrack_drops_total 8"));
}

#[test]
fn test_collector_failure_keeps_other_collectors_scraping() {
    let dir = tempfile::tempdir().unwrap();
    write_proc_file(
        dir.path(),
        "net/stat/nf_conntrack",
        "entries\n2a\n",
    );

    let mut registry = Registry::default();
    // net/dev file deliberately absent.
    registry.register_collector(Box::new(NetDevCollector::new(ProcNetDevReader::new(
        dir.path(),
    ))));
    registry.register_collector(Box::new(NetStatCollector::new(ProcNetStatReader::new(
        dir.path(),
        "nf_conntrack",
    ))));

    let output = encode_registry(&registry);
    assert!(!output.contains("masqstat_net_rx"));
    assert!(output.contains("masqstat_nf_conntrack_entries 42"));
}

#[test]
fn test_consecutive_scrapes_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_proc_file(
        dir.path(),
        "net/dev",
        "Inter-| Receive | Transmit\n face |bytes|bytes\n  eth0: 1000 2000\n",
    );

    let mut registry = Registry::default();
    registry.register_collector(Box::new(NetDevCollector::new(ProcNetDevReader::new(
        dir.path(),
    ))));

    // Descriptors are minted on the first scrape and reused on the second;
    // nothing in the collector advances between reads.
    let first = encode_registry(&registry);
    let second = encode_registry(&registry);
    assert_eq!(first, second);
    assert!(first.contains("masqstat_net_rx_bytes_total{interface=\"eth0\"} 1000"));
}
