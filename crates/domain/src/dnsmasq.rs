/// Statistics reported by dnsmasq over its diagnostics channel.
///
/// Built fresh on every read and never mutated afterwards. A value of this
/// type only exists if the whole exchange validated; there is no partial
/// result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsmasqResult {
    pub cache_size: u64,
    pub cache_insertions: u64,
    pub cache_evictions: u64,
    pub cache_misses: u64,
    pub cache_hits: u64,
    pub authoritative: u64,
    /// Per-upstream-server counters, in the order the daemon reported them.
    pub servers: Vec<ServerStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStats {
    /// Upstream server address as reported by the daemon (`host:port`).
    pub address: String,
    pub queries_sent: u64,
    pub query_errors: u64,
}
