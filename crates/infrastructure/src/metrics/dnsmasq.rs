//! Collector for the dnsmasq statistics channel.

use masqstat_domain::MetricKind;
use prometheus_client::collector::Collector;
use prometheus_client::encoding::DescriptorEncoder;
use tracing::warn;

use super::{encode_descriptor, encode_sample, Descriptor};
use crate::dns::{DnsTransport, DnsmasqReader};

const SERVER_LABEL: &str = "server";
const UPSTREAM_LABEL: &str = "upstream";

/// The daemon's statistics schema is known up front, unlike the proc
/// collectors: this is the fixed descriptor set.
#[derive(Debug)]
struct Descriptions {
    cache_size: Descriptor,
    cache_insertions: Descriptor,
    cache_evictions: Descriptor,
    cache_misses: Descriptor,
    cache_hits: Descriptor,
    authoritative: Descriptor,
    upstream_queries: Descriptor,
    upstream_errors: Descriptor,
}

impl Descriptions {
    fn new() -> Self {
        let per_server = vec![SERVER_LABEL];
        let per_upstream = vec![SERVER_LABEL, UPSTREAM_LABEL];
        Self {
            cache_size: Descriptor::new(
                "masqstat_dns_cache_size",
                "Size of the DNS cache",
                per_server.clone(),
                MetricKind::Counter,
            ),
            cache_insertions: Descriptor::new(
                "masqstat_dns_cache_insertions",
                "Number of inserts in the DNS cache",
                per_server.clone(),
                MetricKind::Counter,
            ),
            cache_evictions: Descriptor::new(
                "masqstat_dns_cache_evictions",
                "Number of evictions in the DNS cache",
                per_server.clone(),
                MetricKind::Counter,
            ),
            cache_misses: Descriptor::new(
                "masqstat_dns_cache_misses",
                "Number of misses in the DNS cache",
                per_server.clone(),
                MetricKind::Counter,
            ),
            cache_hits: Descriptor::new(
                "masqstat_dns_cache_hits",
                "Number of hits in the DNS cache",
                per_server.clone(),
                MetricKind::Counter,
            ),
            authoritative: Descriptor::new(
                "masqstat_dns_authoritative",
                "Number of authoritative DNS queries answered",
                per_server,
                MetricKind::Counter,
            ),
            upstream_queries: Descriptor::new(
                "masqstat_dns_upstream_queries",
                "Number of queries sent to upstream servers",
                per_upstream.clone(),
                MetricKind::Counter,
            ),
            upstream_errors: Descriptor::new(
                "masqstat_dns_upstream_errors",
                "Number of errors from upstream servers",
                per_upstream,
                MetricKind::Counter,
            ),
        }
    }
}

pub struct DnsmasqCollector<T> {
    reader: DnsmasqReader<T>,
    descriptions: Descriptions,
}

impl<T> std::fmt::Debug for DnsmasqCollector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsmasqCollector")
            .field("reader", &self.reader)
            .finish()
    }
}

impl<T: DnsTransport> DnsmasqCollector<T> {
    pub fn new(reader: DnsmasqReader<T>) -> Self {
        Self {
            reader,
            descriptions: Descriptions::new(),
        }
    }

    /// The full descriptor set this collector can emit.
    pub fn descriptors(&self) -> [&Descriptor; 8] {
        let d = &self.descriptions;
        [
            &d.cache_size,
            &d.cache_insertions,
            &d.cache_evictions,
            &d.cache_misses,
            &d.cache_hits,
            &d.authoritative,
            &d.upstream_queries,
            &d.upstream_errors,
        ]
    }
}

impl<T: DnsTransport + 'static> Collector for DnsmasqCollector<T> {
    fn encode(&self, encoder: &mut DescriptorEncoder) -> Result<(), std::fmt::Error> {
        let stats = match self.reader.read() {
            Ok(stats) => stats,
            Err(err) => {
                warn!(
                    server = %self.reader.address(),
                    %err,
                    "failed to read dnsmasq statistics during collection"
                );
                return Ok(());
            }
        };

        let server = self.reader.address();
        let d = &self.descriptions;

        let scalars = [
            (&d.cache_size, stats.cache_size),
            (&d.cache_insertions, stats.cache_insertions),
            (&d.cache_evictions, stats.cache_evictions),
            (&d.cache_misses, stats.cache_misses),
            (&d.cache_hits, stats.cache_hits),
            (&d.authoritative, stats.authoritative),
        ];
        for (descriptor, value) in scalars {
            let mut metric = encode_descriptor(encoder, descriptor)?;
            encode_sample(
                &mut metric,
                descriptor.kind,
                value,
                &[(SERVER_LABEL, server)],
            )?;
        }

        {
            let mut metric = encode_descriptor(encoder, &d.upstream_queries)?;
            for upstream in &stats.servers {
                encode_sample(
                    &mut metric,
                    d.upstream_queries.kind,
                    upstream.queries_sent,
                    &[
                        (SERVER_LABEL, server),
                        (UPSTREAM_LABEL, upstream.address.as_str()),
                    ],
                )?;
            }
        }

        {
            let mut metric = encode_descriptor(encoder, &d.upstream_errors)?;
            for upstream in &stats.servers {
                encode_sample(
                    &mut metric,
                    d.upstream_errors.kind,
                    upstream.query_errors,
                    &[
                        (SERVER_LABEL, server),
                        (UPSTREAM_LABEL, upstream.address.as_str()),
                    ],
                )?;
            }
        }

        Ok(())
    }
}
