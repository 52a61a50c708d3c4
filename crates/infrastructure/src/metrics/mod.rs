//! Prometheus collectors wrapping the statistics readers.
//!
//! Each reader is wrapped in a [`prometheus_client::collector::Collector`]
//! that re-reads its source on every scrape. A failed read degrades to zero
//! observations plus one log line; it never aborts the scrape.

pub mod descriptor;
pub mod dnsmasq;
pub mod net_dev;
pub mod net_stat;

pub use descriptor::{Descriptor, DescriptorCache};
pub use dnsmasq::DnsmasqCollector;
pub use net_dev::NetDevCollector;
pub use net_stat::NetStatCollector;

use masqstat_domain::MetricKind;
use prometheus_client::encoding::{DescriptorEncoder, EncodeLabelSet, EncodeMetric, MetricEncoder};
use prometheus_client::metrics::counter::ConstCounter;
use prometheus_client::metrics::gauge::ConstGauge;
use prometheus_client::metrics::MetricType;

fn metric_type(kind: MetricKind) -> MetricType {
    match kind {
        MetricKind::Counter => MetricType::Counter,
        MetricKind::Gauge => MetricType::Gauge,
    }
}

/// Start the exposition block for one descriptor. Series are then encoded
/// against the returned encoder, one `encode_family` call per label set.
pub(crate) fn encode_descriptor<'a>(
    encoder: &'a mut DescriptorEncoder<'_>,
    descriptor: &'a Descriptor,
) -> Result<MetricEncoder<'a>, std::fmt::Error> {
    encoder.encode_descriptor(
        &descriptor.name,
        &descriptor.help,
        None,
        metric_type(descriptor.kind),
    )
}

/// Encode one labeled sample under an already-encoded descriptor.
pub(crate) fn encode_sample<S: EncodeLabelSet>(
    metric_encoder: &mut MetricEncoder,
    kind: MetricKind,
    value: u64,
    labels: &S,
) -> Result<(), std::fmt::Error> {
    let family = metric_encoder.encode_family(labels)?;
    encode_plain_sample(family, kind, value)
}

/// Encode one unlabeled sample.
pub(crate) fn encode_plain_sample(
    metric_encoder: MetricEncoder,
    kind: MetricKind,
    value: u64,
) -> Result<(), std::fmt::Error> {
    match kind {
        MetricKind::Counter => ConstCounter::new(value).encode(metric_encoder),
        MetricKind::Gauge => ConstGauge::new(value as i64).encode(metric_encoder),
    }
}
