//! Collector for per-interface net/dev counters.

use std::collections::BTreeMap;

use masqstat_domain::MetricKind;
use prometheus_client::collector::Collector;
use prometheus_client::encoding::DescriptorEncoder;
use tracing::warn;

use super::{encode_descriptor, encode_sample, Descriptor, DescriptorCache};
use crate::procfs::ProcNetDevReader;

const INTERFACE_LABEL: &str = "interface";

/// Unchecked collector: the metric set depends on the columns the kernel
/// exposes, so descriptors are created while emitting and cached per name.
#[derive(Debug)]
pub struct NetDevCollector {
    reader: ProcNetDevReader,
    descriptors: DescriptorCache,
    help: String,
}

impl NetDevCollector {
    pub fn new(reader: ProcNetDevReader) -> Self {
        let help = format!("generated from {}", reader.path().display());
        Self {
            reader,
            descriptors: DescriptorCache::new(),
            help,
        }
    }
}

impl Collector for NetDevCollector {
    fn encode(&self, encoder: &mut DescriptorEncoder) -> Result<(), std::fmt::Error> {
        // Reading and parsing needs no lock; it produces a fresh result.
        let results = match self.reader.read() {
            Ok(results) => results,
            Err(err) => {
                warn!(
                    path = %self.reader.path().display(),
                    %err,
                    "failed to read net/dev statistics during collection"
                );
                return Ok(());
            }
        };

        // The exposition format wants one block per metric name, so group
        // the per-interface series by name before emitting.
        let mut series: BTreeMap<&str, Vec<(&str, u64)>> = BTreeMap::new();
        for result in &results {
            for (name, value) in &result.values {
                series
                    .entry(name.as_str())
                    .or_default()
                    .push((result.interface.as_str(), *value));
            }
        }

        let mut cache = self.descriptors.lock();
        for (name, points) in series {
            let descriptor = cache.get_or_create(name, || {
                Descriptor::new(
                    name,
                    self.help.clone(),
                    vec![INTERFACE_LABEL],
                    MetricKind::Counter,
                )
            });

            let mut metric = encode_descriptor(encoder, &descriptor)?;
            for (interface, value) in points {
                encode_sample(
                    &mut metric,
                    descriptor.kind,
                    value,
                    &[(INTERFACE_LABEL, interface)],
                )?;
            }
        }

        Ok(())
    }
}
