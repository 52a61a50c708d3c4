//! Collector for per-subsystem net/stat values.

use prometheus_client::collector::Collector;
use prometheus_client::encoding::DescriptorEncoder;
use tracing::warn;

use super::{encode_descriptor, encode_plain_sample, Descriptor, DescriptorCache};
use crate::procfs::ProcNetStatReader;

/// Unchecked collector over one net/stat subsystem file. Values are already
/// aggregated across CPU rows by the reader, so every metric is a single
/// unlabeled sample.
#[derive(Debug)]
pub struct NetStatCollector {
    reader: ProcNetStatReader,
    descriptors: DescriptorCache,
    help: String,
}

impl NetStatCollector {
    pub fn new(reader: ProcNetStatReader) -> Self {
        let help = format!("generated from {}", reader.path().display());
        Self {
            reader,
            descriptors: DescriptorCache::new(),
            help,
        }
    }
}

impl Collector for NetStatCollector {
    fn encode(&self, encoder: &mut DescriptorEncoder) -> Result<(), std::fmt::Error> {
        let result = match self.reader.read() {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    subsystem = %self.reader.subsystem(),
                    path = %self.reader.path().display(),
                    %err,
                    "failed to read net/stat statistics during collection"
                );
                return Ok(());
            }
        };

        let mut cache = self.descriptors.lock();
        for value in &result.values {
            let descriptor = cache.get_or_create(&value.name, || {
                Descriptor::new(value.name.as_str(), self.help.clone(), Vec::new(), value.kind)
            });

            let mut metric = encode_descriptor(encoder, &descriptor)?;
            encode_plain_sample(&mut metric, descriptor.kind, value.value)?;
        }

        Ok(())
    }
}
