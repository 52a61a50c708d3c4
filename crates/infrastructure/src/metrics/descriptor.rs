//! Metric descriptors and the per-collector descriptor cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use masqstat_domain::MetricKind;

/// Immutable metadata identifying a metric series, independent of its
/// current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub help: String,
    pub label_names: Vec<&'static str>,
    pub kind: MetricKind,
}

impl Descriptor {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        label_names: Vec<&'static str>,
        kind: MetricKind,
    ) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            label_names,
            kind,
        }
    }
}

/// Lazily populated map from metric name to descriptor.
///
/// The proc readers only learn their metric names while parsing, so
/// descriptors are created on first observation and kept for the lifetime of
/// the collector; a name that stops appearing simply stops being emitted.
/// Scrapes may overlap, so the cache is locked for the whole read-or-insert
/// and emit sequence: two concurrent first observations of one name must not
/// mint two identities.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    inner: Mutex<HashMap<String, Arc<Descriptor>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> DescriptorCacheGuard<'_> {
        // A poisoned lock only means an earlier scrape panicked mid-emit;
        // the map itself is still usable.
        DescriptorCacheGuard {
            inner: self.inner.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }
}

pub struct DescriptorCacheGuard<'a> {
    inner: MutexGuard<'a, HashMap<String, Arc<Descriptor>>>,
}

impl DescriptorCacheGuard<'_> {
    /// Return the descriptor for `name`, creating and storing it on first
    /// observation. Descriptors are never evicted.
    pub fn get_or_create(
        &mut self,
        name: &str,
        create: impl FnOnce() -> Descriptor,
    ) -> Arc<Descriptor> {
        if let Some(existing) = self.inner.get(name) {
            return Arc::clone(existing);
        }
        let created = Arc::new(create());
        self.inner.insert(name.to_string(), Arc::clone(&created));
        created
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
