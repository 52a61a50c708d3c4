//! Per-subsystem net/stat statistics.
//!
//! Files under net/stat (conntrack, ARP cache, ...) report one hexadecimal
//! row per CPU under a single header line.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use masqstat_domain::{MetricKind, NetStatResult, ScrapeError, ValueDesc, ENTRIES_FIELD};

use super::columns;

#[derive(Debug)]
pub struct ProcNetStatReader {
    subsystem: String,
    path: PathBuf,
}

impl ProcNetStatReader {
    pub fn new(base: impl AsRef<Path>, subsystem: impl Into<String>) -> Self {
        let subsystem = subsystem.into();
        Self {
            path: base.as_ref().join("net").join("stat").join(&subsystem),
            subsystem,
        }
    }

    /// The subsystem file only exists when the corresponding kernel feature
    /// is active (e.g. conntrack may be disabled entirely).
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<NetStatResult, ScrapeError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| ScrapeError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut lines = contents.lines();
        let headers: Vec<&str> = lines.next().unwrap_or_default().split_whitespace().collect();

        let mut parsed: BTreeMap<String, ValueDesc> = BTreeMap::new();
        for line in lines {
            let values: Vec<&str> = line.split_whitespace().collect();
            if values.is_empty() {
                continue;
            }
            self.aggregate_row(&mut parsed, &headers, &values);
        }

        Ok(NetStatResult {
            values: parsed.into_values().collect(),
        })
    }

    fn aggregate_row(
        &self,
        parsed: &mut BTreeMap<String, ValueDesc>,
        headers: &[&str],
        values: &[&str],
    ) {
        for (header, value) in headers.iter().zip(values) {
            let field = header.to_lowercase();
            let name = columns::fq_name(&self.subsystem, &field);
            let Some(parsed_value) = columns::parse_value(&name, value, 16) else {
                continue;
            };

            match parsed.entry(name.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(ValueDesc {
                        name,
                        value: parsed_value,
                        kind: MetricKind::for_field(&field),
                    });
                }
                Entry::Occupied(mut entry) => {
                    // "entries" is the table-wide total repeated on every CPU
                    // row; take the latest value instead of summing. All
                    // other fields are genuinely per-CPU and are summed.
                    if field == ENTRIES_FIELD {
                        entry.get_mut().value = parsed_value;
                    } else {
                        let current = entry.get().value;
                        entry.get_mut().value = current.saturating_add(parsed_value);
                    }
                }
            }
        }
    }
}
