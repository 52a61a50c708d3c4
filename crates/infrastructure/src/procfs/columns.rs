//! Shared column parsing for the tabular proc formats.
//!
//! The column sets of these files are not known ahead of time; metric names
//! are derived from whatever headers the kernel exposes.

use std::collections::BTreeMap;

use tracing::warn;

/// Namespace prefixed to every metric name this exporter produces.
pub(crate) const NAMESPACE: &str = "masqstat";

/// Fully-qualified metric name from namespace, subsystem and field header.
pub(crate) fn fq_name(subsystem: &str, field: &str) -> String {
    format!(
        "{}_{}_{}",
        NAMESPACE,
        subsystem.to_lowercase(),
        field.to_lowercase()
    )
}

/// Parse one value in the given base. A token that fails to parse is logged
/// and reported as absent; the caller moves on to the next column.
pub(crate) fn parse_value(name: &str, value: &str, base: u32) -> Option<u64> {
    match u64::from_str_radix(value, base) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(name = %name, value = %value, %err, "failed to parse value");
            None
        }
    }
}

/// Parse a row of header/value pairs into `out`, keyed by fully-qualified
/// metric name. Pairs beyond the shorter of the two slices are ignored.
pub(crate) fn parse_row(
    out: &mut BTreeMap<String, u64>,
    subsystem: &str,
    headers: &[&str],
    values: &[&str],
    base: u32,
) {
    for (header, value) in headers.iter().zip(values) {
        let name = fq_name(subsystem, header);
        if let Some(parsed) = parse_value(&name, value, base) {
            out.insert(name, parsed);
        }
    }
}
