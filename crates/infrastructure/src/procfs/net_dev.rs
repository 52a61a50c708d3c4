//! Per-interface network device statistics.
//!
//! The net/dev format: a banner line, then a header split by `|` into a
//! label segment, receive field names and transmit field names, then one
//! line per interface.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use masqstat_domain::{NetInterfaceResult, ScrapeError};
use tracing::warn;

use super::columns;

const RX_SUBSYSTEM: &str = "net_rx";
const TX_SUBSYSTEM: &str = "net_tx";

#[derive(Debug)]
pub struct ProcNetDevReader {
    path: PathBuf,
}

impl ProcNetDevReader {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            path: base.as_ref().join("net").join("dev"),
        }
    }

    /// The file is not present on every machine; callers should skip
    /// registration when this returns false.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<NetInterfaceResult>, ScrapeError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| ScrapeError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut lines = contents.lines();
        lines.next(); // skip banner line

        let header_line = lines.next().unwrap_or_default();
        let header_parts: Vec<&str> = header_line.split('|').collect();
        if header_parts.len() != 3 {
            return Err(ScrapeError::Format(format!(
                "unexpected header line format '{}'",
                header_line
            )));
        }

        let rx_headers: Vec<&str> = header_parts[1].split_whitespace().collect();
        let tx_headers: Vec<&str> = header_parts[2].split_whitespace().collect();

        let mut results = Vec::new();
        for line in lines {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }
            if parts.len() <= rx_headers.len() {
                // Too short to split into rx/tx slices; skip the line rather
                // than aborting the whole read.
                warn!(line = %line, "skipping short interface line");
                continue;
            }

            let interface = parts[0].trim_end_matches(':').to_string();
            let rx_values = &parts[1..=rx_headers.len()];
            let tx_values = &parts[rx_headers.len() + 1..];

            let mut values = BTreeMap::new();
            columns::parse_row(&mut values, RX_SUBSYSTEM, &rx_headers, rx_values, 10);
            columns::parse_row(&mut values, TX_SUBSYSTEM, &tx_headers, tx_values, 10);

            results.push(NetInterfaceResult { interface, values });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
  eth0: 1000 10 1 0 0 0 0 0 2000 20 2 0 0 0 0 0
    lo:  500  5 0 0 0 0 0 0  500  5 0 0 0 0 0 0
";

    fn write_net_dev(dir: &Path, contents: &str) {
        let net = dir.join("net");
        fs::create_dir_all(&net).unwrap();
        let mut file = fs::File::create(net.join("dev")).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_exists() {
        let dir = tempfile::tempdir().unwrap();
        let reader = ProcNetDevReader::new(dir.path());
        assert!(!reader.exists());

        write_net_dev(dir.path(), NET_DEV);
        assert!(reader.exists());
    }

    #[test]
    fn test_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        write_net_dev(dir.path(), NET_DEV);

        let results = ProcNetDevReader::new(dir.path()).read().unwrap();
        assert_eq!(results.len(), 2);

        let eth0 = &results[0];
        assert_eq!(eth0.interface, "eth0");
        assert_eq!(eth0.values["masqstat_net_rx_bytes"], 1000);
        assert_eq!(eth0.values["masqstat_net_rx_packets"], 10);
        assert_eq!(eth0.values["masqstat_net_rx_errs"], 1);
        assert_eq!(eth0.values["masqstat_net_tx_bytes"], 2000);
        assert_eq!(eth0.values["masqstat_net_tx_packets"], 20);
        assert_eq!(eth0.values["masqstat_net_tx_errs"], 2);

        let lo = &results[1];
        assert_eq!(lo.interface, "lo");
        assert_eq!(lo.values["masqstat_net_rx_bytes"], 500);
        assert_eq!(lo.values["masqstat_net_tx_bytes"], 500);
    }

    #[test]
    fn test_read_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_net_dev(dir.path(), NET_DEV);

        let reader = ProcNetDevReader::new(dir.path());
        assert_eq!(reader.read().unwrap(), reader.read().unwrap());
    }

    #[test]
    fn test_bad_value_skips_field_only() {
        let contents = "\
Inter-|   Receive    |  Transmit
 face |bytes packets|bytes packets
  eth0: bogus 10 2000 20
";
        let dir = tempfile::tempdir().unwrap();
        write_net_dev(dir.path(), contents);

        let results = ProcNetDevReader::new(dir.path()).read().unwrap();
        assert_eq!(results.len(), 1);
        let eth0 = &results[0];
        assert!(!eth0.values.contains_key("masqstat_net_rx_bytes"));
        assert_eq!(eth0.values["masqstat_net_rx_packets"], 10);
        assert_eq!(eth0.values["masqstat_net_tx_bytes"], 2000);
    }

    #[test]
    fn test_short_line_is_skipped() {
        let contents = "\
Inter-|   Receive    |  Transmit
 face |bytes packets|bytes packets
  eth0: 1000
    lo: 500 5 600 6
";
        let dir = tempfile::tempdir().unwrap();
        write_net_dev(dir.path(), contents);

        let results = ProcNetDevReader::new(dir.path()).read().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].interface, "lo");
    }

    #[test]
    fn test_bad_header_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_net_dev(dir.path(), "banner\nno pipes here\n");

        let result = ProcNetDevReader::new(dir.path()).read();
        assert!(matches!(result, Err(ScrapeError::Format(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcNetDevReader::new(dir.path()).read();
        assert!(matches!(result, Err(ScrapeError::Io { .. })));
    }
}
