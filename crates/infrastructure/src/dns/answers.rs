//! Decoding of individual TXT statistics answers.

use hickory_proto::rr::{RData, Record};
use masqstat_domain::ServerStats;

/// Parse a scalar statistic: the first TXT string is the decimal value.
pub(crate) fn parse_counter(record: &Record) -> Result<u64, String> {
    let strings = txt_strings(record)?;
    let first = strings
        .first()
        .ok_or_else(|| "empty TXT answer".to_string())?;
    first
        .parse::<u64>()
        .map_err(|e| format!("'{}' is not an unsigned integer: {}", first, e))
}

/// Parse the server list: one TXT string per upstream, each a
/// space-separated `<address> <queries_sent> <query_errors>` triple.
///
/// A single malformed triple fails the whole list; there is no partial
/// server list.
pub(crate) fn parse_server_list(record: &Record) -> Result<Vec<ServerStats>, String> {
    let strings = txt_strings(record)?;
    let mut out = Vec::with_capacity(strings.len());

    for entry in &strings {
        let fields: Vec<&str> = entry.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(format!(
                "expected 3 server fields, got {} from '{}'",
                fields.len(),
                entry
            ));
        }

        let queries_sent = fields[1]
            .parse::<u64>()
            .map_err(|e| format!("bad query count '{}': {}", fields[1], e))?;
        let query_errors = fields[2]
            .parse::<u64>()
            .map_err(|e| format!("bad error count '{}': {}", fields[2], e))?;

        out.push(ServerStats {
            address: fields[0].to_string(),
            queries_sent,
            query_errors,
        });
    }

    Ok(out)
}

fn txt_strings(record: &Record) -> Result<Vec<String>, String> {
    match record.data() {
        RData::TXT(txt) => Ok(txt
            .txt_data()
            .iter()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect()),
        _ => Err(format!(
            "expected TXT record, got {}",
            record.record_type()
        )),
    }
}
