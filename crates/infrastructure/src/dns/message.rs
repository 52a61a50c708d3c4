//! Statistics query construction.
//!
//! dnsmasq reuses the diagnostics channel BIND pioneered: TXT queries in the
//! CHAOS class against reserved names under `bind.`. All known statistics
//! are requested in a single message.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

pub(crate) const CACHE_SIZE: &str = "cachesize.bind.";
pub(crate) const INSERTIONS: &str = "insertions.bind.";
pub(crate) const EVICTIONS: &str = "evictions.bind.";
pub(crate) const MISSES: &str = "misses.bind.";
pub(crate) const HITS: &str = "hits.bind.";
pub(crate) const AUTH: &str = "auth.bind.";
pub(crate) const SERVERS: &str = "servers.bind.";

/// Every statistic name queried in one exchange, in question order.
pub(crate) const STAT_QUERIES: [&str; 7] = [
    CACHE_SIZE, INSERTIONS, EVICTIONS, MISSES, HITS, AUTH, SERVERS,
];

/// Build the batched statistics query and serialize it to wire format.
///
/// Returns the message id alongside the bytes so the caller can match the
/// response against the request.
pub(crate) fn build_stats_query() -> Result<(u16, Vec<u8>), String> {
    let id = fastrand::u16(..);
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);

    for stat in STAT_QUERIES {
        let name = Name::from_ascii(stat)
            .map_err(|e| format!("invalid statistic name '{}': {}", stat, e))?;
        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::TXT);
        query.set_query_class(DNSClass::CH);
        message.add_query(query);
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message
        .emit(&mut encoder)
        .map_err(|e| format!("failed to serialize statistics query: {}", e))?;

    Ok((id, buf))
}
