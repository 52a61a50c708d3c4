//! dnsmasq statistics reader.

use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use masqstat_domain::{DnsmasqResult, ScrapeError, ServerStats};

use super::answers;
use super::message::{self, STAT_QUERIES};
use super::transport::DnsTransport;

/// Reads all known dnsmasq statistics in a single exchange.
///
/// One failed read yields one failed collection; there is no retry here and
/// no partial result.
pub struct DnsmasqReader<T> {
    transport: T,
    address: String,
}

impl<T> std::fmt::Debug for DnsmasqReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsmasqReader")
            .field("address", &self.address)
            .finish()
    }
}

impl<T: DnsTransport> DnsmasqReader<T> {
    pub fn new(transport: T, address: impl Into<String>) -> Self {
        Self {
            transport,
            address: address.into(),
        }
    }

    /// Address of the daemon, as configured. Used as the `server` label on
    /// every metric this reader produces.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Query the daemon for all known statistics.
    pub fn read(&self) -> Result<DnsmasqResult, ScrapeError> {
        let (id, query) = message::build_stats_query().map_err(|reason| self.upstream(reason))?;
        let response_bytes = self.transport.exchange(&query)?;

        let response = Message::from_vec(&response_bytes)
            .map_err(|e| self.upstream(format!("failed to decode response: {}", e)))?;

        if response.id() != id {
            return Err(self.upstream(format!(
                "response id {} does not match query id {}",
                response.id(),
                id
            )));
        }

        // Make sure the questions we sent were included in the response
        if response.queries().len() != STAT_QUERIES.len() {
            return Err(ScrapeError::QuestionCount {
                server: self.address.clone(),
                expected: STAT_QUERIES.len(),
                actual: response.queries().len(),
            });
        }

        // Make sure the number of answers matches the number of questions
        if response.answers().len() != response.queries().len() {
            return Err(ScrapeError::AnswerCount {
                server: self.address.clone(),
                expected: response.queries().len(),
                actual: response.answers().len(),
            });
        }

        let answers = response.answers();
        Ok(DnsmasqResult {
            cache_size: self.counter(answers, message::CACHE_SIZE, "cache size")?,
            cache_insertions: self.counter(answers, message::INSERTIONS, "cache insertions")?,
            cache_evictions: self.counter(answers, message::EVICTIONS, "cache evictions")?,
            cache_misses: self.counter(answers, message::MISSES, "cache misses")?,
            cache_hits: self.counter(answers, message::HITS, "cache hits")?,
            authoritative: self.counter(answers, message::AUTH, "authoritative")?,
            servers: self.servers(answers)?,
        })
    }

    fn counter(
        &self,
        answers: &[Record],
        question: &str,
        field: &'static str,
    ) -> Result<u64, ScrapeError> {
        let record = find_answer(answers, question).ok_or_else(|| ScrapeError::AnswerParse {
            field,
            reason: format!("no answer for {}", question),
        })?;
        answers::parse_counter(record)
            .map_err(|reason| ScrapeError::AnswerParse { field, reason })
    }

    fn servers(&self, answers_list: &[Record]) -> Result<Vec<ServerStats>, ScrapeError> {
        let field = "servers";
        let record =
            find_answer(answers_list, message::SERVERS).ok_or_else(|| ScrapeError::AnswerParse {
                field,
                reason: format!("no answer for {}", message::SERVERS),
            })?;
        answers::parse_server_list(record)
            .map_err(|reason| ScrapeError::AnswerParse { field, reason })
    }

    fn upstream(&self, reason: String) -> ScrapeError {
        ScrapeError::Upstream {
            server: self.address.clone(),
            reason,
        }
    }
}

/// Answers are matched to their question by owner name rather than by
/// position. dnsmasq happens to answer in question order, but nothing in the
/// protocol guarantees it.
fn find_answer<'a>(answers: &'a [Record], question: &str) -> Option<&'a Record> {
    answers.iter().find(|record| {
        record
            .name()
            .to_ascii()
            .trim_end_matches('.')
            .eq_ignore_ascii_case(question.trim_end_matches('.'))
    })
}
