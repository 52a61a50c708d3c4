//! Shared test doubles for the statistics exchange.
#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use masqstat_domain::ScrapeError;
use masqstat_infrastructure::dns::DnsTransport;

/// Canned exchange: decodes the request, echoes its questions back (minus
/// `drop_questions`) and attaches the prepared answers.
pub struct MockTransport {
    pub answers: Vec<Record>,
    pub drop_questions: usize,
    pub fail_with: Option<String>,
}

impl MockTransport {
    pub fn answering(answers: Vec<Record>) -> Self {
        Self {
            answers,
            drop_questions: 0,
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            answers: Vec::new(),
            drop_questions: 0,
            fail_with: Some(reason.to_string()),
        }
    }
}

impl DnsTransport for MockTransport {
    fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, ScrapeError> {
        if let Some(reason) = &self.fail_with {
            return Err(ScrapeError::Upstream {
                server: "mock".to_string(),
                reason: reason.clone(),
            });
        }

        let request = Message::from_vec(message_bytes).expect("request should decode");
        let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);

        let keep = request.queries().len().saturating_sub(self.drop_questions);
        for query in &request.queries()[..keep] {
            response.add_query(query.clone());
        }
        for answer in &self.answers {
            response.add_answer(answer.clone());
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).expect("response should encode");
        Ok(buf)
    }
}

pub fn txt(name: &str, strings: &[&str]) -> Record {
    Record::from_rdata(
        Name::from_ascii(name).unwrap(),
        0,
        RData::TXT(TXT::new(strings.iter().map(|s| s.to_string()).collect())),
    )
}

/// A well-formed seven-answer response body.
pub fn stock_answers() -> Vec<Record> {
    vec![
        txt("cachesize.bind.", &["1000"]),
        txt("insertions.bind.", &["1001"]),
        txt("evictions.bind.", &["1002"]),
        txt("misses.bind.", &["1003"]),
        txt("hits.bind.", &["1004"]),
        txt("auth.bind.", &["1005"]),
        txt(
            "servers.bind.",
            &["1.1.1.1:53 1000 500", "8.8.8.8:53 1001 501"],
        ),
    ]
}
