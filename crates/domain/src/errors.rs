use thiserror::Error;

/// Failures surfaced by a single collection cycle.
///
/// Structural failures (wrong envelope shape, unreadable source) abort the
/// whole read and are reported through this type. Failures limited to a
/// single field are handled where they occur: the value is logged and
/// skipped, the rest of the read proceeds.
#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("error calling upstream {server}: {reason}")]
    Upstream { server: String, reason: String },

    #[error("unexpected number of questions from {server} ({expected} expected, {actual} received)")]
    QuestionCount {
        server: String,
        expected: usize,
        actual: usize,
    },

    #[error("unexpected number of answers from {server} ({expected} expected, {actual} received)")]
    AnswerCount {
        server: String,
        expected: usize,
        actual: usize,
    },

    #[error("error parsing answer for {field}: {reason}")]
    AnswerParse { field: &'static str, reason: String },

    #[error("unexpected header line format: {0}")]
    Format(String),

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },
}
