use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error(
        "fingerprint header width changed mid-file at line {line}: \
         first header is {expected} characters, new header is {found}"
    )]
    HeaderMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "inconsistent fingerprint batch: {0}\n\
         Check the tool output files for missing results; a crashed \
         invocation for one structure leaves its fingerprint incomplete"
    )]
    InconsistentBatch(String),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}
