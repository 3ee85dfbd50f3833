use base64::DecodeError;
use thiserror::Error;

/// Why a key could not be decoded or converted.
///
/// The first five variants follow the decoding pipeline in order: text
/// envelope, base64, wire fields, key type. None of them is retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("malformed OpenSSH public key envelope")]
    MalformedEnvelope,

    #[error("invalid base64 payload: {0}")]
    InvalidEncoding(DecodeError),

    #[error("truncated data: need {needed} bytes, {remaining} remaining")]
    TruncatedData { needed: usize, remaining: usize },

    #[error("field of {length} bytes exceeds the limit of {limit} bytes")]
    OversizedField { length: usize, limit: usize },

    #[error("wrong public key type: {0}")]
    UnsupportedKeyType(String),

    #[error("{0} must be positive")]
    NonPositiveComponent(&'static str),

    #[error("DER: {0}")]
    Der(#[from] der::error::Error),

    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

impl From<openssh::error::Error> for Error {
    fn from(err: openssh::error::Error) -> Self {
        match err {
            openssh::error::Error::MalformedEnvelope => Error::MalformedEnvelope,
            openssh::error::Error::InvalidEncoding(e) => Error::InvalidEncoding(e),
        }
    }
}

impl From<wire::error::Error> for Error {
    fn from(err: wire::error::Error) -> Self {
        match err {
            wire::error::Error::TruncatedData { needed, remaining } => {
                Error::TruncatedData { needed, remaining }
            }
            wire::error::Error::OversizedField { length, limit } => {
                Error::OversizedField { length, limit }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
