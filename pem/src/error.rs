use base64::DecodeError;
use thiserror::Error;

/// Errors raised while reading PEM armor (RFC 7468).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Missing or malformed `-----BEGIN ...-----` / `-----END ...-----` lines
    #[error("invalid encapsulation boundary")]
    InvalidEncapsulationBoundary,

    /// The label is not one this crate reads or writes
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    /// The BEGIN and END labels differ
    #[error("label doesn't match")]
    LabelMissMatch,

    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),
}
