use base64::DecodeError;
use thiserror::Error;

/// Errors raised while reading the textual `ssh-rsa <base64> [comment]` line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The line is not `ssh-rsa`, one space, a payload, then a space or newline.
    #[error("malformed OpenSSH public key envelope")]
    MalformedEnvelope,

    /// The payload is not valid standard (padded) base64.
    #[error("base64 decode: {0}")]
    InvalidEncoding(DecodeError),
}
