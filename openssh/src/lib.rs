//! The single-line OpenSSH public key format written by `ssh-keygen`:
//!
//! ```text
//! ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQDj... user@host
//! ```
//!
//! [`Envelope`] validates that shape and carries the base64 payload. Decoding
//! an envelope yields the raw wire blob; interpreting that blob is the job of
//! the `wire` and `pubkey` crates.

pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use error::Error;
use regex::Regex;
use sshrsa::decoder::{DecodableFrom, Decoder};

/// Algorithm name leading every accepted line.
pub const KEY_TYPE: &str = "ssh-rsa";

// Anchored to the whole input: no leading text, the payload is a single run of
// non-whitespace, and it must be followed by a space or a newline. Anything
// after that separator, newlines included, is the comment.
const ENVELOPE_PATTERN: &str = r"^ssh-rsa (\S+)[ \n]((?s:.*))$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    base64_data: String,
    comment: Option<String>,
}

impl Envelope {
    pub fn new(base64_data: String, comment: Option<String>) -> Self {
        Envelope {
            base64_data,
            comment: normalize_comment(comment),
        }
    }

    /// Wraps a raw wire blob, base64 encoding it.
    pub fn from_bytes(blob: &[u8], comment: Option<String>) -> Self {
        Envelope {
            base64_data: STANDARD.encode(blob),
            comment: normalize_comment(comment),
        }
    }

    /// The base64 payload as it appears on the line.
    pub fn data(&self) -> &str {
        &self.base64_data
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

// Same shape FromStr produces: no trailing newlines, empty means absent.
fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim_end_matches('\n').to_string())
        .filter(|c| !c.is_empty())
}

impl FromStr for Envelope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(ENVELOPE_PATTERN).map_err(|_| Error::MalformedEnvelope)?;
        let captured = re.captures(s).ok_or(Error::MalformedEnvelope)?;
        let payload = captured.get(1).ok_or(Error::MalformedEnvelope)?;

        let comment = captured
            .get(2)
            .map(|c| c.as_str().trim_end_matches('\n'))
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Envelope {
            base64_data: payload.as_str().to_string(),
            comment,
        })
    }
}

/// Writes the line as it appears in an `id_rsa.pub` file, newline included,
/// so the output is accepted by [`Envelope::from_str`] with or without a comment.
impl Display for Envelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", KEY_TYPE, self.base64_data)?;
        if let Some(comment) = &self.comment {
            write!(f, " {}", comment)?;
        }
        writeln!(f)
    }
}

impl DecodableFrom<Envelope> for Vec<u8> {}

impl Decoder<Envelope, Vec<u8>> for Envelope {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>, Self::Error> {
        STANDARD
            .decode(self.data())
            .map_err(Error::InvalidEncoding)
    }
}

impl DecodableFrom<String> for Envelope {}

impl Decoder<String, Envelope> for String {
    type Error = Error;

    fn decode(&self) -> Result<Envelope, Self::Error> {
        Envelope::from_str(self)
    }
}

impl DecodableFrom<&str> for Envelope {}

impl Decoder<&str, Envelope> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Envelope, Self::Error> {
        Envelope::from_str(self)
    }
}
