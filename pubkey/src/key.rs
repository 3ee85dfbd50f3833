use std::str::FromStr;

use num_bigint::BigInt;
use openssh::Envelope;
use serde::{Serialize, Serializer};
use sshrsa::decoder::{DecodableFrom, Decoder};
use sshrsa::encoder::{EncodableTo, Encoder};
use wire::{DEFAULT_MAX_FIELD_LENGTH, Reader, Writer};

use crate::error::{Error, Result};

/// The only key type this crate accepts, both on the text line and inside the blob.
pub const SSH_RSA: &str = openssh::KEY_TYPE;

/*
RFC 4253 section 6.6

string    "ssh-rsa"
mpint     e
mpint     n
*/

/// Components of an `ssh-rsa` public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedKey {
    pub key_type: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub exponent: BigInt,
    #[serde(serialize_with = "serialize_decimal")]
    pub modulus: BigInt,
}

fn serialize_decimal<S>(n: &BigInt, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&n.to_string())
}

impl DecodedKey {
    pub fn new(exponent: BigInt, modulus: BigInt) -> Self {
        DecodedKey {
            key_type: SSH_RSA.to_string(),
            exponent,
            modulus,
        }
    }

    pub fn modulus_bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Wire encoding of the key, the blob that is base64 encoded on the text line.
    pub fn to_blob(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer
            .write_string(&self.key_type)?
            .write_mpint(&self.exponent)?
            .write_mpint(&self.modulus)?;
        Ok(writer.into_bytes())
    }

    /// Formats the key as an `id_rsa.pub` line.
    pub fn to_openssh(&self, comment: Option<&str>) -> Result<String> {
        let envelope = Envelope::from_bytes(&self.to_blob()?, comment.map(str::to_string));
        Ok(envelope.to_string())
    }
}

/// Decoding configuration.
///
/// ```
/// use pubkey::KeyParser;
///
/// let parser = KeyParser::new().with_max_field_length(4096);
/// assert!(parser.parse("ssh-dss AAAA comment").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParser {
    max_field_length: usize,
}

impl Default for KeyParser {
    fn default() -> Self {
        KeyParser {
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
        }
    }
}

impl KeyParser {
    pub fn new() -> Self {
        KeyParser::default()
    }

    /// Largest opaque field accepted; longer fields fail with
    /// [`Error::OversizedField`].
    pub fn with_max_field_length(mut self, max_field_length: usize) -> Self {
        self.max_field_length = max_field_length;
        self
    }

    pub fn max_field_length(&self) -> usize {
        self.max_field_length
    }

    /// Decodes a full `ssh-rsa <base64> [comment]` line.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedEnvelope`] if the text is not an `ssh-rsa` line
    /// - [`Error::InvalidEncoding`] if the payload is not standard base64
    /// - [`Error::TruncatedData`] if a field runs past the end of the blob
    /// - [`Error::OversizedField`] if a field is longer than the configured limit
    /// - [`Error::UnsupportedKeyType`] if the blob is not an `ssh-rsa` key
    pub fn parse(&self, key_text: &str) -> Result<DecodedKey> {
        let envelope = Envelope::from_str(key_text)?;
        self.parse_envelope(&envelope)
    }

    pub fn parse_envelope(&self, envelope: &Envelope) -> Result<DecodedKey> {
        let blob = Decoder::<Envelope, Vec<u8>>::decode(envelope)?;
        self.parse_blob(&blob)
    }

    /// Decodes a raw wire blob. Bytes after the modulus are ignored.
    pub fn parse_blob(&self, blob: &[u8]) -> Result<DecodedKey> {
        let mut reader = Reader::new(blob).with_max_field_length(self.max_field_length);

        let key_type = reader.read_opaque()?;
        let exponent = reader.read_mpint()?;
        let modulus = reader.read_mpint()?;

        if key_type != SSH_RSA.as_bytes() {
            return Err(Error::UnsupportedKeyType(ascii_lossy(key_type)));
        }

        tracing::debug!(
            modulus_bits = modulus.bits(),
            %exponent,
            trailing = reader.remaining().len(),
            "decoded ssh-rsa public key"
        );

        Ok(DecodedKey {
            key_type: SSH_RSA.to_string(),
            exponent,
            modulus,
        })
    }
}

/// Decodes an OpenSSH `ssh-rsa` public key line with the default [`KeyParser`].
///
/// ```
/// let err = pubkey::parse("ssh-rsa !!!not-base64!!! comment").unwrap_err();
/// assert!(matches!(err, pubkey::Error::InvalidEncoding(_)));
/// ```
pub fn parse(key_text: &str) -> Result<DecodedKey> {
    KeyParser::default().parse(key_text)
}

// Bytes outside ASCII become U+FFFD.
fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii() {
                b as char
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect()
}

impl DecodableFrom<Envelope> for DecodedKey {}

impl Decoder<Envelope, DecodedKey> for Envelope {
    type Error = Error;

    fn decode(&self) -> Result<DecodedKey> {
        KeyParser::default().parse_envelope(self)
    }
}

impl DecodableFrom<&str> for DecodedKey {}

impl Decoder<&str, DecodedKey> for &str {
    type Error = Error;

    fn decode(&self) -> Result<DecodedKey> {
        parse(self)
    }
}

impl EncodableTo<DecodedKey> for Envelope {}

impl Encoder<DecodedKey, Envelope> for DecodedKey {
    type Error = Error;

    fn encode(&self) -> Result<Envelope> {
        Ok(Envelope::from_bytes(&self.to_blob()?, None))
    }
}
