use std::fmt::Display;
use std::fs;
use std::io::{self, Read};

use base64::{Engine, engine::general_purpose::STANDARD_NO_PAD};
use openssh::Envelope;
use pubkey::{DecodedKey, KeyParser};
use sha2::{Digest, Sha256, Sha512};
use sshrsa::decoder::Decoder;

use crate::error::Result;

/// A decoded key together with the line and blob it came from.
pub(crate) struct LoadedKey {
    pub(crate) envelope: Envelope,
    pub(crate) blob: Vec<u8>,
    pub(crate) key: DecodedKey,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum FingerprintAlgorithm {
    /// SHA256 fingerprint (default)
    Sha256,
    /// SHA512 fingerprint
    Sha512,
}

impl Display for FingerprintAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FingerprintAlgorithm::Sha256 => write!(f, "SHA256"),
            FingerprintAlgorithm::Sha512 => write!(f, "SHA512"),
        }
    }
}

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read an OpenSSH public key line from a file or stdin and decode it.
pub(crate) fn load_key(file: Option<&str>, max_field_length: Option<usize>) -> Result<LoadedKey> {
    let contents = String::from_utf8(read_input(file)?)?;

    let mut parser = KeyParser::new();
    if let Some(limit) = max_field_length {
        parser = parser.with_max_field_length(limit);
    }

    let envelope: Envelope = contents.parse().map_err(pubkey::Error::from)?;
    let blob = Decoder::<Envelope, Vec<u8>>::decode(&envelope).map_err(pubkey::Error::from)?;
    let key = parser.parse_blob(&blob)?;
    tracing::debug!(
        blob_len = blob.len(),
        comment = envelope.comment(),
        "loaded public key"
    );

    Ok(LoadedKey {
        envelope,
        blob,
        key,
    })
}

/// Fingerprint of a wire blob as printed by `ssh-keygen -l`: `SHA256:<base64>`
/// with the padding stripped.
pub(crate) fn calculate_fingerprint(blob: &[u8], alg: FingerprintAlgorithm) -> String {
    let digest = match alg {
        FingerprintAlgorithm::Sha256 => Sha256::digest(blob).to_vec(),
        FingerprintAlgorithm::Sha512 => Sha512::digest(blob).to_vec(),
    };
    format!("{}:{}", alg, STANDARD_NO_PAD.encode(digest))
}

/// Format binary data as hexadecimal dump
///
/// 16 bytes per line, `xxd` style: offset, hex bytes, ASCII column.
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", offset * BYTES_PER_LINE));

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(byte) => output.push_str(&format!("{:02x} ", byte)),
                None => output.push_str("   "),
            }
            if i == 7 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() || *byte == b' ' {
                output.push(*byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}
