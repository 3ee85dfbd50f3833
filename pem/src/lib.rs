pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use error::Error;
use regex::Regex;
use sshrsa::decoder::{DecodableFrom, Decoder};

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

// RFC 7468: lines of the base64 body are wrapped at 64 characters
const LINE_WIDTH: usize = 64;

const PEM_PATTERN: &str =
    r"(?s)^\s*-----BEGIN ([A-Z ]+)-----\r?\n(.*?)-----END ([A-Z ]+)-----\s*$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// X.509 SubjectPublicKeyInfo
    PublicKey,
    /// PKCS#1 RSA public key
    RSAPublicKey,
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::PublicKey => write!(f, "{}", PUBLIC_KEY_LABEL),
            Label::RSAPublicKey => write!(f, "{}", RSA_PUBLIC_KEY_LABEL),
        }
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PUBLIC_KEY_LABEL => Ok(Label::PublicKey),
            RSA_PUBLIC_KEY_LABEL => Ok(Label::RSAPublicKey),
            _ => Err(Error::InvalidLabel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem {
    label: Label,
    base64_data: String, // unwrapped
}

impl Pem {
    pub fn from_bytes(label: Label, data: &[u8]) -> Self {
        Pem {
            label,
            base64_data: STANDARD.encode(data),
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn data(&self) -> &str {
        &self.base64_data
    }
}

impl Display for Pem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "-----BEGIN {}-----", self.label)?;
        for chunk in self.base64_data.as_bytes().chunks(LINE_WIDTH) {
            let line = std::str::from_utf8(chunk).map_err(|_| std::fmt::Error)?;
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "-----END {}-----", self.label)
    }
}

impl FromStr for Pem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(PEM_PATTERN).map_err(|_| Error::InvalidEncapsulationBoundary)?;
        let captured = re.captures(s).ok_or(Error::InvalidEncapsulationBoundary)?;
        let (Some(begin), Some(body), Some(end)) = (captured.get(1), captured.get(2), captured.get(3))
        else {
            return Err(Error::InvalidEncapsulationBoundary);
        };
        if begin.as_str() != end.as_str() {
            return Err(Error::LabelMissMatch);
        }
        let label = Label::from_str(begin.as_str())?;
        let base64_data = body
            .as_str()
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join("");

        Ok(Pem { label, base64_data })
    }
}

/// Types that have a PEM representation.
pub trait ToPem {
    type Error;

    fn pem_label(&self) -> Label;

    fn to_pem(&self) -> Result<Pem, Self::Error>;
}

impl DecodableFrom<Pem> for Vec<u8> {}

impl Decoder<Pem, Vec<u8>> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>, Self::Error> {
        STANDARD.decode(self.data()).map_err(Error::Base64Decode)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use sshrsa::decoder::Decoder;
    use std::str::FromStr;

    use crate::{Error, Label, Pem};

    #[rstest(
        input,
        expected,
        case("PUBLIC KEY", Label::PublicKey),
        case("RSA PUBLIC KEY", Label::RSAPublicKey)
    )]
    fn test_label_from_str(input: &str, expected: Label) {
        let label = Label::from_str(input).unwrap();
        assert_eq!(expected, label);
        assert_eq!(input, label.to_string());
    }

    #[test]
    fn test_pem_display_wraps_lines() {
        let pem = Pem::from_bytes(Label::PublicKey, &[0xab; 60]);
        let text = pem.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!("-----BEGIN PUBLIC KEY-----", lines[0]);
        assert_eq!(64, lines[1].len());
        assert_eq!(16, lines[2].len());
        assert_eq!("-----END PUBLIC KEY-----", lines[3]);
        assert_eq!(4, lines.len());
    }

    #[rstest(label, data,
        case(Label::PublicKey, vec![0x30, 0x00]),
        case(Label::RSAPublicKey, (0..=255).collect::<Vec<u8>>()),
    )]
    fn test_pem_roundtrip(label: Label, data: Vec<u8>) {
        let pem = Pem::from_bytes(label, &data);
        let parsed = Pem::from_str(&pem.to_string()).unwrap();
        assert_eq!(pem, parsed);

        let decoded: Vec<u8> = parsed.decode().unwrap();
        assert_eq!(data, decoded);
    }

    const MISMATCHED: &str = "-----BEGIN PUBLIC KEY-----\nMAA=\n-----END RSA PUBLIC KEY-----\n";
    const UNKNOWN_LABEL: &str = "-----BEGIN CERTIFICATE-----\nMAA=\n-----END CERTIFICATE-----\n";
    const NO_END: &str = "-----BEGIN PUBLIC KEY-----\nMAA=\n";

    #[rstest(
        input,
        expected,
        case("", Error::InvalidEncapsulationBoundary),
        case(NO_END, Error::InvalidEncapsulationBoundary),
        case(MISMATCHED, Error::LabelMissMatch),
        case(UNKNOWN_LABEL, Error::InvalidLabel("CERTIFICATE".to_string()))
    )]
    fn test_pem_from_str_with_error(input: &str, expected: Error) {
        assert_eq!(Err(expected), Pem::from_str(input));
    }
}
