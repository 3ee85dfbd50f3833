//! Just enough DER (X.690) to carry RSA public keys in their PKCS#1 and
//! X.509 `SubjectPublicKeyInfo` forms: tag, definite length, value.

pub mod error;

use nom::{IResult, Parser, error::ErrorKind};
use sshrsa::decoder::{DecodableFrom, Decoder};
use sshrsa::encoder::{EncodableTo, Encoder};

use crate::error::Error;

const CONSTRUCTED: u8 = 0x20;
const LONG_FORM: u8 = 0x80;
const MAX_LENGTH_OCTETS: u8 = 8;
const MAX_DEPTH: usize = 32;

/// A sequence of top-level TLVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.elements.iter().flat_map(Tlv::to_bytes).collect()
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        let mut elements = Vec::new();
        let mut input = *self;
        while !input.is_empty() {
            let (rest, tlv) = Tlv::parse(input)?;
            input = rest;
            elements.push(tlv);
        }
        if elements.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Der { elements })
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        self.as_slice().decode()
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.to_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Sequence,
    Unimplemented(u8),
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Tag::Integer,
            0x03 => Tag::BitString,
            0x04 => Tag::OctetString,
            0x05 => Tag::Null,
            0x06 => Tag::ObjectIdentifier,
            0x30 => Tag::Sequence,
            _ => Tag::Unimplemented(value),
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Integer => 0x02,
            Tag::BitString => 0x03,
            Tag::OctetString => 0x04,
            Tag::Null => 0x05,
            Tag::ObjectIdentifier => 0x06,
            Tag::Sequence => 0x30,
            Tag::Unimplemented(value) => value,
        }
    }
}

impl Tag {
    pub fn is_constructed(self) -> bool {
        u8::from(self) & CONSTRUCTED == CONSTRUCTED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Constructed(Vec<Tlv>),
    Primitive(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

impl Tlv {
    pub fn primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            value: Value::Primitive(data),
        }
    }

    pub fn sequence(children: Vec<Tlv>) -> Self {
        Tlv {
            tag: Tag::Sequence,
            value: Value::Constructed(children),
        }
    }

    pub fn null() -> Self {
        Tlv::primitive(Tag::Null, Vec::new())
    }

    /// BIT STRING with no unused bits wrapping `data`.
    pub fn bit_string(data: &[u8]) -> Self {
        let mut content = Vec::with_capacity(data.len() + 1);
        content.push(0x00);
        content.extend_from_slice(data);
        Tlv::primitive(Tag::BitString, content)
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn as_primitive(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Primitive(data) => Some(data),
            Value::Constructed(_) => None,
        }
    }

    pub fn as_constructed(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Constructed(children) => Some(children),
            Value::Primitive(_) => None,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Tlv> {
        Self::parse_nested(input, 0)
    }

    fn parse_nested(input: &[u8], depth: usize) -> IResult<&[u8], Tlv> {
        if depth > MAX_DEPTH {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                ErrorKind::TooLarge,
            )));
        }
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = nom::bytes::complete::take(length).parse(input)?;

        if !tag.is_constructed() {
            return Ok((input, Tlv::primitive(tag, data.to_vec())));
        }

        let mut children = Vec::new();
        let mut data = data;
        while !data.is_empty() {
            let (rest, child) = Self::parse_nested(data, depth + 1)?;
            data = rest;
            children.push(child);
        }
        Ok((
            input,
            Tlv {
                tag,
                value: Value::Constructed(children),
            },
        ))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let content = match &self.value {
            Value::Primitive(data) => data.clone(),
            Value::Constructed(children) => children.iter().flat_map(Tlv::to_bytes).collect(),
        };
        let mut out = vec![u8::from(self.tag)];
        out.extend(encode_length(content.len()));
        out.extend(content);
        out
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, n) = nom::number::complete::be_u8(input)?;
    Ok((input, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize> {
    let (rest, n) = nom::number::complete::be_u8(input)?;
    if n & LONG_FORM == 0 {
        return Ok((rest, n as usize));
    }
    // long form: the low 7 bits count the length octets that follow
    let octets = n & !LONG_FORM;
    if octets == 0 {
        // indefinite length is BER only
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::LengthValue,
        )));
    }
    if octets > MAX_LENGTH_OCTETS {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::TooLarge,
        )));
    }
    let (rest, bs) = nom::bytes::complete::take(octets).parse(rest)?;
    let length = bs.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let length = usize::try_from(length).map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, ErrorKind::TooLarge))
    })?;
    Ok((rest, length))
}

fn encode_length(length: usize) -> Vec<u8> {
    if length < LONG_FORM as usize {
        return vec![length as u8];
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let mut out = vec![LONG_FORM | (bytes.len() - skip) as u8];
    out.extend_from_slice(&bytes[skip..]);
    out
}

#[cfg(test)]
mod tests {
    use nom::error::ErrorKind;
    use rstest::rstest;
    use sshrsa::decoder::Decoder;

    use crate::error::Error;
    use crate::{Der, Tag, Tlv, Value, encode_length, parse_length, parse_tag};

    #[rstest(input, expected,
        case(vec![0x02], Tag::Integer),
        case(vec![0x03, 0x01], Tag::BitString),
        case(vec![0x06], Tag::ObjectIdentifier),
        case(vec![0x30, 0x01], Tag::Sequence),
        case(vec![0x31], Tag::Unimplemented(0x31)),
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let (_, actual) = parse_tag(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(vec![0x00], 0),
        case(vec![0x7f], 0x7f),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x01, 0x0f], 0x010f),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: usize) {
        let (rest, actual) = parse_length(&input).unwrap();
        assert!(rest.is_empty());
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(vec![0x80], ErrorKind::LengthValue),
        case(vec![0x89, 0, 0, 0, 0, 0, 0, 0, 0, 1], ErrorKind::TooLarge),
    )]
    fn test_parse_length_with_error(input: Vec<u8>, expected: ErrorKind) {
        let err = parse_length(&input).unwrap_err();
        assert_eq!(Error::Parser(expected), Error::from(err));
    }

    #[rstest(length, expected,
        case(0, vec![0x00]),
        case(0x7f, vec![0x7f]),
        case(0x80, vec![0x81, 0x80]),
        case(0x010a, vec![0x82, 0x01, 0x0a]),
        case(0x010000, vec![0x83, 0x01, 0x00, 0x00]),
    )]
    fn test_encode_length(length: usize, expected: Vec<u8>) {
        assert_eq!(expected, encode_length(length));
        let (_, parsed) = parse_length(&expected).unwrap();
        assert_eq!(length, parsed);
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x01], Tlv::primitive(Tag::Integer, vec![0x01])),
        case(vec![0x02, 0x03, 0x01, 0x00, 0x01], Tlv::primitive(Tag::Integer, vec![0x01, 0x00, 0x01])),
        case(vec![0x05, 0x00], Tlv::null()),
        case(vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], Tlv::primitive(Tag::ObjectIdentifier, vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01])),
        case(vec![0x03, 0x03, 0x00, 0x05, 0x00], Tlv::bit_string(&[0x05, 0x00])),
    )]
    fn test_tlv_parse_primitive(input: Vec<u8>, expected: Tlv) {
        let (rest, actual) = Tlv::parse(&input).unwrap();
        assert!(rest.is_empty());
        assert_eq!(expected, actual);
        assert_eq!(input, actual.to_bytes());
    }

    #[test]
    fn test_tlv_parse_structured() {
        // SEQUENCE { SEQUENCE { OID 1.2.840.113549.1.1.1, NULL }, INTEGER 7 }
        let input = vec![
            0x30, 0x12, 0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01,
            0x01, 0x05, 0x00, 0x02, 0x01, 0x07,
        ];
        let (_, actual) = Tlv::parse(&input).unwrap();

        assert_eq!(Tag::Sequence, actual.tag());
        let children = actual.as_constructed().unwrap();
        assert_eq!(2, children.len());
        assert_eq!(Tag::Sequence, children[0].tag());
        assert_eq!(Some(&[0x07u8][..]), children[1].as_primitive());
        match children[0].value() {
            Value::Constructed(inner) => {
                assert_eq!(Tag::ObjectIdentifier, inner[0].tag());
                assert_eq!(Tlv::null(), inner[1]);
            }
            Value::Primitive(_) => panic!("expected a constructed algorithm identifier"),
        }
        assert_eq!(input, actual.to_bytes());
    }

    #[test]
    fn test_sequence_long_form_roundtrip() {
        let integer = Tlv::primitive(Tag::Integer, vec![0x41; 300]);
        let seq = Tlv::sequence(vec![integer.clone(), Tlv::null()]);
        let bytes = seq.to_bytes();
        assert_eq!(&[0x30u8, 0x82, 0x01, 0x32, 0x02, 0x82, 0x01, 0x2c], &bytes[..8]);

        let der: Der = bytes.decode().unwrap();
        assert_eq!(&[seq], der.elements());
    }

    #[rstest(input, expected,
        case(vec![], Error::Empty),
        case(vec![0x02, 0x05, 0x01], Error::Parser(ErrorKind::Eof)),
        case(vec![0x30, 0x03, 0x02, 0x02, 0x01], Error::Parser(ErrorKind::Eof)),
    )]
    fn test_der_decode_with_error(input: Vec<u8>, expected: Error) {
        let result: Result<Der, Error> = input.decode();
        assert_eq!(Err(expected), result);
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let mut input = vec![0x05, 0x00];
        for _ in 0..40 {
            let mut outer = vec![0x30, input.len() as u8];
            outer.extend(input);
            input = outer;
        }
        // each level adds two bytes, so every length stays in short form
        assert!(input.len() < 0x80 + 2);
        let result: Result<Der, Error> = input.decode();
        assert_eq!(Err(Error::Parser(ErrorKind::TooLarge)), result);
    }
}
