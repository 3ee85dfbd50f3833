//! SSH binary wire format.
//!
//! Public key blobs are a flat sequence of length-prefixed fields
//! (RFC 4251 section 5):
//!
//! ```text
//! string  := uint32 length || length bytes
//! mpint   := string holding a big-endian two's complement integer
//! ```
//!
//! [`Reader`] walks such a buffer without copying it, [`Writer`] builds one.

pub mod error;

use nom::{IResult, Parser};
use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::Error;

/// Largest field [`Reader`] accepts unless told otherwise.
///
/// A 16384-bit RSA modulus, the largest `ssh-keygen` produces, is 2049 bytes.
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 16 * 1024;

const LENGTH_PREFIX_SIZE: usize = 4;

/// Sequential reader over a wire-format buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a [u8],
    max_field_length: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Reader {
            input,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
        }
    }

    pub fn with_max_field_length(mut self, max_field_length: usize) -> Self {
        self.max_field_length = max_field_length;
        self
    }

    pub fn max_field_length(&self) -> usize {
        self.max_field_length
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Reads one length-prefixed field and returns its contents.
    ///
    /// On error the reader does not advance.
    pub fn read_opaque(&mut self) -> Result<&'a [u8], Error> {
        let (body, length) = parse_length(self.input).map_err(|_| Error::TruncatedData {
            needed: LENGTH_PREFIX_SIZE,
            remaining: self.input.len(),
        })?;
        let length = length as usize;
        let (rest, data) = parse_data(body, length).map_err(|_| Error::TruncatedData {
            needed: length,
            remaining: body.len(),
        })?;
        if length > self.max_field_length {
            return Err(Error::OversizedField {
                length,
                limit: self.max_field_length,
            });
        }

        tracing::trace!(length, remaining = rest.len(), "read opaque field");
        self.input = rest;
        Ok(data)
    }

    /// Reads an `mpint` field.
    ///
    /// The contents are taken as signed big-endian, so a set high bit without
    /// a leading zero byte yields a negative value. An empty field is zero.
    pub fn read_mpint(&mut self) -> Result<BigInt, Error> {
        let data = self.read_opaque()?;
        Ok(BigInt::from_signed_bytes_be(data))
    }
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u32> {
    nom::number::complete::be_u32(input)
}

fn parse_data(input: &[u8], length: usize) -> IResult<&[u8], &[u8]> {
    nom::bytes::complete::take(length).parse(input)
}

/// Builder for wire-format buffers.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    pub fn write_opaque(&mut self, data: &[u8]) -> Result<&mut Self, Error> {
        let length = u32::try_from(data.len()).map_err(|_| Error::OversizedField {
            length: data.len(),
            limit: u32::MAX as usize,
        })?;
        self.buf.extend_from_slice(&length.to_be_bytes());
        self.buf.extend_from_slice(data);
        Ok(self)
    }

    pub fn write_string(&mut self, s: &str) -> Result<&mut Self, Error> {
        self.write_opaque(s.as_bytes())
    }

    /// Writes `n` as an `mpint`: minimal two's complement, zero as an empty field.
    pub fn write_mpint(&mut self, n: &BigInt) -> Result<&mut Self, Error> {
        if n.is_zero() {
            return self.write_opaque(&[]);
        }
        self.write_opaque(&n.to_signed_bytes_be())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
