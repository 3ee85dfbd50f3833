use der::{Der, Tag, Tlv};
use num_bigint::{BigInt, Sign};
use pem::{Label, Pem, ToPem};
use sshrsa::decoder::{DecodableFrom, Decoder};

use crate::error::{Error, Result};
use crate::key::DecodedKey;

/// DER body of the `rsaEncryption` object identifier, 1.2.840.113549.1.1.1.
pub const RSA_ENCRYPTION_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];

/*
RFC 8017 - RSA Public Key

RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}

RFC 5280 - SubjectPublicKeyInfo

SubjectPublicKeyInfo ::= SEQUENCE {
    algorithm         AlgorithmIdentifier,
    subjectPublicKey  BIT STRING
}
*/

/// RSA public key with both components known to be positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPublicKey {
    modulus: BigInt,         // n
    public_exponent: BigInt, // e
}

impl RSAPublicKey {
    pub fn new(modulus: BigInt, public_exponent: BigInt) -> Result<Self> {
        if modulus.sign() != Sign::Plus {
            return Err(Error::NonPositiveComponent("modulus"));
        }
        if public_exponent.sign() != Sign::Plus {
            return Err(Error::NonPositiveComponent("public exponent"));
        }
        Ok(RSAPublicKey {
            modulus,
            public_exponent,
        })
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigInt {
        &self.public_exponent
    }

    /// Key size in bits (RSA modulus bit length)
    pub fn key_size(&self) -> u64 {
        self.modulus.bits()
    }

    fn to_pkcs1_tlv(&self) -> Tlv {
        Tlv::sequence(vec![
            Tlv::primitive(Tag::Integer, self.modulus.to_signed_bytes_be()),
            Tlv::primitive(Tag::Integer, self.public_exponent.to_signed_bytes_be()),
        ])
    }

    pub fn to_pkcs1_der(&self) -> Vec<u8> {
        self.to_pkcs1_tlv().to_bytes()
    }

    pub fn to_spki_der(&self) -> Vec<u8> {
        let algorithm = Tlv::sequence(vec![
            Tlv::primitive(Tag::ObjectIdentifier, RSA_ENCRYPTION_OID.to_vec()),
            Tlv::null(),
        ]);
        Tlv::sequence(vec![algorithm, Tlv::bit_string(&self.to_pkcs1_der())]).to_bytes()
    }

    pub fn from_pkcs1_der(data: &[u8]) -> Result<Self> {
        let tlv = single_tlv(data)?;
        let elements = tlv
            .as_constructed()
            .filter(|_| tlv.tag() == Tag::Sequence)
            .ok_or_else(|| Error::InvalidStructure("expected Sequence for RSAPublicKey".into()))?;
        if elements.len() != 2 {
            return Err(Error::InvalidStructure(format!(
                "expected 2 elements in RSAPublicKey sequence, got {}",
                elements.len()
            )));
        }

        let get_integer = |idx: usize, field_name: &str| -> Result<BigInt> {
            let element = &elements[idx];
            match element.as_primitive() {
                Some(bytes) if element.tag() == Tag::Integer && !bytes.is_empty() => {
                    Ok(BigInt::from_signed_bytes_be(bytes))
                }
                _ => Err(Error::InvalidStructure(format!(
                    "expected Integer for {}",
                    field_name
                ))),
            }
        };

        RSAPublicKey::new(get_integer(0, "modulus")?, get_integer(1, "publicExponent")?)
    }

    pub fn from_spki_der(data: &[u8]) -> Result<Self> {
        let tlv = single_tlv(data)?;
        let (algorithm, subject_public_key) = match tlv.as_constructed() {
            Some([algorithm, subject_public_key]) if tlv.tag() == Tag::Sequence => {
                (algorithm, subject_public_key)
            }
            _ => {
                return Err(Error::InvalidStructure(
                    "expected Sequence of 2 elements for SubjectPublicKeyInfo".into(),
                ));
            }
        };

        let oid = algorithm
            .as_constructed()
            .and_then(|params| params.first())
            .filter(|oid| oid.tag() == Tag::ObjectIdentifier)
            .and_then(Tlv::as_primitive)
            .ok_or_else(|| Error::InvalidStructure("expected AlgorithmIdentifier".into()))?;
        if oid != RSA_ENCRYPTION_OID {
            return Err(Error::InvalidStructure(
                "algorithm is not rsaEncryption".into(),
            ));
        }

        match subject_public_key.as_primitive() {
            Some([0x00, key @ ..]) if subject_public_key.tag() == Tag::BitString => {
                RSAPublicKey::from_pkcs1_der(key)
            }
            _ => Err(Error::InvalidStructure(
                "expected BitString without unused bits for subjectPublicKey".into(),
            )),
        }
    }
}

fn single_tlv(data: &[u8]) -> Result<Tlv> {
    let der: Der = data.decode()?;
    match der.elements() {
        [tlv] => Ok(tlv.clone()),
        elements => Err(Error::InvalidStructure(format!(
            "expected a single DER element, got {}",
            elements.len()
        ))),
    }
}

impl TryFrom<&DecodedKey> for RSAPublicKey {
    type Error = Error;

    fn try_from(key: &DecodedKey) -> Result<Self> {
        RSAPublicKey::new(key.modulus.clone(), key.exponent.clone())
    }
}

impl From<&RSAPublicKey> for DecodedKey {
    fn from(key: &RSAPublicKey) -> Self {
        DecodedKey::new(key.public_exponent.clone(), key.modulus.clone())
    }
}

impl DecodableFrom<DecodedKey> for RSAPublicKey {}

impl Decoder<DecodedKey, RSAPublicKey> for DecodedKey {
    type Error = Error;

    fn decode(&self) -> Result<RSAPublicKey> {
        RSAPublicKey::try_from(self)
    }
}

// RSAPublicKey -> PEM encoder, SubjectPublicKeyInfo body
impl ToPem for RSAPublicKey {
    type Error = Error;

    fn pem_label(&self) -> Label {
        Label::PublicKey
    }

    fn to_pem(&self) -> Result<Pem> {
        Ok(Pem::from_bytes(self.pem_label(), &self.to_spki_der()))
    }
}
