//! # pubkey
//!
//! Decodes the single-line OpenSSH RSA public key format into its type tag,
//! public exponent and modulus, and turns those into an [`RSAPublicKey`]
//! that can be exported as PKCS#1 or X.509 `SubjectPublicKeyInfo`.
//!
//! ```no_run
//! use pubkey::{RSAPublicKey, parse};
//!
//! let line = std::fs::read_to_string("id_rsa.pub")?;
//! let key = parse(&line)?;
//! println!("{} bits, e = {}", key.modulus_bits(), key.exponent);
//!
//! let rsa = RSAPublicKey::try_from(&key)?;
//! let spki: Vec<u8> = rsa.to_spki_der();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding is pure: no I/O, no shared state, and the same input always gives
//! the same result.

#![forbid(unsafe_code)]

pub mod error;
mod key;
mod rsa;
#[cfg(test)]
mod testdata;

pub use error::{Error, Result};
pub use key::{DecodedKey, KeyParser, SSH_RSA, parse};
pub use rsa::{RSA_ENCRYPTION_OID, RSAPublicKey};
