//! # sshrsa
//!
//! Core conversion traits for the sshrsa OpenSSH RSA public key toolkit.
//!
//! Every crate in the workspace moves data one step along this chain:
//! ```text
//! &str → Envelope → Vec<u8> (wire blob) → DecodedKey → RSAPublicKey → DER / PEM
//! ```
//!
//! Forward steps implement [`decoder::Decoder`], backward steps implement
//! [`encoder::Encoder`]. The marker traits [`decoder::DecodableFrom`] and
//! [`encoder::EncodableTo`] pin down which pairs of types may be converted,
//! so an unsupported conversion is a compile error rather than a runtime one.
//!
//! ```ignore
//! use sshrsa::decoder::Decoder;
//! use pubkey::DecodedKey;
//!
//! let line = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAAAAQE= user@host";
//! let key: DecodedKey = line.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
