//! Forward conversions.
//!
//! A `Decoder<T, D>` is implemented on the source type `T` and yields `D`.
//! The destination must opt in through `DecodableFrom<T>`:
//!
//! ```no_run
//! use sshrsa::decoder::{DecodableFrom, Decoder};
//!
//! struct Blob(Vec<u8>);
//! struct KeyType(String);
//!
//! #[derive(Debug)]
//! struct NotAscii;
//!
//! impl DecodableFrom<Blob> for KeyType {}
//!
//! impl Decoder<Blob, KeyType> for Blob {
//!     type Error = NotAscii;
//!
//!     fn decode(&self) -> Result<KeyType, Self::Error> {
//!         if !self.0.is_ascii() {
//!             return Err(NotAscii);
//!         }
//!         Ok(KeyType(String::from_utf8_lossy(&self.0).into_owned()))
//!     }
//! }
//! ```

/// Converts `self` (of type `T`) into `D`.
///
/// Implementations must be pure: decoding the same value twice yields equal
/// results and leaves no state behind.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// Error returned when the source cannot be converted.
    type Error;

    /// Decodes `self` into `D`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when `self` is not a valid encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker for destination types that may be decoded from `T`.
pub trait DecodableFrom<T> {}
