//! Backward conversions, the mirror image of [`crate::decoder`].

/// Converts `self` (of type `T`) into its encoded form `E`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// Error returned when `self` cannot be encoded.
    type Error;

    /// Encodes `self` into `E`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when `self` holds a value that `E` cannot represent.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker for encoded types that may be produced from `T`.
pub trait EncodableTo<T> {}
