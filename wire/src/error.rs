use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The buffer ends inside a length prefix or inside the bytes it announces.
    #[error("truncated data: need {needed} bytes, {remaining} remaining")]
    TruncatedData { needed: usize, remaining: usize },

    /// A field is longer than the reader (or the 32-bit prefix) allows.
    #[error("field of {length} bytes exceeds the limit of {limit} bytes")]
    OversizedField { length: usize, limit: usize },
}
