use thiserror::Error;

/// Result type for E2E protection operations.
pub type E2EResult<T> = Result<T, E2EError>;

/// Precondition violations surfaced by `protect`/`check`.
///
/// All three are programmer errors: they describe a call whose inputs
/// could never be honored, never the outcome of a CRC/counter/data-ID
/// disagreement between sender and receiver. A failed integrity check
/// is reported as `Ok(false)` from `check`, not as one of these.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum E2EError {
    /// `buffer` is shorter than `offset + header_size`.
    #[error("buffer of {actual} bytes is too small for a {required}-byte header at offset {offset}")]
    BufferTooSmall {
        required: usize,
        offset: usize,
        actual: usize,
    },

    /// `length` is smaller than the header size, larger than the
    /// buffer, or does not fit the profile's in-frame length field.
    #[error("length {length} is invalid for this profile (minimum {minimum}, buffer holds {buffer_len} bytes)")]
    InvalidLength {
        length: usize,
        minimum: usize,
        buffer_len: usize,
    },
}
