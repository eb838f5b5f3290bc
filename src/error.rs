use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Encoding
    #[error("data too long: {bits} bits exceed the largest capacity of {capacity} bits")]
    DataTooLong { bits: usize, capacity: usize },
    #[error("code length overflow ({bits} > {capacity})")]
    CapacityOverflow { bits: usize, capacity: usize },
    #[error("invalid version: {0}")]
    InvalidVersion(usize),
    #[error("invalid masking pattern: {0}")]
    InvalidMaskingPattern(u8),

    // Matrix access
    #[error("{row},{col}")]
    OutOfBounds { row: i32, col: i32 },

    // Field arithmetic
    #[error("glog({0})")]
    LogOfZero(u8),

    // Format info read back
    #[error("invalid format info detected")]
    InvalidFormatInfo,
}

pub type QRResult<T> = Result<T, QRError>;
