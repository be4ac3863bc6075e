//! Error types for QR code encoding.
//!
//! Every failure of [`encode`](crate::encode) is reported synchronously through
//! [`QrError`]; a caller either receives a complete symbol or one of these.

use crate::segment::QrSegmentMode;
use thiserror::Error;

/// Broad category of an encoding failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// No data, or data of an unusable shape.
    Input,
    /// An explicitly requested mode cannot represent the segment content.
    ModeMismatch,
    /// The data does not fit the requested or the largest version.
    Capacity,
    /// Invalid arithmetic or table argument inside the encoder.
    Domain,
}

/// Error type for QR code encoding.
///
/// Ways to handle a capacity error include:
///
/// - Decrease the error correction level if it was greater than `QrCodeEcc::Low`.
/// - Drop the explicit version so the smallest fitting one is chosen.
/// - Change the text or binary data to be shorter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// No input data was provided.
    #[error("No input data")]
    NoInput,

    /// Segment content is not representable in the requested mode.
    #[error("{data:?} cannot be encoded with mode {mode}, suggested mode is {suggested}")]
    ModeMismatch {
        /// The offending segment content.
        data: String,
        /// The mode that was requested.
        mode: QrSegmentMode,
        /// The narrowest mode able to hold the content.
        suggested: QrSegmentMode,
    },

    /// A segment has more characters than its count indicator can express.
    #[error("Segment too long")]
    SegmentTooLong,

    /// Data length exceeds the capacity of the largest version.
    #[error("Data length = {0} bits, Max capacity = {1} bits")]
    DataOverCapacity(usize, usize),

    /// The explicitly requested version is too small for the data.
    #[error("Version {requested} cannot contain this data, minimum version required is {minimum}")]
    VersionTooSmall {
        /// Requested version number.
        requested: u8,
        /// Smallest version able to hold the data.
        minimum: u8,
    },

    /// The explicitly requested version exceeds the largest version.
    #[error("Version {0} is out of range, maximum is 40")]
    VersionOutOfRange(u32),

    /// Logarithm of zero requested from GF(256).
    #[error("log(0) is undefined in GF(256)")]
    LogOfZero,

    /// Mask pattern id outside `0..=7`.
    #[error("Mask pattern {0} is out of range [0, 7]")]
    InvalidMask(u8),

    /// Reed-Solomon encoding attempted before a degree was set.
    #[error("Reed-Solomon encoder has no generator polynomial")]
    EncoderNotInitialized,
}

impl QrError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoInput => ErrorKind::Input,
            Self::ModeMismatch { .. } => ErrorKind::ModeMismatch,
            Self::SegmentTooLong
            | Self::DataOverCapacity(..)
            | Self::VersionTooSmall { .. }
            | Self::VersionOutOfRange(_) => ErrorKind::Capacity,
            Self::LogOfZero | Self::InvalidMask(_) | Self::EncoderNotInitialized => {
                ErrorKind::Domain
            }
        }
    }
}

/// Result type alias for encoder operations.
pub type Result<T> = core::result::Result<T, QrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(QrError::NoInput.kind(), ErrorKind::Input);
        assert_eq!(QrError::DataOverCapacity(10, 8).kind(), ErrorKind::Capacity);
        assert_eq!(QrError::VersionOutOfRange(41).kind(), ErrorKind::Capacity);
        assert_eq!(QrError::LogOfZero.kind(), ErrorKind::Domain);
        assert_eq!(QrError::InvalidMask(9).kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_error_display() {
        let err = QrError::ModeMismatch {
            data: "a1".to_string(),
            mode: QrSegmentMode::Numeric,
            suggested: QrSegmentMode::Byte,
        };
        assert_eq!(
            err.to_string(),
            "\"a1\" cannot be encoded with mode Numeric, suggested mode is Byte"
        );
        assert_eq!(
            QrError::DataOverCapacity(200, 152).to_string(),
            "Data length = 200 bits, Max capacity = 152 bits"
        );
    }
}
