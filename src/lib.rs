//! # qrmatrix
//!
//! A QR code encoder producing the module matrix of a QR Code Model 2 symbol.
//!
//! `qrmatrix` turns text, raw bytes or explicit segments into a [`QrCode`]:
//! a square grid of dark and light modules together with the version, error
//! correction level and mask it was built with. Rendering is left to the
//! caller; [`helper`] has small SVG, image and terminal renderers.
//!
//! ## Features
//!
//! - Versions 1 to 40 and the four error correction levels L, M, Q and H.
//! - Numeric, alphanumeric, byte and Kanji modes, with text split into the
//!   mode sequence that needs the fewest bits.
//! - Automatic mask selection using the standard penalty rules.
//! - Kanji mode through an injected Shift-JIS mapping; the `sjis` feature
//!   (enabled by default) provides one backed by `encoding_rs`.
//! - Optional `parallel` feature evaluating mask candidates with rayon.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Example
//!
//! ```rust
//! use qrmatrix::{encode, EncodeOptions, QrCodeEcc};
//!
//! let options = EncodeOptions::new().error_correction_level(QrCodeEcc::High);
//! let qr = encode("http://www.google.com", &options).unwrap();
//!
//! assert_eq!(qr.size(), i32::from(qr.version().value()) * 4 + 17);
//! let svg = qrmatrix::helper::to_svg_string(&qr, 4);
//! assert!(svg.contains("<svg"));
//! ```
//!
//! Explicit segments:
//!
//! ```rust
//! use qrmatrix::{encode, EncodeOptions, QrSegmentMode, SegmentInput};
//!
//! let segments = vec![
//!     SegmentInput::text("ABCDE").with_mode(QrSegmentMode::Alphanumeric),
//!     SegmentInput::text("0123456789"),
//! ];
//! let qr = encode(segments, &EncodeOptions::new()).unwrap();
//! assert_eq!(qr.segments()[1].mode(), QrSegmentMode::Numeric);
//! ```
//!
//! ## Debugging
//!
//! Debug builds print encoder decisions to stderr when `QRMATRIX_DEBUG` is set.

#![forbid(unsafe_code)]

pub mod bit_buffer;
mod debug;
pub mod error;
pub mod galois;
pub mod helper;
pub mod kanji;
pub mod mask;
pub mod matrix;
pub mod options;
pub mod placement;
pub mod polynomial;
pub mod qrcode;
pub mod reed_solomon;
pub mod segment;
pub mod segmenter;
pub mod structure;
pub mod tables;

pub use error::{ErrorKind, QrError, Result};
pub use kanji::ToSjis;
pub use mask::Mask;
pub use matrix::BitMatrix;
pub use options::{EncodeOptions, QrData, SegmentData, SegmentInput};
pub use qrcode::{QrCode, QrCodeEcc, Version};
pub use segment::{QrSegment, QrSegmentMode};

#[cfg(feature = "sjis")]
pub use kanji::encoding_rs_to_sjis;

/// Encodes `data` into a QR code symbol.
///
/// Text is split into optimal segments, raw bytes become one Byte segment,
/// and explicit segments keep their requested modes.
///
/// # Errors
///
/// Fails with [`QrError`] when there is no data, when a requested mode cannot
/// hold its segment, or when the data does not fit the requested (or the
/// largest) version. No partial symbol is ever returned.
pub fn encode(data: impl Into<QrData>, options: &EncodeOptions) -> Result<QrCode> {
    match data.into() {
        QrData::Text(text) => QrCode::encode_text(&text, options),
        QrData::Bytes(bytes) => QrCode::encode_binary(&bytes, options),
        QrData::Segments(inputs) => QrCode::encode_inputs(&inputs, options),
    }
}
